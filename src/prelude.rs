//! # Roomwalk Prelude
//!
//! Commonly used types for building a room:
//!
//! ```no_run
//! use roomwalk::prelude::*;
//!
//! fn main() -> roomwalk::Result<()> {
//!     let mut app = RoomWalkApp::new(AppConfig::default())?;
//!     app.scene_mut().add(
//!         Object::new(vec![generate_cube().into_mesh()])
//!             .with_name("Cube")
//!             .with_translation(Vector3::new(0.0, 0.5, 0.0)),
//!     );
//!     app.run()
//! }
//! ```

pub use crate::app::RoomWalkApp;
pub use crate::config::{AppConfig, CameraConfig, LightConfig, MovementMode, SessionConfig};
pub use crate::error::{Result, RoomError};
pub use crate::gfx::{
    camera::FirstPersonCamera,
    geometry::{generate_box, generate_cube, generate_plane, GeometryData},
    scene::{Mesh, Object, ObjectId, Scene},
};
pub use crate::interaction::{Catalog, CollectOutcome, Direction, InputEvent, Session};

pub use cgmath::{Deg, Vector3};
