//! # Scene Management Module
//!
//! Scene graph for the room: an arena of [`Object`]s addressed by
//! [`ObjectId`], with parent/child grouping, per-object colour and emissive
//! state, and OBJ loading.
//!
//! ```rust
//! use roomwalk::gfx::geometry::generate_cube;
//! use roomwalk::gfx::scene::{Object, Scene};
//!
//! let mut scene = Scene::new();
//! let cube = scene.add(Object::new(vec![generate_cube().into_mesh()]).with_name("Cube"));
//! assert_eq!(scene.name_of(cube), Some("Cube"));
//! ```

pub mod object;
pub mod scene;
pub mod vertex;

pub use object::{DrawObject, Mesh, Object, ObjectId};
pub use scene::Scene;
pub use vertex::Vertex3D;
