//! # Graphics Module
//!
//! Everything that knows about geometry, cameras and the GPU:
//!
//! - **Camera** ([`camera`]) - first-person camera, mouse look and key mapping
//! - **Geometry** ([`geometry`]) - procedural boxes and planes
//! - **Picking** ([`picking`]) - rays, bounding boxes and scene ray casts
//! - **Scene** ([`scene`]) - the object tree and its GPU resources
//! - **Rendering** ([`rendering`]) - the forward renderer
//! - **Resources** ([`resources`]) - global uniforms and the depth buffer
//!
//! Picking, geometry and the scene tree work without a GPU, which is what lets
//! the interaction layer be tested headlessly.

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use camera::FirstPersonCamera;
pub use rendering::RenderEngine;
