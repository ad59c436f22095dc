// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Global uniforms and the depth buffer.

pub mod global_bindings;
pub mod texture_resource;

pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, GlobalUniform};
pub use texture_resource::TextureResource;
