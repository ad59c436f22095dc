//! # Procedural Geometry Generation
//!
//! Generates the handful of primitives the room is built from, so the demo
//! runs without any model files on disk.
//!
//! ```rust
//! use roomwalk::gfx::geometry::{generate_box, generate_plane};
//!
//! let crate_box = generate_box(1.0, 1.0, 1.0);
//! let floor = generate_plane(50.0, 50.0);
//! assert_eq!(crate_box.triangle_count(), 12);
//! assert_eq!(floor.triangle_count(), 2);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::object::Mesh;

/// Generated geometry data ready to become a [`Mesh`]
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Offsets every vertex, e.g. to place a box part inside a composite prop.
    pub fn translated(mut self, offset: [f32; 3]) -> Self {
        for v in &mut self.vertices {
            v[0] += offset[0];
            v[1] += offset[1];
            v[2] += offset[2];
        }
        self
    }

    /// Converts to a CPU-side mesh; GPU buffers are created later.
    pub fn into_mesh(self) -> Mesh {
        let positions: Vec<f32> = self.vertices.iter().flatten().copied().collect();
        let normals: Vec<f32> = if self.normals.len() == self.vertices.len() {
            self.normals.iter().flatten().copied().collect()
        } else {
            Mesh::calculate_face_normals(&positions, &self.indices)
        };
        Mesh::new(positions, normals, self.indices)
    }
}
