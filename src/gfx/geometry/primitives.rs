//! # Primitive Shape Generation
//!
//! Boxes and planes with outward normals, centred at the origin.

use super::GeometryData;

/// Generate an axis-aligned box centred at the origin.
///
/// Each face has its own four vertices so normals stay flat.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);

    #[rustfmt::skip]
    let positions = [
        // Front face
        [-x, -y,  z], [ x, -y,  z], [ x,  y,  z], [-x,  y,  z],
        // Back face
        [-x, -y, -z], [-x,  y, -z], [ x,  y, -z], [ x, -y, -z],
        // Left face
        [-x, -y, -z], [-x, -y,  z], [-x,  y,  z], [-x,  y, -z],
        // Right face
        [ x, -y,  z], [ x, -y, -z], [ x,  y, -z], [ x,  y,  z],
        // Top face
        [-x,  y,  z], [ x,  y,  z], [ x,  y, -z], [-x,  y, -z],
        // Bottom face
        [-x, -y, -z], [ x, -y, -z], [ x, -y,  z], [-x, -y,  z],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    let mut data = GeometryData::new();
    data.vertices = positions.to_vec();
    data.normals = face_normals
        .iter()
        .flat_map(|n| std::iter::repeat(*n).take(4))
        .collect();
    data.indices = (0..6u32)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base + 2, base + 3, base]
        })
        .collect();

    data
}

/// Generate a unit cube (-0.5..0.5 on every axis)
pub fn generate_cube() -> GeometryData {
    generate_box(1.0, 1.0, 1.0)
}

/// Generate a flat plane in the XZ plane facing +Y.
///
/// Walls are planes rotated into place by their object transform.
pub fn generate_plane(width: f32, depth: f32) -> GeometryData {
    let (x, z) = (width * 0.5, depth * 0.5);

    let mut data = GeometryData::new();
    data.vertices = vec![[-x, 0.0, z], [x, 0.0, z], [x, 0.0, -z], [-x, 0.0, -z]];
    data.normals = vec![[0.0, 1.0, 0.0]; 4];
    data.indices = vec![0, 1, 2, 2, 3, 0];

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_extents() {
        let data = generate_box(2.0, 4.0, 6.0);
        assert_eq!(data.vertex_count(), 24);
        assert_eq!(data.triangle_count(), 12);
        assert_eq!(data.normals.len(), data.vertices.len());

        let max_y = data.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        let min_z = data.vertices.iter().map(|v| v[2]).fold(f32::MAX, f32::min);
        assert_eq!(max_y, 2.0);
        assert_eq!(min_z, -3.0);
    }

    #[test]
    fn test_plane_is_flat() {
        let data = generate_plane(50.0, 30.0);
        assert!(data.vertices.iter().all(|v| v[1] == 0.0));
        assert!(data.indices.iter().all(|&i| (i as usize) < data.vertex_count()));
    }

    #[test]
    fn test_translated_moves_every_vertex() {
        let data = generate_cube().translated([0.0, 1.0, 0.0]);
        let min_y = data.vertices.iter().map(|v| v[1]).fold(f32::MAX, f32::min);
        assert_eq!(min_y, 0.5);
    }
}
