use std::ops::Range;

use cgmath::{Deg, InnerSpace, Matrix4, SquareMatrix, Vector3};
use wgpu::{util::DeviceExt, Device};

use super::vertex::Vertex3D;
use crate::{
    gfx::{camera::camera_utils::convert_matrix4_to_array, picking::AABB},
    wgpu_utils::{binding_types, UniformBuffer},
};

/// Stable handle to an object inside a [`Scene`](super::Scene)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    /// Builds a mesh from flat position/normal arrays (3 floats per vertex)
    pub fn new(positions: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Self {
        let vertices = positions
            .chunks_exact(3)
            .zip(normals.chunks_exact(3))
            .map(|(p, n)| Vertex3D {
                position: [p[0], p[1], p[2]],
                normal: [n[0], n[1], n[2]],
            })
            .collect();

        Self {
            vertices,
            index_count: indices.len() as u32,
            indices,
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Smooth normals averaged from adjacent faces, for OBJ files without any
    pub fn calculate_face_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex_count = positions.len() / 3;
        let position = |i: u32| {
            let i = i as usize * 3;
            Vector3::new(positions[i], positions[i + 1], positions[i + 2])
        };

        let mut accumulated = vec![Vector3::new(0.0f32, 0.0, 0.0); vertex_count];
        for triangle in indices.chunks_exact(3) {
            let (a, b, c) = (position(triangle[0]), position(triangle[1]), position(triangle[2]));
            let face_normal = (b - a).cross(c - a);
            for &i in triangle {
                accumulated[i as usize] += face_normal;
            }
        }

        accumulated
            .into_iter()
            .flat_map(|n| {
                let n = if n.magnitude2() > 0.0 { n.normalize() } else { Vector3::unit_y() };
                [n.x, n.y, n.z]
            })
            .collect()
    }

    fn init_gpu_resources(&mut self, device: &Device) {
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

/// Per-object shader data. MUST match `ObjectUniform` in shader.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    pub emissive: [f32; 4],
}

pub struct ObjectGpuResources {
    pub uniform: UniformBuffer<ObjectUniform>,
    pub bind_group: wgpu::BindGroup,
}

/// A node in the scene graph.
///
/// Objects with meshes are solid and can be hit by rays; objects without
/// meshes are groups that only carry a transform for their children. Only
/// objects with a name are interactable.
pub struct Object {
    pub name: Option<String>,
    /// Local transform, relative to the parent
    pub transform: Matrix4<f32>,
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub visible: bool,
    meshes: Vec<Mesh>,
    local_bounds: Option<AABB>,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    /// Create a new solid object with identity transformation
    pub fn new(meshes: Vec<Mesh>) -> Self {
        let vertices: Vec<[f32; 3]> = meshes
            .iter()
            .flat_map(|mesh| mesh.vertices().iter().map(|v| v.position))
            .collect();
        let local_bounds = (!vertices.is_empty()).then(|| AABB::from_vertices(&vertices));

        Self {
            name: None,
            transform: Matrix4::identity(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            emissive: [0.0; 3],
            visible: true,
            meshes,
            local_bounds,
            parent: None,
            children: Vec::new(),
            gpu_resources: None,
        }
    }

    /// Create an empty group node
    pub fn group() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, rgb: [f32; 3]) -> Self {
        self.base_color = [rgb[0], rgb[1], rgb[2], 1.0];
        self
    }

    pub fn with_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_translation(self, translation: Vector3<f32>) -> Self {
        self.with_transform(Matrix4::from_translation(translation))
    }

    /// Translation, rotation about Y, then uniform scale
    pub fn set_transform_trs(&mut self, translation: Vector3<f32>, rotation_y: Deg<f32>, scale: f32) {
        self.transform = Matrix4::from_translation(translation)
            * Matrix4::from_angle_y(rotation_y)
            * Matrix4::from_scale(scale);
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the object can be highlighted and collected
    pub fn is_interactable(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Bounding box in the object's own space, `None` for groups
    pub fn local_bounds(&self) -> Option<AABB> {
        self.local_bounds
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    pub fn init_gpu_resources(&mut self, device: &Device, layout: &wgpu::BindGroupLayout) {
        for mesh in &mut self.meshes {
            mesh.init_gpu_resources(device);
        }

        let uniform = UniformBuffer::new_with_data(device, &self.uniform(self.transform));
        let bind_group = binding_types::single_uniform_bind_group(
            device,
            layout,
            uniform.binding_resource(),
            "Object Bind Group",
        );

        self.gpu_resources = Some(ObjectGpuResources { uniform, bind_group });
    }

    /// Pushes the world transform and current colours to the GPU
    pub fn update_gpu(&mut self, queue: &wgpu::Queue, world_transform: Matrix4<f32>) {
        let content = self.uniform(world_transform);
        if let Some(gpu) = self.gpu_resources.as_mut() {
            gpu.uniform.update_content(queue, content);
        }
    }

    fn uniform(&self, world_transform: Matrix4<f32>) -> ObjectUniform {
        ObjectUniform {
            model: convert_matrix4_to_array(world_transform),
            base_color: self.base_color,
            emissive: [self.emissive[0], self.emissive[1], self.emissive[2], 0.0],
        }
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // not uploaded yet
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_object(&mut self, object: &'b Object) {
        let Some(gpu) = &object.gpu_resources else {
            return;
        };
        self.set_bind_group(1, &gpu.bind_group, &[]);
        for mesh in &object.meshes {
            self.draw_mesh(mesh);
        }
    }
}
