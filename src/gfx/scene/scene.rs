use cgmath::{Matrix4, SquareMatrix};
use log::{debug, info};
use wgpu::Device;

use super::object::{Mesh, Object, ObjectId};
use crate::error::{Result, RoomError};

/// Scene graph: an arena of objects plus the ordered list of root nodes
#[derive(Default)]
pub struct Scene {
    objects: Vec<Object>,
    roots: Vec<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root-level object
    ///
    /// # Arguments
    /// * `object` - Object to insert; any parent/child links it carries are reset
    ///
    /// # Returns
    /// The handle used to address the object from now on
    pub fn add(&mut self, object: Object) -> ObjectId {
        let id = self.insert(object, None);
        self.roots.push(id);
        id
    }

    /// Adds an object under `parent`; its transform becomes relative to the parent.
    ///
    /// # Arguments
    /// * `parent` - Existing object to attach to
    /// * `object` - Child to insert
    ///
    /// # Returns
    /// The child's handle, or `None` if `parent` does not belong to this scene
    pub fn add_child(&mut self, parent: ObjectId, object: Object) -> Option<ObjectId> {
        self.objects.get(parent.0)?;
        let id = self.insert(object, Some(parent));
        self.objects[parent.0].children.push(id);
        Some(id)
    }

    fn insert(&mut self, mut object: Object, parent: Option<ObjectId>) -> ObjectId {
        let id = ObjectId(self.objects.len());
        object.parent = parent;
        object.children.clear();
        self.objects.push(object);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.0)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        id.0 < self.objects.len()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    /// First object (in traversal order) carrying `name`
    ///
    /// # Arguments
    /// * `name` - Exact object name, as shown in the inventory
    ///
    /// # Returns
    /// The object's handle, or `None` if no object has that name
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.traverse()
            .into_iter()
            .find(|id| self.objects[id.0].name() == Some(name))
    }

    pub fn name_of(&self, id: ObjectId) -> Option<&str> {
        self.get(id).and_then(Object::name)
    }

    /// Depth-first, pre-order walk over every object, roots in insertion order
    ///
    /// # Returns
    /// Every handle exactly once; a parent always precedes its children
    pub fn traverse(&self) -> Vec<ObjectId> {
        let mut order = Vec::with_capacity(self.objects.len());
        let mut stack: Vec<ObjectId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.objects[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Object-to-world matrix for `id`
    ///
    /// Parent transforms are applied outermost first. Unknown handles yield the
    /// identity matrix.
    pub fn world_transform(&self, id: ObjectId) -> Matrix4<f32> {
        let mut transform = Matrix4::identity();
        let mut current = self.get(id);
        while let Some(object) = current {
            transform = object.transform * transform;
            current = object.parent.and_then(|parent| self.get(parent));
        }
        transform
    }

    /// Visible only if the object and all of its ancestors are visible
    pub fn is_visible(&self, id: ObjectId) -> bool {
        let mut current = self.get(id);
        while let Some(object) = current {
            if !object.visible {
                return false;
            }
            current = object.parent.and_then(|parent| self.get(parent));
        }
        true
    }

    /// Number of objects that can be collected (every named object)
    pub fn interactable_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_interactable()).count()
    }

    /// Sets the emissive colour of one object
    ///
    /// # Arguments
    /// * `id` - Object to recolour
    /// * `emissive` - Linear RGB added on top of the lit colour
    ///
    /// # Returns
    /// The colour it replaced, or `None` for an unknown handle
    pub fn set_emissive(&mut self, id: ObjectId, emissive: [f32; 3]) -> Option<[f32; 3]> {
        self.get_mut(id)
            .map(|object| std::mem::replace(&mut object.emissive, emissive))
    }

    /// Loads an OBJ file as one solid object, one mesh per OBJ model.
    ///
    /// Callers decide whether to place it at the root or under a group.
    /// Missing normals are replaced by face normals.
    ///
    /// # Arguments
    /// * `path` - OBJ file path
    /// * `name` - Object name; defaults to the first OBJ model's name
    ///
    /// # Errors
    /// [`RoomError::ModelLoad`] if the file cannot be read or parsed,
    /// [`RoomError::EmptyModel`] if it contains no models
    pub fn load_obj(path: &str, name: Option<&str>) -> Result<Object> {
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|source| RoomError::ModelLoad {
            path: path.to_string(),
            source,
        })?;

        if models.is_empty() {
            return Err(RoomError::EmptyModel(path.to_string()));
        }

        let meshes: Vec<Mesh> = models
            .iter()
            .map(|model| {
                let mesh = &model.mesh;
                debug!(
                    "model '{}': {} vertices, {} triangles",
                    model.name,
                    mesh.positions.len() / 3,
                    mesh.indices.len() / 3
                );

                let normals = if mesh.normals.len() == mesh.positions.len() {
                    mesh.normals.clone()
                } else {
                    Mesh::calculate_face_normals(&mesh.positions, &mesh.indices)
                };
                Mesh::new(mesh.positions.clone(), normals, mesh.indices.clone())
            })
            .collect();

        let object_name = name
            .map(str::to_string)
            .or_else(|| models.first().map(|m| m.name.clone()))
            .filter(|n| !n.is_empty());

        info!("Loaded '{}' ({} meshes)", path, meshes.len());

        let mut object = Object::new(meshes);
        object.name = object_name;
        Ok(object)
    }

    /// Creates vertex, index and uniform buffers for every object
    ///
    /// # Arguments
    /// * `device` - WGPU device for buffer creation
    /// * `layout` - Per-object bind group layout from the render engine
    pub fn init_gpu_resources(&mut self, device: &Device, layout: &wgpu::BindGroupLayout) {
        for object in &mut self.objects {
            object.init_gpu_resources(device, layout);
        }
    }

    /// Uploads world transforms and colours for every object
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        for index in 0..self.objects.len() {
            let world = self.world_transform(ObjectId(index));
            self.objects[index].update_gpu(queue, world);
        }
    }

    /// Objects that should be drawn this frame
    pub fn drawable(&self) -> impl Iterator<Item = &Object> + '_ {
        self.objects.iter().enumerate().filter_map(move |(index, object)| {
            (object.gpu_resources.is_some()
                && !object.meshes().is_empty()
                && self.is_visible(ObjectId(index)))
            .then_some(object)
        })
    }
}
