//! # Ray Casting
//!
//! Bounded ray casts against the scene graph, used by the directional probes
//! that gate movement and pick the highlighted object.
//!
//! ## How it works
//!
//! 1. **Ray**: an origin and a normalised direction in world space
//! 2. **Ray-Object Intersection**: every visible solid object's local bounding
//!    box is transformed to world space and slab-tested against the ray
//! 3. **Selection**: hits inside `[near, far]` are sorted by distance
//!
//! ```rust
//! use cgmath::Vector3;
//! use roomwalk::gfx::geometry::generate_cube;
//! use roomwalk::gfx::picking::{Ray, Raycaster};
//! use roomwalk::gfx::scene::{Object, Scene};
//!
//! let mut scene = Scene::new();
//! let cube = scene.add(
//!     Object::new(vec![generate_cube().into_mesh()])
//!         .with_translation(Vector3::new(0.0, 0.0, -2.0)),
//! );
//!
//! let ray = Ray::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
//! let hit = Raycaster::new(ray, 0.0, 3.0).first_hit(&scene).unwrap();
//! assert_eq!(hit.object, cube);
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, Vector3, Vector4, Zero};

use crate::gfx::scene::{ObjectId, Scene};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl AABB {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let first = Vector3::from(*first);
        vertices.iter().skip(1).fold(Self::new(first, first), |aabb, v| {
            Self::new(
                Vector3::new(aabb.min.x.min(v[0]), aabb.min.y.min(v[1]), aabb.min.z.min(v[2])),
                Vector3::new(aabb.max.x.max(v[0]), aabb.max.y.max(v[1]), aabb.max.z.max(v[2])),
            )
        })
    }

    /// Slab test. Returns the distance to the entry point, or to the exit
    /// point when the origin is inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Bounds of all 8 transformed corners
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let corners: Vec<[f32; 3]> = (0..8)
            .map(|i| {
                let corner = Vector4::new(
                    if i & 1 == 0 { self.min.x } else { self.max.x },
                    if i & 2 == 0 { self.min.y } else { self.max.y },
                    if i & 4 == 0 { self.min.z } else { self.max.z },
                    1.0,
                );
                let p = matrix * corner;
                [p.x / p.w, p.y / p.w, p.z / p.w]
            })
            .collect();

        Self::from_vertices(&corners)
    }
}

/// One object hit by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub object: ObjectId,
    /// Distance from the ray origin
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// A ray limited to the `[near, far]` distance range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raycaster {
    pub ray: Ray,
    pub near: f32,
    pub far: f32,
}

impl Raycaster {
    /// Creates a raycaster
    ///
    /// # Arguments
    /// * `ray` - Origin and unit direction in world space
    /// * `near` - Closest accepted hit distance
    /// * `far` - Furthest accepted hit distance; a probe's threshold
    pub fn new(ray: Ray, near: f32, far: f32) -> Self {
        Self { ray, near, far }
    }

    /// Every visible solid object hit within range, nearest first.
    ///
    /// Walks the whole graph, so children of groups are tested too. Objects
    /// under a hidden ancestor and objects without meshes are skipped. Equal
    /// distances keep traversal order.
    ///
    /// # Arguments
    /// * `scene` - Scene to test against world-space bounding boxes
    ///
    /// # Returns
    /// All hits inside `[near, far]`, sorted by distance
    pub fn intersect_scene(&self, scene: &Scene) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = scene
            .traverse()
            .into_iter()
            .filter(|&id| scene.is_visible(id))
            .filter_map(|id| {
                let bounds = scene.get(id)?.local_bounds()?;
                let world_bounds = bounds.transform(&scene.world_transform(id));
                let distance = world_bounds.intersect_ray(&self.ray)?;
                (distance >= self.near && distance <= self.far).then(|| Intersection {
                    object: id,
                    distance,
                    point: self.ray.point_at(distance),
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Nearest hit within range
    ///
    /// # Returns
    /// `None` if nothing lies inside `[near, far]`
    pub fn first_hit(&self, scene: &Scene) -> Option<Intersection> {
        self.intersect_scene(scene).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{geometry::generate_cube, scene::Object};

    fn cube_at(x: f32, y: f32, z: f32) -> Object {
        Object::new(vec![generate_cube().into_mesh()]).with_translation(Vector3::new(x, y, z))
    }

    fn forward_ray() -> Ray {
        Ray::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = AABB::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = AABB::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&ray), Some(4.0));

        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());

        let ray_away = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(aabb.intersect_ray(&ray_away).is_none());
    }

    #[test]
    fn test_aabb_transform_scales_and_moves() {
        let aabb = AABB::new(Vector3::new(-0.5, -0.5, -0.5), Vector3::new(0.5, 0.5, 0.5));
        let matrix = Matrix4::from_translation(Vector3::new(0.0, 1.0, 0.0)) * Matrix4::from_scale(2.0);
        let moved = aabb.transform(&matrix);
        assert_eq!(moved.min, Vector3::new(-1.0, 0.0, -1.0));
        assert_eq!(moved.max, Vector3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_nearest_hit_first() {
        let mut scene = Scene::new();
        let far = scene.add(cube_at(0.0, 0.0, -2.5));
        let near = scene.add(cube_at(0.0, 0.0, -1.5));

        let hits = Raycaster::new(forward_ray(), 0.0, 10.0).intersect_scene(&scene);
        let order: Vec<ObjectId> = hits.iter().map(|h| h.object).collect();
        assert_eq!(order, vec![near, far]);
        assert!((hits[0].distance - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_far_limit_excludes_distant_objects() {
        let mut scene = Scene::new();
        scene.add(cube_at(0.0, 0.0, -5.0));
        assert!(Raycaster::new(forward_ray(), 0.0, 3.0).first_hit(&scene).is_none());
        assert!(Raycaster::new(forward_ray(), 0.0, 5.0).first_hit(&scene).is_some());
    }

    #[test]
    fn test_children_of_groups_are_hit() {
        let mut scene = Scene::new();
        let group = scene.add(Object::group().with_translation(Vector3::new(0.0, 0.0, -2.0)));
        let child = scene.add_child(group, cube_at(0.0, 0.0, 0.0)).unwrap();

        let hit = Raycaster::new(forward_ray(), 0.0, 3.0).first_hit(&scene).unwrap();
        assert_eq!(hit.object, child);
        assert!((hit.point.z + 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_hidden_objects_are_skipped() {
        let mut scene = Scene::new();
        let id = scene.add(cube_at(0.0, 0.0, -2.0));
        scene.get_mut(id).unwrap().visible = false;
        assert!(Raycaster::new(forward_ray(), 0.0, 3.0).first_hit(&scene).is_none());
    }

    #[test]
    fn test_equal_distances_keep_traversal_order() {
        let mut scene = Scene::new();
        let first = scene.add(cube_at(0.0, 0.0, -2.0));
        scene.add(cube_at(0.0, 0.0, -2.0));
        let hit = Raycaster::new(forward_ray(), 0.0, 3.0).first_hit(&scene).unwrap();
        assert_eq!(hit.object, first);
    }
}
