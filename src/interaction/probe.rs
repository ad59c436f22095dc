//! Directional collision probes.
//!
//! A probe answers "is there something within `threshold` units in this
//! direction?" by casting one bounded ray from the camera position.

use cgmath::{InnerSpace, Vector3};

use crate::gfx::{
    picking::{Intersection, Ray, Raycaster},
    scene::Scene,
};

/// The four probe and movement directions, relative to the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];

    pub fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// World-space unit vector for this direction.
    ///
    /// Left and right are purely lateral: `forward x up` and its negation.
    /// `forward` must not be parallel to `up`.
    pub fn vector(self, forward: Vector3<f32>, up: Vector3<f32>) -> Vector3<f32> {
        let forward = forward.normalize();
        match self {
            Direction::Forward => forward,
            Direction::Backward => -forward,
            Direction::Right => forward.cross(up).normalize(),
            Direction::Left => up.cross(forward).normalize(),
        }
    }
}

/// Bounded-distance obstruction check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub near: f32,
    pub threshold: f32,
}

impl Probe {
    pub fn new(near: f32, threshold: f32) -> Self {
        Self { near, threshold }
    }

    /// Nearest object within the threshold along `direction`, if any
    pub fn cast(
        &self,
        scene: &Scene,
        origin: Vector3<f32>,
        forward: Vector3<f32>,
        up: Vector3<f32>,
        direction: Direction,
    ) -> Option<Intersection> {
        let ray = Ray::new(origin, direction.vector(forward, up));
        Raycaster::new(ray, self.near, self.threshold).first_hit(scene)
    }

    /// Results for all four directions, indexed by [`Direction::index`]
    pub fn cast_all(
        &self,
        scene: &Scene,
        origin: Vector3<f32>,
        forward: Vector3<f32>,
        up: Vector3<f32>,
    ) -> Obstructions {
        Obstructions {
            hits: Direction::ALL.map(|direction| self.cast(scene, origin, forward, up, direction)),
        }
    }
}

/// Per-direction probe results for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Obstructions {
    hits: [Option<Intersection>; 4],
}

impl Obstructions {
    /// No obstruction in any direction
    pub fn clear() -> Self {
        Self::default()
    }

    pub fn with_hit(mut self, direction: Direction, hit: Intersection) -> Self {
        self.hits[direction.index()] = Some(hit);
        self
    }

    pub fn is_blocked(&self, direction: Direction) -> bool {
        self.hits[direction.index()].is_some()
    }

    pub fn hit(&self, direction: Direction) -> Option<&Intersection> {
        self.hits[direction.index()].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{geometry::generate_cube, scene::Object};

    const FORWARD: Vector3<f32> = Vector3::new(0.0, 0.0, -1.0);
    const UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_direction_vectors() {
        assert_close(Direction::Forward.vector(FORWARD, UP), FORWARD);
        assert_close(Direction::Backward.vector(FORWARD, UP), -FORWARD);
        assert_close(Direction::Right.vector(FORWARD, UP), Vector3::new(1.0, 0.0, 0.0));
        assert_close(Direction::Left.vector(FORWARD, UP), Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_lateral_vectors_are_perpendicular_to_forward() {
        let pitched = Vector3::new(0.3, 0.4, -0.8).normalize();
        for direction in [Direction::Left, Direction::Right] {
            let v = direction.vector(pitched, UP);
            assert!(v.dot(pitched).abs() < 1e-5);
            assert!((v.magnitude() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_opposites() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_close(
                direction.vector(FORWARD, UP),
                -direction.opposite().vector(FORWARD, UP),
            );
        }
    }

    #[test]
    fn test_probe_only_reports_within_threshold() {
        let mut scene = Scene::new();
        let wall = scene.add(
            Object::new(vec![generate_cube().into_mesh()])
                .with_translation(Vector3::new(2.0, 0.0, 0.0)),
        );
        scene.add(
            Object::new(vec![generate_cube().into_mesh()])
                .with_translation(Vector3::new(0.0, 0.0, 10.0)),
        );

        let probe = Probe::new(0.0, 3.0);
        let origin = Vector3::new(0.0, 0.0, 0.0);
        let obstructions = probe.cast_all(&scene, origin, FORWARD, UP);

        assert_eq!(obstructions.hit(Direction::Right).map(|h| h.object), Some(wall));
        assert!(!obstructions.is_blocked(Direction::Forward));
        assert!(!obstructions.is_blocked(Direction::Left));
        // The second cube is behind the camera but 9.5 units away
        assert!(!obstructions.is_blocked(Direction::Backward));
    }
}
