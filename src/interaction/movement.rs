//! Turns held keys into camera displacement, gated by the probes.

use std::time::Duration;

use cgmath::{InnerSpace, Vector2, Zero};

use super::{
    input::InputState,
    probe::{Direction, Obstructions},
};
use crate::{
    config::{MovementMode, SessionConfig},
    gfx::camera::FirstPersonCamera,
};

/// Longest frame time integrated in one damped update; slower frames move as if this long
pub const MAX_STEP_DT: Duration = Duration::from_millis(250);

/// Camera-relative displacement for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Displacement {
    /// Along the horizontal look direction; negative is backwards
    pub forward: f32,
    /// Along the camera's right vector; negative is left
    pub right: f32,
}

impl Displacement {
    pub fn is_zero(&self) -> bool {
        self.forward == 0.0 && self.right == 0.0
    }

    /// Distance travelled toward `direction` (zero if moving the other way)
    pub fn along(&self, direction: Direction) -> f32 {
        let signed = match direction {
            Direction::Forward => self.forward,
            Direction::Backward => -self.forward,
            Direction::Right => self.right,
            Direction::Left => -self.right,
        };
        signed.max(0.0)
    }

    pub fn apply_to(&self, camera: &mut FirstPersonCamera) {
        camera.move_forward(self.forward);
        camera.move_right(self.right);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementController {
    pub mode: MovementMode,
    pub step: f32,
    pub speed: f32,
    pub damping: f32,
    /// Longest damped move along one axis in a single frame.
    ///
    /// Kept at the probe threshold: a probe that sees nothing guarantees
    /// nothing lies within this distance.
    pub max_step: f32,
    /// Damped mode only: x is lateral, y is forward
    velocity: Vector2<f32>,
}

impl MovementController {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            mode: config.movement_mode,
            step: config.step,
            speed: config.damped_speed,
            damping: config.damping,
            max_step: config.probe_threshold,
            velocity: Vector2::zero(),
        }
    }

    pub fn velocity(&self) -> Vector2<f32> {
        self.velocity
    }

    /// Displacement for this frame.
    ///
    /// # Arguments
    /// * `input` - Currently held movement keys
    /// * `obstructions` - This frame's probe results; blocked directions never move
    /// * `dt` - Frame time in seconds, capped at [`MAX_STEP_DT`]; stepped mode ignores it
    pub fn update(&mut self, input: &InputState, obstructions: &Obstructions, dt: f32) -> Displacement {
        let dt = dt.clamp(0.0, MAX_STEP_DT.as_secs_f32());
        match self.mode {
            MovementMode::Stepped => self.stepped(input, obstructions),
            MovementMode::Damped => self.damped(input, obstructions, dt),
        }
    }

    /// Each held, unobstructed direction moves exactly `step`; opposite keys cancel.
    fn stepped(&self, input: &InputState, obstructions: &Obstructions) -> Displacement {
        let mut displacement = Displacement::default();
        for direction in Direction::ALL {
            if !input.is_held(direction) || obstructions.is_blocked(direction) {
                continue;
            }
            match direction {
                Direction::Forward => displacement.forward += self.step,
                Direction::Backward => displacement.forward -= self.step,
                Direction::Right => displacement.right += self.step,
                Direction::Left => displacement.right -= self.step,
            }
        }
        displacement
    }

    fn damped(&mut self, input: &InputState, obstructions: &Obstructions, dt: f32) -> Displacement {
        let axis = |positive: bool, negative: bool| positive as i32 as f32 - negative as i32 as f32;
        let mut direction = Vector2::new(
            axis(input.right, input.left),
            axis(input.forward, input.backward),
        );
        if direction.magnitude2() > 0.0 {
            direction = direction.normalize();
        }

        if input.left || input.right {
            self.velocity.x += direction.x * self.speed * dt;
        }
        if input.forward || input.backward {
            self.velocity.y += direction.y * self.speed * dt;
        }
        self.velocity *= self.damping;

        let mut displacement = Displacement {
            forward: self.velocity.y * dt,
            right: self.velocity.x * dt,
        };

        let blocked_forward = (displacement.forward > 0.0 && obstructions.is_blocked(Direction::Forward))
            || (displacement.forward < 0.0 && obstructions.is_blocked(Direction::Backward));
        if blocked_forward {
            displacement.forward = 0.0;
            self.velocity.y = 0.0;
        }

        let blocked_lateral = (displacement.right > 0.0 && obstructions.is_blocked(Direction::Right))
            || (displacement.right < 0.0 && obstructions.is_blocked(Direction::Left));
        if blocked_lateral {
            displacement.right = 0.0;
            self.velocity.x = 0.0;
        }

        // Never step past what the probes could see this frame
        if displacement.forward.abs() > self.max_step {
            displacement.forward = self.max_step.copysign(displacement.forward);
            self.velocity.y = 0.0;
        }
        if displacement.right.abs() > self.max_step {
            displacement.right = self.max_step.copysign(displacement.right);
            self.velocity.x = 0.0;
        }

        displacement
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;
    use crate::gfx::{picking::Intersection, scene::ObjectId};

    fn hit() -> Intersection {
        Intersection {
            object: ObjectId(0),
            distance: 1.0,
            point: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    fn holding(directions: &[Direction]) -> InputState {
        let mut input = InputState::new();
        for &direction in directions {
            input.set_held(direction, true);
        }
        input
    }

    #[test]
    fn test_each_direction_moves_exactly_one_step() {
        let mut controller = MovementController::new(&SessionConfig::default());
        for direction in Direction::ALL {
            let displacement =
                controller.update(&holding(&[direction]), &Obstructions::clear(), 1.0 / 60.0);
            assert_eq!(displacement.along(direction), 0.1);
            assert_eq!(displacement.along(direction.opposite()), 0.0);
        }
    }

    #[test]
    fn test_blocked_direction_does_not_move() {
        let mut controller = MovementController::new(&SessionConfig::default());
        let obstructions = Obstructions::clear().with_hit(Direction::Forward, hit());

        let displacement = controller.update(
            &holding(&[Direction::Forward, Direction::Right]),
            &obstructions,
            1.0 / 60.0,
        );
        assert_eq!(displacement.forward, 0.0);
        assert_eq!(displacement.right, 0.1);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut controller = MovementController::new(&SessionConfig::default());
        let displacement = controller.update(
            &holding(&[Direction::Left, Direction::Right]),
            &Obstructions::clear(),
            1.0 / 60.0,
        );
        assert!(displacement.is_zero());
    }

    #[test]
    fn test_diagonal_is_not_normalised_when_stepped() {
        let mut controller = MovementController::new(&SessionConfig::default());
        let displacement = controller.update(
            &holding(&[Direction::Forward, Direction::Left]),
            &Obstructions::clear(),
            1.0 / 60.0,
        );
        assert_eq!(displacement, Displacement { forward: 0.1, right: -0.1 });
    }

    #[test]
    fn test_no_keys_no_motion() {
        let mut controller = MovementController::new(&SessionConfig::default());
        let displacement = controller.update(&InputState::new(), &Obstructions::clear(), 1.0);
        assert!(displacement.is_zero());
    }

    fn damped_controller() -> MovementController {
        MovementController::new(&SessionConfig {
            movement_mode: MovementMode::Damped,
            ..Default::default()
        })
    }

    #[test]
    fn test_damped_accelerates_then_coasts_to_rest() {
        let mut controller = damped_controller();
        let dt = 1.0 / 60.0;

        let first = controller.update(&holding(&[Direction::Forward]), &Obstructions::clear(), dt);
        let second = controller.update(&holding(&[Direction::Forward]), &Obstructions::clear(), dt);
        assert!(first.forward > 0.0);
        assert!(second.forward > first.forward);

        let mut coasting = controller.update(&InputState::new(), &Obstructions::clear(), dt);
        assert!(coasting.forward > 0.0 && coasting.forward < second.forward);
        for _ in 0..200 {
            coasting = controller.update(&InputState::new(), &Obstructions::clear(), dt);
        }
        assert!(coasting.forward.abs() < 1e-6);
    }

    #[test]
    fn test_damped_step_is_capped_per_axis() {
        let mut controller = damped_controller();
        let dt = MAX_STEP_DT.as_secs_f32();
        for _ in 0..20 {
            let displacement =
                controller.update(&holding(&[Direction::Forward, Direction::Right]), &Obstructions::clear(), dt);
            assert!(displacement.forward <= controller.max_step);
            assert!(displacement.right <= controller.max_step);
        }
    }

    #[test]
    fn test_long_frames_integrate_as_capped() {
        let mut capped = damped_controller();
        let mut stalled = damped_controller();
        let held = holding(&[Direction::Forward]);

        let expected = capped.update(&held, &Obstructions::clear(), MAX_STEP_DT.as_secs_f32());
        let actual = stalled.update(&held, &Obstructions::clear(), 3.0);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_damped_stops_at_obstruction() {
        let mut controller = damped_controller();
        let dt = 1.0 / 60.0;
        controller.update(&holding(&[Direction::Forward]), &Obstructions::clear(), dt);

        let obstructions = Obstructions::clear().with_hit(Direction::Forward, hit());
        let displacement = controller.update(&holding(&[Direction::Forward]), &obstructions, dt);
        assert_eq!(displacement.forward, 0.0);
        assert_eq!(controller.velocity().y, 0.0);
    }
}
