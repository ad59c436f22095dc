use super::first_person_camera::FirstPersonCamera;

/// Turns raw mouse motion into yaw and pitch
pub struct CameraController {
    pub mouse_sensitivity: f32,
}

impl CameraController {
    pub fn new(mouse_sensitivity: f32) -> Self {
        Self { mouse_sensitivity }
    }

    /// Applies one mouse delta in pixels; moving the mouse up looks up
    pub fn process_mouse_motion(&self, delta: (f64, f64), camera: &mut FirstPersonCamera) {
        camera.add_yaw(delta.0 as f32 * self.mouse_sensitivity);
        camera.add_pitch(-delta.1 as f32 * self.mouse_sensitivity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_motion_turns_camera() {
        let controller = CameraController::new(0.01);
        let mut camera = FirstPersonCamera::new(cgmath::Vector3::new(0.0, 0.0, 0.0), 0.0, 0.0, 1.0);
        controller.process_mouse_motion((10.0, 10.0), &mut camera);
        assert!((camera.yaw - 0.1).abs() < 1e-6);
        assert!((camera.pitch + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_zero_sensitivity_ignores_motion() {
        let controller = CameraController::new(0.0);
        let mut camera = FirstPersonCamera::new(cgmath::Vector3::new(0.0, 0.0, 0.0), 0.5, 0.2, 1.0);
        controller.process_mouse_motion((40.0, -25.0), &mut camera);
        assert_eq!(camera.yaw, 0.5);
        assert_eq!(camera.pitch, 0.2);
    }
}
