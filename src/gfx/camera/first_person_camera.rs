use cgmath::*;

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Eye-level camera driven by yaw/pitch, walking on the XZ plane.
///
/// `yaw = 0` looks down +X, `yaw = -PI/2` looks down -Z; `up` is +Y.
#[derive(Debug, Clone, Copy)]
pub struct FirstPersonCamera {
    pub position: Vector3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for FirstPersonCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        let view = Matrix4::look_to_rh(eye, self.forward(), self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl FirstPersonCamera {
    pub fn new(position: Vector3<f32>, yaw: f32, pitch: f32, aspect: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            up: Vector3::unit_y(),
            aspect,
            fovy: Deg(75.0).into(),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        }
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.position, config.yaw, config.pitch, aspect);
        camera.fovy = Deg(config.fov_degrees).into();
        camera.znear = config.znear;
        camera.zfar = config.zfar;
        camera
    }

    /// Unit look direction, including pitch
    pub fn forward(&self) -> Vector3<f32> {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize()
    }

    /// Look direction projected onto the walking plane
    pub fn horizontal_forward(&self) -> Vector3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vector3::new(cos_yaw, 0.0, sin_yaw)
    }

    /// Unit vector to the camera's right on the walking plane
    pub fn right(&self) -> Vector3<f32> {
        self.horizontal_forward().cross(self.up).normalize()
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta) % std::f32::consts::TAU;
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    /// Moves along the horizontal look direction; negative moves back
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.horizontal_forward() * distance;
    }

    /// Moves sideways; negative moves left
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.position.x, self.position.y, self.position.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{a:?} != {b:?}");
    }

    fn looking_down_z() -> FirstPersonCamera {
        FirstPersonCamera::new(Vector3::zero(), -std::f32::consts::FRAC_PI_2, 0.0, 1.0)
    }

    #[test]
    fn test_default_orientation_looks_down_negative_z() {
        let camera = looking_down_z();
        assert_close(camera.forward(), Vector3::new(0.0, 0.0, -1.0));
        assert_close(camera.right(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = looking_down_z();
        camera.add_pitch(10.0);
        assert!(camera.pitch <= PITCH_LIMIT);
        camera.add_pitch(-20.0);
        assert!(camera.pitch >= -PITCH_LIMIT);
    }

    #[test]
    fn test_movement_stays_on_walking_plane() {
        let mut camera = looking_down_z();
        camera.set_pitch(0.5);
        camera.move_forward(1.0);
        camera.move_right(-2.0);
        assert_close(camera.position, Vector3::new(-2.0, 0.0, -1.0));
    }
}
