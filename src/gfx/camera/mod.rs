pub mod camera_controller;
pub mod camera_utils;
pub mod first_person_camera;

// Re-export main types
pub use camera_controller::CameraController;
pub use camera_utils::{CameraManager, CameraUniform};
pub use first_person_camera::FirstPersonCamera;
