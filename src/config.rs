//! Tunables for the session, camera, light and window.
//!
//! Every struct has a `Default` matching the raycast room, so callers only
//! override what they care about:
//!
//! ```rust
//! use roomwalk::config::{MovementMode, SessionConfig};
//!
//! let config = SessionConfig {
//!     movement_mode: MovementMode::Damped,
//!     ..Default::default()
//! };
//! assert_eq!(config.probe_threshold, 3.0);
//! ```

use std::time::Duration;

use cgmath::Vector3;
use winit::keyboard::KeyCode;

/// How held keys turn into camera displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    /// Fixed distance per frame per held key, no inertia
    #[default]
    Stepped,
    /// Velocity integrated with delta time and decayed by a damping factor
    Damped,
}

/// Interaction tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Maximum distance at which a probe reports an obstruction
    pub probe_threshold: f32,
    /// Minimum distance for probe hits
    pub probe_near: f32,
    /// Per-frame displacement in `Stepped` mode
    pub step: f32,
    pub movement_mode: MovementMode,
    /// Acceleration in `Damped` mode, units per second squared
    pub damped_speed: f32,
    /// Per-frame velocity retention in `Damped` mode
    pub damping: f32,
    /// How long the "Found" notification stays up
    pub notification_duration: Duration,
    /// Emissive colour applied to the highlighted object
    pub highlight_emissive: [f32; 3],
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            probe_threshold: 3.0,
            probe_near: 0.0,
            step: 0.1,
            movement_mode: MovementMode::Stepped,
            damped_speed: 20.0,
            damping: 0.9,
            notification_duration: Duration::from_secs(2),
            highlight_emissive: [0.333, 0.333, 0.333],
        }
    }
}

/// First-person camera placement and projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub position: Vector3<f32>,
    /// Radians; `-PI/2` looks down -Z
    pub yaw: f32,
    /// Radians, clamped to +-89 degrees
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Radians of rotation per pixel of mouse motion
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 1.7, 12.0),
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
            fov_degrees: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            mouse_sensitivity: 0.002,
        }
    }
}

/// Single point light plus ambient term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    pub ambient: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [-20.0, 10.0, 10.0],
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            ambient: [0.25, 0.25, 0.28],
        }
    }
}

/// Everything the windowed app needs at start-up
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Toggles the inventory overlay
    pub inventory_key: KeyCode,
    /// Draws the frame-rate readout in the corner
    pub show_fps: bool,
    pub session: SessionConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "roomwalk".to_string(),
            width: 1200,
            height: 800,
            inventory_key: KeyCode::KeyI,
            show_fps: false,
            session: SessionConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_room() {
        let config = AppConfig::default();
        assert_eq!(config.session.probe_threshold, 3.0);
        assert_eq!(config.session.step, 0.1);
        assert_eq!(config.session.notification_duration, Duration::from_secs(2));
        assert_eq!(config.session.movement_mode, MovementMode::Stepped);
        assert_eq!(config.camera.position, Vector3::new(0.0, 1.7, 12.0));
        assert_eq!(config.inventory_key, KeyCode::KeyI);
    }

    #[test]
    fn test_struct_update_overrides_one_field() {
        let config = SessionConfig {
            probe_threshold: 5.0,
            ..Default::default()
        };
        assert_eq!(config.probe_threshold, 5.0);
        assert_eq!(config.damping, 0.9);
    }
}
