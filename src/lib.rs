// src/lib.rs
//! Roomwalk
//!
//! A first-person room explorer built on wgpu and winit: walk with the
//! keyboard, look with the mouse, and collect the named props you point at.
//!
//! The interaction layer ([`interaction`]) is independent of the window and
//! GPU and can be driven headlessly; [`RoomWalkApp`] wires it to a real window.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod interaction;
pub mod performance;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

pub use app::RoomWalkApp;
pub use error::{Result, RoomError};

/// Creates an app with the default configuration
pub fn default() -> Result<RoomWalkApp> {
    RoomWalkApp::new(config::AppConfig::default())
}
