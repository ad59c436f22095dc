//! # User Interface Module
//!
//! Dear ImGui overlay drawn on top of the room.
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu
//! - [`images`] - catalog pictures uploaded as ImGui textures
//! - [`panel`] - the HUD: crosshair, play prompt, notification and inventory
//!
//! The HUD reads the interaction [`Session`](crate::interaction::Session)
//! but never mutates it; all gameplay input goes through the app.

pub mod images;
pub mod manager;
pub mod panel;

pub use images::{UiImage, UiImages};
pub use manager::UiManager;
pub use panel::hud;
