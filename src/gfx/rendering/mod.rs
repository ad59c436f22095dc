// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles the render pipeline, depth buffer and frame submission.

pub mod pipeline_manager;
pub mod render_engine;

pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
