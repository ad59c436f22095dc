//! Error types for the room walker.
//!
//! Interaction and ray casting are total and never fail; errors only come from
//! asset loading and from bringing up the window and GPU.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("failed to load model '{path}': {source}")]
    ModelLoad {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("model '{0}' contains no meshes")]
    EmptyModel(String),

    #[error("failed to load image '{path}': {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("shader '{0}' has not been loaded")]
    MissingShader(String),

    #[error("event loop already consumed")]
    AlreadyRunning,
}

pub type Result<T> = std::result::Result<T, RoomError>;
