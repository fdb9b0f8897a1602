//! Error types shared across the crate
//!
//! Registry failures happen while assets are prepared, channel failures while a
//! frame is being assembled, and render failures while the window and GPU
//! context are created. Only the last kind is fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while registering textures or materials.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("could not decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("texture '{tag}' has {channels} color channels, only 3 or 4 are supported")]
    UnsupportedChannels { tag: String, channels: u8 },

    #[error("cannot register texture '{tag}': all {limit} texture slots are in use")]
    SlotsExhausted { tag: String, limit: usize },

    #[error("tag '{0}' is already registered")]
    DuplicateTag(String),
}

/// Failures while staging per-draw state into the shader channel.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("no texture registered under tag '{0}'")]
    UnknownTexture(String),

    #[error("no material registered under tag '{0}'")]
    UnknownMaterial(String),

    #[error("light slot {0} is out of range")]
    LightSlotOutOfRange(usize),
}

/// Failures while creating the window or the GPU context.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create window: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to acquire graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
