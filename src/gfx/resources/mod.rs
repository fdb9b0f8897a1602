// src/gfx/resources/mod.rs
//! Named resources and their GPU counterparts
//!
//! Textures and materials are registered under string tags and looked up by
//! draws. Lights live in a fixed bank mirrored by the shader.

pub mod lights;
pub mod material;
pub mod texture_registry;
pub mod texture_resource;

// Re-export main types
pub use lights::{LightSet, PointLight};
pub use material::{Material, MaterialRegistry};
pub use texture_registry::{DecodedImage, TextureRegistry, TextureSlot, MAX_TEXTURE_SLOTS};
pub use texture_resource::{GpuTextures, TextureResource};
