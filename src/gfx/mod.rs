//! # Graphics Module
//!
//! All graphics functionality of the still-life viewer: camera, procedural
//! geometry, rendering, named resources, scene description and the shader
//! uniform channel.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Fly camera with presets and projection switching
//! - **Geometry** ([`geometry`]) - Procedural primitive meshes with drawable parts
//! - **Rendering Pipeline** ([`rendering`]) - Draw recording and Phong rendering
//! - **Resource Management** ([`resources`]) - Textures, materials and lights by tag
//! - **Scene** ([`scene`]) - Render context and the declarative still-life
//! - **Shader Channel** ([`shader`]) - Named uniforms staged per draw
//!
//! A frame is assembled on the CPU into a [`DrawList`] through the
//! [`RenderContext`], then replayed by the [`RenderEngine`]. Nothing before
//! the replay touches the GPU.
//!
//! [`DrawList`]: rendering::DrawList
//! [`RenderContext`]: scene::RenderContext

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod shader;
pub mod transform;

// Re-export commonly used types
pub use camera::FlyCamera;
pub use rendering::render_engine::RenderEngine;
