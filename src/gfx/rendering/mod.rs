// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles draw recording, render pipelines, GPU mesh buffers and frame
//! rendering.

pub mod draw_list;
pub mod mesh_buffers;
pub mod pipeline_manager;
pub mod render_engine;
pub mod vertex;

// Re-export main types
pub use draw_list::{DrawCommand, DrawList, GlobalUniform, LightUniform, ObjectUniform};
pub use mesh_buffers::{DrawMesh, GpuMesh, MeshLibrary};
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
pub use vertex::Vertex3D;
