//! # Scene Module
//!
//! Describes the still-life and records it into draws each frame.
//!
//! ## Key Components
//!
//! - [`RenderContext`] - Registries, lights, shader channel and draw list of one session
//! - [`Scene`] / [`SubAssembly`] / [`RenderUnit`] - Declarative scene description
//! - [`still_life`] - The concrete scene: assets, materials, lights and layout
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use still_life::gfx::scene::{still_life as scene_data, RenderContext};
//!
//! let mut ctx = RenderContext::new();
//! scene_data::prepare(&mut ctx, Path::new("textures"));
//! let scene = scene_data::build_scene();
//! scene.render(&mut ctx);
//! ```

pub mod assembler;
pub mod context;
pub mod still_life;

// Re-export main types
pub use assembler::{Appearance, RenderUnit, Scene, SubAssembly, Surface};
pub use context::RenderContext;
pub use still_life::{SceneMaterial, SceneTexture};
