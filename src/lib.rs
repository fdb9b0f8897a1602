// src/lib.rs
//! Still-life viewer
//!
//! A hand-authored 3D still-life built from procedural primitives, rendered
//! with wgpu and explored with a first-person fly camera.
//!
//! The scene is recorded on the CPU through a [`gfx::scene::RenderContext`]
//! and replayed by the [`gfx::RenderEngine`], so everything but the final
//! replay runs without a GPU.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::StillLifeApp;
pub use config::AppConfig;
