pub mod camera_controller;
pub mod camera_utils;
pub mod fly_camera;

// Re-export main types
pub use camera_controller::CameraController;
pub use camera_utils::{CameraManager, Projection, ProjectionMode, OPENGL_TO_WGPU_MATRIX};
pub use fly_camera::{CameraMovement, CameraPreset, FlyCamera};
