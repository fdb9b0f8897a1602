use cgmath::{ortho, perspective, Deg, Matrix4, Point3};
use winit::{
    event::{ElementState, MouseScrollDelta},
    keyboard::KeyCode,
};

use super::{camera_controller::CameraController, fly_camera::FlyCamera};
use crate::config::CameraConfig;

/// Camera, input controller and projection of one window
pub struct CameraManager {
    pub camera: FlyCamera,
    pub controller: CameraController,
    pub projection: Projection,
}

impl CameraManager {
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        Self {
            camera: FlyCamera::new(config),
            controller: CameraController::new(),
            projection: Projection::new(width, height, config),
        }
    }

    pub fn process_pointer(&mut self, x: f64, y: f64) {
        self.controller.process_pointer(x, y, &mut self.camera);
    }

    pub fn process_pointer_delta(&mut self, dx: f64, dy: f64) {
        self.controller.process_pointer_delta(dx, dy, &mut self.camera);
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        self.controller.process_scroll(delta);
    }

    pub fn process_key(&mut self, key: KeyCode, state: ElementState) -> bool {
        self.controller
            .process_key(key, state, &mut self.camera, &mut self.projection)
    }

    /// Applies held movement keys for a frame lasting `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.controller.update(&mut self.camera, dt);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.camera.view_matrix()
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection.matrix(self.camera.zoom)
    }

    pub fn eye(&self) -> Point3<f32> {
        self.camera.position
    }
}

/// Maps OpenGL clip space depth (-1..1) to wgpu's (0..1)
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

/// Projection parameters that do not depend on the camera pose
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub mode: ProjectionMode,
    pub width: u32,
    pub height: u32,
    pub znear: f32,
    pub zfar: f32,
    /// Half of the horizontal extent of the orthographic view volume
    pub ortho_half_extent: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, config: &CameraConfig) -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            width: width.max(1),
            height: height.max(1),
            znear: config.znear,
            zfar: config.zfar,
            ortho_half_extent: config.ortho_half_extent,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Projection matrix in wgpu clip space
    ///
    /// `fov_degrees` is only used in perspective mode. The orthographic volume
    /// keeps its horizontal half-extent and scales the vertical one by the
    /// window's height to width ratio.
    pub fn matrix(&self, fov_degrees: f32) -> Matrix4<f32> {
        let projection = match self.mode {
            ProjectionMode::Perspective => {
                perspective(Deg(fov_degrees), self.aspect(), self.znear, self.zfar)
            }
            ProjectionMode::Orthographic => {
                let half_width = self.ortho_half_extent;
                let half_height = half_width / self.aspect();
                ortho(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.znear,
                    self.zfar,
                )
            }
        };
        OPENGL_TO_WGPU_MATRIX * projection
    }
}
