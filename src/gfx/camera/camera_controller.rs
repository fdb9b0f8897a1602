use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseScrollDelta},
    keyboard::KeyCode,
};

use super::camera_utils::{Projection, ProjectionMode};
use super::fly_camera::{CameraMovement, CameraPreset, FlyCamera};

pub const MIN_SPEED_MULTIPLIER: f32 = 0.1;
pub const MAX_SPEED_MULTIPLIER: f32 = 10.0;

/// Translates window input into fly camera motion
///
/// Movement keys are tracked as held state and applied once per frame in
/// [`CameraController::update`]; everything else takes effect immediately.
pub struct CameraController {
    speed_multiplier: f32,
    last_pointer: Option<(f64, f64)>,
    held: [bool; 6],
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            speed_multiplier: 1.0,
            last_pointer: None,
            held: [false; 6],
        }
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Feeds an absolute pointer position and turns the camera by the offset
    /// from the previous one
    ///
    /// The first sample only records a baseline. Screen y grows downwards, so
    /// the vertical offset is inverted.
    pub fn process_pointer(&mut self, x: f64, y: f64, camera: &mut FlyCamera) {
        let Some((last_x, last_y)) = self.last_pointer.replace((x, y)) else {
            return;
        };
        let x_offset = (x - last_x) as f32;
        let y_offset = (last_y - y) as f32;
        camera.process_mouse_movement(x_offset, y_offset);
    }

    /// Turns the camera by a relative pointer motion
    ///
    /// Used when the cursor is locked and no absolute positions arrive. The
    /// vertical delta is inverted like [`process_pointer`](Self::process_pointer).
    pub fn process_pointer_delta(&mut self, dx: f64, dy: f64, camera: &mut FlyCamera) {
        self.last_pointer = None;
        camera.process_mouse_movement(dx as f32, -dy as f32);
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        let amount = match delta {
            MouseScrollDelta::LineDelta(_, y) => *y as f64,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y,
        };
        if amount > 0.0 {
            self.scroll(true);
        } else if amount < 0.0 {
            self.scroll(false);
        }
    }

    /// Applies one scroll tick to the speed multiplier
    pub fn scroll(&mut self, up: bool) {
        let factor = if up { 1.1 } else { 0.9 };
        self.speed_multiplier =
            (self.speed_multiplier * factor).clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
    }

    /// Handles a key transition, returning `true` if the key is bound
    pub fn process_key(
        &mut self,
        key: KeyCode,
        state: ElementState,
        camera: &mut FlyCamera,
        projection: &mut Projection,
    ) -> bool {
        if let Some(movement) = movement_for(key) {
            self.held[movement as usize] = state == ElementState::Pressed;
            return true;
        }

        if state != ElementState::Pressed {
            return matches!(
                key,
                KeyCode::KeyP
                    | KeyCode::KeyO
                    | KeyCode::Digit1
                    | KeyCode::Digit2
                    | KeyCode::Digit3
                    | KeyCode::Digit4
            );
        }

        match key {
            KeyCode::KeyP => projection.mode = ProjectionMode::Perspective,
            KeyCode::KeyO => projection.mode = ProjectionMode::Orthographic,
            KeyCode::Digit1 => camera.snap_to(&CameraPreset::front()),
            KeyCode::Digit2 => camera.snap_to(&CameraPreset::right_side()),
            KeyCode::Digit3 => camera.snap_to(&CameraPreset::top_down()),
            KeyCode::Digit4 => camera.snap_to(&CameraPreset::left_oblique()),
            _ => return false,
        }
        log::debug!("Camera key {key:?}: projection {:?}", projection.mode);
        true
    }

    /// Moves the camera for every held movement key
    pub fn update(&self, camera: &mut FlyCamera, dt: f32) {
        let scaled = dt * self.speed_multiplier;
        for movement in MOVEMENTS {
            if self.held[movement as usize] {
                camera.process_movement(movement, scaled);
            }
        }
    }
}

const MOVEMENTS: [CameraMovement; 6] = [
    CameraMovement::Forward,
    CameraMovement::Backward,
    CameraMovement::Left,
    CameraMovement::Right,
    CameraMovement::Up,
    CameraMovement::Down,
];

fn movement_for(key: KeyCode) -> Option<CameraMovement> {
    match key {
        KeyCode::KeyW => Some(CameraMovement::Forward),
        KeyCode::KeyS => Some(CameraMovement::Backward),
        KeyCode::KeyA => Some(CameraMovement::Left),
        KeyCode::KeyD => Some(CameraMovement::Right),
        KeyCode::KeyQ => Some(CameraMovement::Up),
        KeyCode::KeyE => Some(CameraMovement::Down),
        _ => None,
    }
}
