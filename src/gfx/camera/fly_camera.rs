//! First-person fly camera
//!
//! Orientation is stored as yaw and pitch in degrees; `front`, `right` and
//! `up` are derived from them whenever the pointer moves. Presets may set the
//! basis directly, in which case yaw and pitch are re-derived from `front` so
//! the next pointer move continues from the preset view.

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Vector3};

use crate::config::CameraConfig;

/// Pitch limit in degrees, keeping `front` away from `world_up`
pub const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// A snap-to viewpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPreset {
    pub position: Point3<f32>,
    pub front: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl CameraPreset {
    /// Straight on from the front, facing -Z
    pub fn front() -> Self {
        Self {
            position: Point3::new(0.0, 5.0, 25.0),
            front: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::unit_y(),
        }
    }

    /// From the right side, facing -X
    pub fn right_side() -> Self {
        Self {
            position: Point3::new(25.0, 5.0, 0.0),
            front: Vector3::new(-1.0, 0.0, 0.0),
            up: Vector3::unit_y(),
        }
    }

    /// Looking straight down with -Z as screen up
    pub fn top_down() -> Self {
        Self {
            position: Point3::new(0.0, 30.0, 0.01),
            front: Vector3::new(0.0, -1.0, 0.0),
            up: Vector3::new(0.0, 0.0, -1.0),
        }
    }

    /// Raised view from the front-left corner
    pub fn left_oblique() -> Self {
        Self {
            position: Point3::new(-20.0, 8.0, 20.0),
            front: Vector3::new(1.0, -0.3, -1.0).normalize(),
            up: Vector3::unit_y(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Point3<f32>,
    pub front: Vector3<f32>,
    pub up: Vector3<f32>,
    pub right: Vector3<f32>,
    pub world_up: Vector3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
}

impl FlyCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let mut camera = Self {
            position: config.position,
            front: -Vector3::unit_z(),
            up: config.world_up,
            right: Vector3::unit_x(),
            world_up: config.world_up,
            yaw: -90.0,
            pitch: 0.0,
            zoom: config.zoom,
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
        };
        camera.look_along(config.front, config.world_up);
        camera
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Turns the camera by a pointer offset; positive `y_offset` looks up
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch = (self.pitch + y_offset * self.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_camera_vectors();
    }

    /// Moves `movement_speed * dt` along one of the camera's local axes
    pub fn process_movement(&mut self, direction: CameraMovement, dt: f32) {
        let velocity = self.movement_speed * dt;
        let offset = match direction {
            CameraMovement::Forward => self.front,
            CameraMovement::Backward => -self.front,
            CameraMovement::Left => -self.right,
            CameraMovement::Right => self.right,
            CameraMovement::Up => self.up,
            CameraMovement::Down => -self.up,
        };
        self.position += offset * velocity;
    }

    pub fn snap_to(&mut self, preset: &CameraPreset) {
        self.position = preset.position;
        self.look_along(preset.front, preset.up);
    }

    /// Sets the basis from an explicit direction and up vector
    fn look_along(&mut self, front: Vector3<f32>, up: Vector3<f32>) {
        let front = front.normalize();
        self.front = front;
        self.up = up.normalize();
        self.right = front.cross(self.up).normalize();

        self.yaw = Deg::from(cgmath::Rad(front.z.atan2(front.x))).0;
        self.pitch = Deg::from(cgmath::Rad(front.y.clamp(-1.0, 1.0).asin()))
            .0
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    fn update_camera_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();

        self.front = Vector3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-4
    }

    #[test]
    fn test_initial_orientation_follows_config() {
        let camera = FlyCamera::new(&CameraConfig::default());
        assert!(close(camera.front, Vector3::new(0.0, -0.5, -2.0).normalize()));
        assert!((camera.yaw + 90.0).abs() < 1e-3);
        assert!(camera.pitch < 0.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FlyCamera::new(&CameraConfig::default());
        camera.process_mouse_movement(0.0, 10_000.0);
        assert_eq!(camera.pitch, PITCH_LIMIT);
        camera.process_mouse_movement(0.0, -100_000.0);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
        assert!(camera.front.y > -1.0);
    }

    #[test]
    fn test_basis_stays_orthonormal() {
        let mut camera = FlyCamera::new(&CameraConfig::default());
        camera.process_mouse_movement(123.0, -45.0);
        assert!((camera.front.magnitude() - 1.0).abs() < 1e-5);
        assert!(camera.front.dot(camera.right).abs() < 1e-5);
        assert!(camera.front.dot(camera.up).abs() < 1e-5);
        assert!(camera.right.y.abs() < 1e-5);
    }

    #[test]
    fn test_movement_along_local_axes() {
        let mut camera = FlyCamera::new(&CameraConfig::default());
        camera.snap_to(&CameraPreset::front());

        camera.process_movement(CameraMovement::Forward, 0.5);
        assert!(close(camera.position.to_homogeneous().truncate(), Vector3::new(0.0, 5.0, 15.0)));

        camera.process_movement(CameraMovement::Right, 0.1);
        assert!((camera.position.x - 2.0).abs() < 1e-4);

        camera.process_movement(CameraMovement::Down, 0.1);
        assert!((camera.position.y - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_top_down_preset_keeps_explicit_up() {
        let mut camera = FlyCamera::new(&CameraConfig::default());
        camera.snap_to(&CameraPreset::top_down());
        assert!(close(camera.front, Vector3::new(0.0, -1.0, 0.0)));
        assert!(close(camera.up, Vector3::new(0.0, 0.0, -1.0)));
        assert_eq!(camera.pitch, -PITCH_LIMIT);

        let view = camera.view_matrix();
        let m: &[f32; 16] = view.as_ref();
        assert!(m.iter().all(|v| v.is_finite()));
    }
}
