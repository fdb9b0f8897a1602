//! Model transform composition
//!
//! Every draw positions its mesh from independent scale, rotation and
//! position parameters. The composition order is fixed:
//! `Translation * RotationZ * RotationY * RotationX * Scale`, so a vertex is
//! scaled first, then rotated about X, Y and Z, and finally translated.

use cgmath::{Deg, Matrix4, Vector3};

/// Scale, rotation (degrees) and position of a single draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub scale: Vector3<f32>,
    pub rotation_degrees: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_degrees: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

impl Pose {
    pub fn new(scale: [f32; 3], rotation_degrees: [f32; 3], position: [f32; 3]) -> Self {
        Self {
            scale: scale.into(),
            rotation_degrees: rotation_degrees.into(),
            position: position.into(),
        }
    }

    /// Returns the same pose moved by `origin`
    pub fn offset(&self, origin: Vector3<f32>) -> Self {
        Self {
            position: self.position + origin,
            ..*self
        }
    }

    pub fn compose(&self) -> Matrix4<f32> {
        compose_transform(
            self.scale,
            self.rotation_degrees.x,
            self.rotation_degrees.y,
            self.rotation_degrees.z,
            self.position,
        )
    }
}

pub fn compose_transform(
    scale: Vector3<f32>,
    rotation_x_degrees: f32,
    rotation_y_degrees: f32,
    rotation_z_degrees: f32,
    position: Vector3<f32>,
) -> Matrix4<f32> {
    let scale = Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
    let rotation_x = Matrix4::from_angle_x(Deg(rotation_x_degrees));
    let rotation_y = Matrix4::from_angle_y(Deg(rotation_y_degrees));
    let rotation_z = Matrix4::from_angle_z(Deg(rotation_z_degrees));
    let translation = Matrix4::from_translation(position);

    translation * rotation_z * rotation_y * rotation_x * scale
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use cgmath::{Vector4, Zero};

    pub(crate) fn matrices_close(a: &Matrix4<f32>, b: &Matrix4<f32>) -> bool {
        let a: &[f32; 16] = a.as_ref();
        let b: &[f32; 16] = b.as_ref();
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn test_identity_pose_is_pure_translation() {
        let position = Vector3::new(3.0, -2.5, 7.25);
        let matrix = compose_transform(Vector3::new(1.0, 1.0, 1.0), 0.0, 0.0, 0.0, position);
        assert!(matrices_close(&matrix, &Matrix4::from_translation(position)));
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let pose = Pose::new([2.0, 3.0, 4.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let corner = pose.compose() * Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert!((corner.x - 3.0).abs() < 1e-5);
        assert!((corner.y - 4.0).abs() < 1e-5);
        assert!((corner.z - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let scale = Vector3::new(1.0, 1.0, 1.0);
        let composed = compose_transform(scale, 30.0, 45.0, 60.0, Vector3::zero());

        let expected = Matrix4::from_angle_z(Deg(60.0))
            * Matrix4::from_angle_y(Deg(45.0))
            * Matrix4::from_angle_x(Deg(30.0));
        assert!(matrices_close(&composed, &expected));

        let reordered = Matrix4::from_angle_x(Deg(30.0))
            * Matrix4::from_angle_y(Deg(45.0))
            * Matrix4::from_angle_z(Deg(60.0));
        assert!(!matrices_close(&composed, &reordered));
    }

    #[test]
    fn test_offset_is_additive() {
        let pose = Pose::new([6.0, 1.0, 6.0], [0.0, -15.0, 0.0], [0.0, 0.5, 0.0]);
        let moved = pose.offset(Vector3::new(9.0, 0.001, -4.0));
        assert_eq!(moved.scale, pose.scale);
        assert_eq!(moved.rotation_degrees, pose.rotation_degrees);
        assert!((moved.position.x - 9.0).abs() < 1e-6);
        assert!((moved.position.y - 0.501).abs() < 1e-6);
        assert!((moved.position.z + 4.0).abs() < 1e-6);
    }
}
