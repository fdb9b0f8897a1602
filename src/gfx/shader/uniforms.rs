//! Named shader uniforms
//!
//! Draw state is addressed by uniform name, the way a GLSL program exposes
//! it. [`UniformSink`] is the seam the shader channel writes through;
//! [`UniformTable`] is the in-memory sink that is later packed into the
//! GPU uniform layouts.

use std::collections::HashMap;

use cgmath::{Matrix4, SquareMatrix};

pub const MODEL: &str = "model";
pub const VIEW: &str = "view";
pub const PROJECTION: &str = "projection";
pub const VIEW_POSITION: &str = "viewPosition";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";
pub const MATERIAL_DIFFUSE: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

/// Number of point light slots the shader declares
pub const MAX_POINT_LIGHTS: usize = 4;

/// Field of a `pointLights[i]` struct in the shader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightField {
    Position,
    Ambient,
    Diffuse,
    Specular,
    Constant,
    Linear,
    Quadratic,
    Active,
}

impl LightField {
    fn as_str(&self) -> &'static str {
        match self {
            LightField::Position => "position",
            LightField::Ambient => "ambient",
            LightField::Diffuse => "diffuse",
            LightField::Specular => "specular",
            LightField::Constant => "constant",
            LightField::Linear => "linear",
            LightField::Quadratic => "quadratic",
            LightField::Active => "bActive",
        }
    }
}

/// Uniform name of one field of point light `index`, e.g. `pointLights[1].linear`
pub fn point_light_uniform(index: usize, field: LightField) -> String {
    format!("pointLights[{index}].{}", field.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Mat4(Matrix4<f32>),
    Vec4([f32; 4]),
    Vec3([f32; 3]),
    Vec2([f32; 2]),
    Float(f32),
    Int(i32),
    Bool(bool),
}

/// Destination for named uniform writes
///
/// Every setter has a default implementation that forwards to [`UniformSink::set`],
/// so a backend only needs to store a [`UniformValue`] under a name.
pub trait UniformSink {
    fn set(&mut self, name: &str, value: UniformValue);

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.set(name, UniformValue::Mat4(value));
    }

    fn set_vec4(&mut self, name: &str, value: [f32; 4]) {
        self.set(name, UniformValue::Vec4(value));
    }

    fn set_vec3(&mut self, name: &str, value: [f32; 3]) {
        self.set(name, UniformValue::Vec3(value));
    }

    fn set_vec2(&mut self, name: &str, value: [f32; 2]) {
        self.set(name, UniformValue::Vec2(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.set(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.set(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.set(name, UniformValue::Bool(value));
    }
}

/// In-memory uniform storage keyed by name.
///
/// Typed getters return `None` when the name is absent or holds a value of a
/// different type.
#[derive(Debug, Clone, Default)]
pub struct UniformTable {
    values: HashMap<String, UniformValue>,
}

impl UniformTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mat4(&self, name: &str) -> Option<Matrix4<f32>> {
        match self.values.get(name)? {
            UniformValue::Mat4(m) => Some(*m),
            _ => None,
        }
    }

    pub fn vec4(&self, name: &str) -> Option<[f32; 4]> {
        match self.values.get(name)? {
            UniformValue::Vec4(v) => Some(*v),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<[f32; 3]> {
        match self.values.get(name)? {
            UniformValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn vec2(&self, name: &str) -> Option<[f32; 2]> {
        match self.values.get(name)? {
            UniformValue::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.values.get(name)? {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.values.get(name)? {
            UniformValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name)? {
            UniformValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub(crate) fn mat4_or_identity(&self, name: &str) -> Matrix4<f32> {
        self.mat4(name).unwrap_or_else(Matrix4::identity)
    }
}

impl UniformSink for UniformTable {
    fn set(&mut self, name: &str, value: UniformValue) {
        // Avoid reallocating the key for names that are rewritten every draw
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.to_owned(), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut table = UniformTable::new();
        table.set_vec2(UV_SCALE, [1.0, 1.0]);
        table.set_vec2(UV_SCALE, [0.3, 0.3]);
        assert_eq!(table.vec2(UV_SCALE), Some([0.3, 0.3]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_typed_getters_reject_mismatched_types() {
        let mut table = UniformTable::new();
        table.set_int(OBJECT_TEXTURE, 3);
        assert_eq!(table.int(OBJECT_TEXTURE), Some(3));
        assert_eq!(table.float(OBJECT_TEXTURE), None);
        assert_eq!(table.bool(USE_TEXTURE), None);
    }

    #[test]
    fn test_point_light_names() {
        assert_eq!(
            point_light_uniform(0, LightField::Position),
            "pointLights[0].position"
        );
        assert_eq!(
            point_light_uniform(3, LightField::Active),
            "pointLights[3].bActive"
        );
    }

    #[test]
    fn test_missing_model_defaults_to_identity() {
        let table = UniformTable::new();
        assert_eq!(table.mat4_or_identity(MODEL), Matrix4::identity());
    }
}
