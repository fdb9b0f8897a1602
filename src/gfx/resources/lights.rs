//! Point lights
//!
//! The shader declares a fixed array of point lights. A [`LightSet`] mirrors
//! that array on the CPU side; inactive slots contribute nothing.

use crate::gfx::shader::uniforms::MAX_POINT_LIGHTS;

/// A point light with Phong terms and distance attenuation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub active: bool,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            ambient: [0.0, 0.0, 0.0],
            diffuse: [0.0, 0.0, 0.0],
            specular: [0.0, 0.0, 0.0],
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
            active: false,
        }
    }
}

impl PointLight {
    /// Creates an active white light at `position`
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
            active: true,
            ..Default::default()
        }
    }

    /// Builder pattern: Set grey ambient, diffuse and specular intensities
    pub fn with_intensities(mut self, ambient: f32, diffuse: f32, specular: f32) -> Self {
        self.ambient = [ambient; 3];
        self.diffuse = [diffuse; 3];
        self.specular = [specular; 3];
        self
    }

    /// Builder pattern: Set the attenuation coefficients
    pub fn with_attenuation(mut self, constant: f32, linear: f32, quadratic: f32) -> Self {
        self.constant = constant;
        self.linear = linear;
        self.quadratic = quadratic;
        self
    }
}

/// Fixed-size bank of point lights
#[derive(Debug, Clone, Default)]
pub struct LightSet {
    slots: [PointLight; MAX_POINT_LIGHTS],
}

impl LightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the light in `index`, returning `false` if the slot does not exist
    pub fn set(&mut self, index: usize, light: PointLight) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = light;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&PointLight> {
        self.slots.get(index)
    }

    /// All slots with their indices, active or not
    pub fn iter(&self) -> impl Iterator<Item = (usize, &PointLight)> {
        self.slots.iter().enumerate()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|light| light.active).count()
    }
}
