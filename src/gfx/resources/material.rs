//! Phong material definitions and their registry
//!
//! Materials are stored once in a [`MaterialRegistry`] and draws reference them
//! by tag. A material only describes how a surface responds to light; the base
//! colour or texture of a draw is staged separately.

use std::collections::HashMap;

use crate::error::RegistryError;

/// Phong reflectance parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub tag: String,
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

impl Material {
    /// Creates a material with a neutral grey response
    ///
    /// # Arguments
    /// * `tag` - Unique name used by draws to reference this material
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            diffuse_color: [0.8, 0.8, 0.8],
            specular_color: [0.0, 0.0, 0.0],
            shininess: 1.0,
        }
    }

    /// Builder pattern: Set diffuse reflectance
    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse_color = [r, g, b];
        self
    }

    /// Builder pattern: Set specular reflectance
    pub fn with_specular(mut self, r: f32, g: f32, b: f32) -> Self {
        self.specular_color = [r, g, b];
        self
    }

    /// Builder pattern: Set the specular exponent
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess.max(0.0);
        self
    }
}

/// Append-only material storage with constant-time lookup by tag
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    index: HashMap<String, usize>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a material to the registry
    ///
    /// Fails with [`RegistryError::DuplicateTag`] if the tag is taken, leaving
    /// the registered material unchanged.
    pub fn register(&mut self, material: Material) -> Result<(), RegistryError> {
        if self.index.contains_key(&material.tag) {
            return Err(RegistryError::DuplicateTag(material.tag));
        }

        log::debug!("Registered material '{}'", material.tag);
        self.index.insert(material.tag.clone(), self.materials.len());
        self.materials.push(material);
        Ok(())
    }

    /// Gets a material by tag
    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.index.get(tag).map(|&i| &self.materials[i])
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Materials in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glass() -> Material {
        Material::new("glass")
            .with_diffuse(0.2, 0.6, 0.2)
            .with_specular(1.0, 1.0, 1.0)
            .with_shininess(128.0)
    }

    #[test]
    fn test_register_and_find() {
        let mut registry = MaterialRegistry::new();
        registry.register(glass()).unwrap();
        registry
            .register(Material::new("floor_material").with_shininess(2.0))
            .unwrap();

        let found = registry.find("glass").unwrap();
        assert_eq!(found.specular_color, [1.0, 1.0, 1.0]);
        assert_eq!(found.shininess, 128.0);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unknown_tag_on_non_empty_registry_is_none() {
        let mut registry = MaterialRegistry::new();
        registry.register(glass()).unwrap();
        assert!(registry.find("velvet").is_none());
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let mut registry = MaterialRegistry::new();
        registry.register(glass()).unwrap();

        let shadow = Material::new("glass").with_shininess(4.0);
        assert!(matches!(
            registry.register(shadow),
            Err(RegistryError::DuplicateTag(tag)) if tag == "glass"
        ));
        assert_eq!(registry.find("glass").unwrap().shininess, 128.0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iteration_keeps_registration_order() {
        let mut registry = MaterialRegistry::new();
        for tag in ["c", "a", "b"] {
            registry.register(Material::new(tag)).unwrap();
        }
        let tags: Vec<_> = registry.iter().map(|m| m.tag.as_str()).collect();
        assert_eq!(tags, ["c", "a", "b"]);
    }
}
