//! Per-draw shader state staging
//!
//! [`ShaderChannel`] writes the state of the next draw into the bound program
//! by uniform name. Staged values persist until overwritten, so a draw
//! inherits anything the previous draws set and it did not. With no program
//! bound every setter does nothing.

use cgmath::{Matrix4, Point3};

use super::uniforms::{self, point_light_uniform, LightField, UniformSink, MAX_POINT_LIGHTS};
use crate::error::ChannelError;
use crate::gfx::resources::{MaterialRegistry, PointLight, TextureRegistry};

pub struct ShaderChannel<S: UniformSink> {
    program: Option<S>,
}

impl<S: UniformSink> Default for ShaderChannel<S> {
    fn default() -> Self {
        Self { program: None }
    }
}

impl<S: UniformSink> ShaderChannel<S> {
    /// Creates a channel with no program bound
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `program` the target of subsequent setters, returning the previous one
    pub fn bind(&mut self, program: S) -> Option<S> {
        self.program.replace(program)
    }

    pub fn unbind(&mut self) -> Option<S> {
        self.program.take()
    }

    pub fn is_bound(&self) -> bool {
        self.program.is_some()
    }

    pub fn program(&self) -> Option<&S> {
        self.program.as_ref()
    }

    pub fn set_transform(&mut self, model: &Matrix4<f32>) {
        if let Some(program) = self.program.as_mut() {
            program.set_mat4(uniforms::MODEL, *model);
        }
    }

    /// Stages a flat colour and turns texturing off
    pub fn set_color(&mut self, rgba: [f32; 4]) {
        if let Some(program) = self.program.as_mut() {
            program.set_bool(uniforms::USE_TEXTURE, false);
            program.set_vec4(uniforms::OBJECT_COLOR, rgba);
        }
    }

    /// Stages the slot registered under `tag` and turns texturing on
    ///
    /// An unknown tag writes nothing, so the previously staged surface stays.
    pub fn set_texture(&mut self, textures: &TextureRegistry, tag: &str) -> Result<(), ChannelError> {
        let Some(program) = self.program.as_mut() else {
            return Ok(());
        };
        let slot = textures
            .find_texture_slot(tag)
            .ok_or_else(|| ChannelError::UnknownTexture(tag.to_string()))?;

        program.set_bool(uniforms::USE_TEXTURE, true);
        program.set_int(uniforms::OBJECT_TEXTURE, slot.0 as i32);
        Ok(())
    }

    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        if let Some(program) = self.program.as_mut() {
            program.set_vec2(uniforms::UV_SCALE, [u, v]);
        }
    }

    /// Stages the reflectance of the material registered under `tag`
    ///
    /// An unknown tag writes nothing, so the previously staged material stays.
    pub fn set_material(&mut self, materials: &MaterialRegistry, tag: &str) -> Result<(), ChannelError> {
        let Some(program) = self.program.as_mut() else {
            return Ok(());
        };
        let material = materials
            .find(tag)
            .ok_or_else(|| ChannelError::UnknownMaterial(tag.to_string()))?;

        program.set_vec3(uniforms::MATERIAL_DIFFUSE, material.diffuse_color);
        program.set_vec3(uniforms::MATERIAL_SPECULAR, material.specular_color);
        program.set_float(uniforms::MATERIAL_SHININESS, material.shininess);
        Ok(())
    }

    pub fn set_lighting(&mut self, enabled: bool) {
        if let Some(program) = self.program.as_mut() {
            program.set_bool(uniforms::USE_LIGHTING, enabled);
        }
    }

    pub fn set_light(&mut self, index: usize, light: &PointLight) -> Result<(), ChannelError> {
        if index >= MAX_POINT_LIGHTS {
            return Err(ChannelError::LightSlotOutOfRange(index));
        }
        let Some(program) = self.program.as_mut() else {
            return Ok(());
        };

        let name = |field| point_light_uniform(index, field);
        program.set_vec3(&name(LightField::Position), light.position);
        program.set_vec3(&name(LightField::Ambient), light.ambient);
        program.set_vec3(&name(LightField::Diffuse), light.diffuse);
        program.set_vec3(&name(LightField::Specular), light.specular);
        program.set_float(&name(LightField::Constant), light.constant);
        program.set_float(&name(LightField::Linear), light.linear);
        program.set_float(&name(LightField::Quadratic), light.quadratic);
        program.set_bool(&name(LightField::Active), light.active);
        Ok(())
    }

    /// Stages the per-frame camera uniforms
    pub fn set_view(&mut self, view: Matrix4<f32>, projection: Matrix4<f32>, eye: Point3<f32>) {
        if let Some(program) = self.program.as_mut() {
            program.set_mat4(uniforms::VIEW, view);
            program.set_mat4(uniforms::PROJECTION, projection);
            program.set_vec3(uniforms::VIEW_POSITION, eye.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::{DecodedImage, Material};
    use crate::gfx::shader::uniforms::UniformTable;

    fn textures() -> TextureRegistry {
        let mut registry = TextureRegistry::new();
        for tag in ["Floor", "Door"] {
            registry
                .register(tag, DecodedImage::from_rgba(1, 1, 4, vec![0; 4]))
                .unwrap();
        }
        registry
    }

    fn materials() -> MaterialRegistry {
        let mut registry = MaterialRegistry::new();
        registry
            .register(Material::new("glass").with_diffuse(0.2, 0.6, 0.2).with_shininess(128.0))
            .unwrap();
        registry
            .register(Material::new("floor_material").with_shininess(2.0))
            .unwrap();
        registry
    }

    fn bound() -> ShaderChannel<UniformTable> {
        let mut channel = ShaderChannel::new();
        channel.bind(UniformTable::new());
        channel
    }

    fn table(channel: &ShaderChannel<UniformTable>) -> &UniformTable {
        channel.program().unwrap()
    }

    #[test]
    fn test_unbound_setters_are_no_ops() {
        let mut channel: ShaderChannel<UniformTable> = ShaderChannel::new();
        channel.set_color([1.0, 0.0, 0.0, 1.0]);
        channel.set_uv_scale(2.0, 2.0);
        assert_eq!(channel.set_texture(&textures(), "missing"), Ok(()));
        assert_eq!(channel.set_material(&materials(), "missing"), Ok(()));

        channel.bind(UniformTable::new());
        assert!(table(&channel).is_empty());
    }

    #[test]
    fn test_color_and_texture_are_exclusive() {
        let mut channel = bound();
        let textures = textures();

        channel.set_texture(&textures, "Door").unwrap();
        assert_eq!(table(&channel).bool(uniforms::USE_TEXTURE), Some(true));
        assert_eq!(table(&channel).int(uniforms::OBJECT_TEXTURE), Some(1));

        channel.set_color([0.0, 0.0, 0.0, 1.0]);
        assert_eq!(table(&channel).bool(uniforms::USE_TEXTURE), Some(false));

        channel.set_texture(&textures, "Floor").unwrap();
        assert_eq!(table(&channel).bool(uniforms::USE_TEXTURE), Some(true));
        assert_eq!(table(&channel).int(uniforms::OBJECT_TEXTURE), Some(0));
    }

    #[test]
    fn test_unknown_texture_keeps_staged_surface() {
        let mut channel = bound();
        channel.set_color([0.5, 0.5, 0.5, 1.0]);

        let result = channel.set_texture(&textures(), "Ceiling");
        assert_eq!(result, Err(ChannelError::UnknownTexture("Ceiling".into())));
        assert_eq!(table(&channel).bool(uniforms::USE_TEXTURE), Some(false));
        assert_eq!(table(&channel).int(uniforms::OBJECT_TEXTURE), None);
    }

    #[test]
    fn test_unknown_material_keeps_last_written_material() {
        let mut channel = bound();
        let materials = materials();
        channel.set_material(&materials, "glass").unwrap();

        let result = channel.set_material(&materials, "velvet");
        assert_eq!(result, Err(ChannelError::UnknownMaterial("velvet".into())));
        assert_eq!(table(&channel).float(uniforms::MATERIAL_SHININESS), Some(128.0));
        assert_eq!(
            table(&channel).vec3(uniforms::MATERIAL_DIFFUSE),
            Some([0.2, 0.6, 0.2])
        );
    }

    #[test]
    fn test_light_slots() {
        let mut channel = bound();
        let light = PointLight::at(0.0, 70.0, 0.0).with_attenuation(1.0, 0.075, 0.02);

        channel.set_light(3, &light).unwrap();
        assert_eq!(
            table(&channel).vec3("pointLights[3].position"),
            Some([0.0, 70.0, 0.0])
        );
        assert_eq!(table(&channel).bool("pointLights[3].bActive"), Some(true));
        assert_eq!(
            channel.set_light(4, &light),
            Err(ChannelError::LightSlotOutOfRange(4))
        );
    }

    #[test]
    fn test_view_uniforms() {
        use cgmath::SquareMatrix;

        let mut channel = bound();
        channel.set_view(
            Matrix4::identity(),
            Matrix4::identity(),
            Point3::new(0.0, 15.0, 20.0),
        );
        assert_eq!(
            table(&channel).vec3(uniforms::VIEW_POSITION),
            Some([0.0, 15.0, 20.0])
        );
        assert!(table(&channel).mat4(uniforms::PROJECTION).is_some());
    }
}
