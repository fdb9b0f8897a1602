//! Explicit per-session render state
//!
//! [`RenderContext`] owns everything a frame is assembled from: the resource
//! registries, the light bank, the shader channel with its bound uniform
//! table, and the draw list being recorded. It is created by the frame driver
//! and passed by reference through scene assembly.

use std::collections::HashSet;

use cgmath::{Matrix4, Point3};

use crate::error::ChannelError;
use crate::gfx::geometry::MeshDraw;
use crate::gfx::rendering::draw_list::{DrawCommand, DrawList, GlobalUniform};
use crate::gfx::resources::{LightSet, MaterialRegistry, TextureRegistry};
use crate::gfx::shader::{ShaderChannel, UniformTable};

pub struct RenderContext {
    pub textures: TextureRegistry,
    pub materials: MaterialRegistry,
    pub lights: LightSet,
    pub channel: ShaderChannel<UniformTable>,
    pub draws: DrawList,
    reported: HashSet<String>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    /// Creates an empty context with a uniform table bound to the channel
    pub fn new() -> Self {
        let mut channel = ShaderChannel::new();
        channel.bind(UniformTable::new());

        Self {
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            lights: LightSet::new(),
            channel,
            draws: DrawList::new(),
            reported: HashSet::new(),
        }
    }

    /// Writes every light slot and the lighting switch through the channel
    pub fn apply_lights(&mut self, lighting: bool) {
        self.channel.set_lighting(lighting);
        let lights = self.lights.clone();
        for (index, light) in lights.iter() {
            if let Err(err) = self.channel.set_light(index, light) {
                self.report(err);
            }
        }
    }

    /// Starts recording a new frame as seen from `eye`
    pub fn begin_frame(&mut self, view: Matrix4<f32>, projection: Matrix4<f32>, eye: Point3<f32>) {
        self.draws.clear();
        self.channel.set_view(view, projection, eye);
    }

    /// Records a draw of `mesh` with the currently staged state
    ///
    /// Nothing is recorded while no program is bound.
    pub fn draw(&mut self, label: &str, mesh: MeshDraw) {
        let Some(table) = self.channel.program() else {
            log::debug!("Skipping draw '{label}': no program bound");
            return;
        };
        self.draws.push(DrawCommand::capture(label, mesh, table));
    }

    /// Per-frame uniforms packed from the staged table
    pub fn global_uniform(&self) -> GlobalUniform {
        self.channel
            .program()
            .map(GlobalUniform::from_table)
            .unwrap_or_else(|| GlobalUniform::from_table(&UniformTable::new()))
    }

    /// Forgets every registered texture at shutdown
    ///
    /// Slots are freed, so texture lookups fail until textures are registered
    /// again.
    pub fn release_textures(&mut self) {
        if !self.textures.is_empty() {
            log::info!("Unregistering {} textures", self.textures.len());
        }
        self.textures.clear();
    }

    /// Logs a staging failure, at `warn` the first time and at `debug` after
    pub fn report(&mut self, err: ChannelError) {
        let message = err.to_string();
        if self.reported.insert(message.clone()) {
            log::warn!("{message}; keeping previously staged value");
        } else {
            log::debug!("{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::{DecodedImage, PointLight, TextureSlot};
    use crate::gfx::shader::uniforms;
    use cgmath::SquareMatrix;

    #[test]
    fn test_draw_snapshots_staged_state() {
        let mut ctx = RenderContext::new();
        ctx.channel.set_color([1.0, 0.0, 0.0, 1.0]);
        ctx.draw("first", MeshDraw::Sphere);
        ctx.channel.set_color([0.0, 1.0, 0.0, 1.0]);
        ctx.draw("second", MeshDraw::Sphere);

        let commands = ctx.draws.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].object.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(commands[1].object.color, [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unbound_channel_records_nothing() {
        let mut ctx = RenderContext::new();
        ctx.channel.unbind();
        ctx.draw("ghost", MeshDraw::Box);
        assert!(ctx.draws.is_empty());
    }

    #[test]
    fn test_begin_frame_clears_previous_draws() {
        let mut ctx = RenderContext::new();
        ctx.draw("stale", MeshDraw::Plane);
        ctx.begin_frame(Matrix4::identity(), Matrix4::identity(), Point3::new(1.0, 2.0, 3.0));
        assert!(ctx.draws.is_empty());
        assert_eq!(ctx.global_uniform().view_position, [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_apply_lights() {
        let mut ctx = RenderContext::new();
        ctx.lights.set(0, PointLight::at(0.0, 70.0, 0.0));
        ctx.apply_lights(true);

        let table = ctx.channel.program().unwrap();
        assert_eq!(table.bool(uniforms::USE_LIGHTING), Some(true));
        assert_eq!(table.bool("pointLights[0].bActive"), Some(true));
        assert_eq!(table.bool("pointLights[2].bActive"), Some(false));
        assert_eq!(ctx.global_uniform().lights[0].position, [0.0, 70.0, 0.0]);
    }

    #[test]
    fn test_release_textures_unregisters_every_tag() {
        let mut ctx = RenderContext::new();
        let pixel = || DecodedImage::from_rgba(1, 1, 4, vec![255; 4]);
        ctx.textures.register("Floor", pixel()).unwrap();
        ctx.textures.register("Bottle_label", pixel()).unwrap();
        ctx.channel.set_texture(&ctx.textures, "Floor").unwrap();

        ctx.release_textures();
        assert!(ctx.textures.is_empty());
        assert_eq!(
            ctx.channel.set_texture(&ctx.textures, "Floor"),
            Err(ChannelError::UnknownTexture("Floor".to_string()))
        );
        assert_eq!(ctx.textures.register("Floor", pixel()).unwrap(), TextureSlot(0));
    }
}
