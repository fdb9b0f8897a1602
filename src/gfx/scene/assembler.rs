//! Declarative scene description
//!
//! A [`Scene`] is an ordered list of [`SubAssembly`] values, one per physical
//! object, each an ordered list of [`RenderUnit`]s. Rendering a unit composes
//! its transform, stages its appearance through the context's shader channel
//! and records one draw. Appearance state persists between units, so a unit
//! without a material keeps whatever material was staged before it.

use cgmath::Vector3;

use super::context::RenderContext;
use super::still_life::{SceneMaterial, SceneTexture};
use crate::gfx::geometry::MeshDraw;
use crate::gfx::transform::Pose;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// Flat RGBA colour; an alpha below 1 makes the draw translucent
    Color([f32; 4]),
    Texture {
        texture: SceneTexture,
        uv_scale: [f32; 2],
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub surface: Surface,
    pub material: Option<SceneMaterial>,
}

/// One draw of one mesh
#[derive(Debug, Clone, PartialEq)]
pub struct RenderUnit {
    pub label: &'static str,
    pub pose: Pose,
    pub appearance: Appearance,
    pub mesh: MeshDraw,
}

impl RenderUnit {
    pub fn colored(label: &'static str, mesh: MeshDraw, pose: Pose, rgba: [f32; 4]) -> Self {
        Self {
            label,
            pose,
            appearance: Appearance {
                surface: Surface::Color(rgba),
                material: None,
            },
            mesh,
        }
    }

    pub fn textured(
        label: &'static str,
        mesh: MeshDraw,
        pose: Pose,
        texture: SceneTexture,
        uv_scale: [f32; 2],
    ) -> Self {
        Self {
            label,
            pose,
            appearance: Appearance {
                surface: Surface::Texture { texture, uv_scale },
                material: None,
            },
            mesh,
        }
    }

    pub fn with_material(mut self, material: SceneMaterial) -> Self {
        self.appearance.material = Some(material);
        self
    }

    /// Stages this unit offset by `origin` and records its draw
    pub fn render(&self, ctx: &mut RenderContext, origin: Vector3<f32>, group: &str) {
        let model = self.pose.offset(origin).compose();
        ctx.channel.set_transform(&model);

        match self.appearance.surface {
            Surface::Color(rgba) => ctx.channel.set_color(rgba),
            Surface::Texture { texture, uv_scale } => {
                if let Err(err) = ctx.channel.set_texture(&ctx.textures, texture.tag()) {
                    ctx.report(err);
                }
                ctx.channel.set_uv_scale(uv_scale[0], uv_scale[1]);
            }
        }

        if let Some(material) = self.appearance.material {
            if let Err(err) = ctx.channel.set_material(&ctx.materials, material.tag()) {
                ctx.report(err);
            }
        }

        ctx.draw(&format!("{group}/{}", self.label), self.mesh);
    }
}

/// A named group of units sharing an origin offset
#[derive(Debug, Clone, PartialEq)]
pub struct SubAssembly {
    pub name: &'static str,
    pub origin: Vector3<f32>,
    pub units: Vec<RenderUnit>,
}

impl SubAssembly {
    pub fn new(name: &'static str, origin: [f32; 3], units: Vec<RenderUnit>) -> Self {
        Self {
            name,
            origin: origin.into(),
            units,
        }
    }

    /// Returns the same assembly moved to `origin`
    pub fn at(mut self, origin: [f32; 3]) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn render(&self, ctx: &mut RenderContext) {
        for unit in &self.units {
            unit.render(ctx, self.origin, self.name);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub assemblies: Vec<SubAssembly>,
}

impl Scene {
    pub fn new(assemblies: Vec<SubAssembly>) -> Self {
        Self { assemblies }
    }

    pub fn find(&self, name: &str) -> Option<&SubAssembly> {
        self.assemblies.iter().find(|assembly| assembly.name == name)
    }

    /// Total number of draws one frame records
    pub fn unit_count(&self) -> usize {
        self.assemblies.iter().map(|a| a.units.len()).sum()
    }

    /// Records every unit of every assembly, in order
    pub fn render(&self, ctx: &mut RenderContext) {
        for assembly in &self.assemblies {
            assembly.render(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::{DecodedImage, Material};
    use crate::gfx::shader::uniforms;

    fn context() -> RenderContext {
        let mut ctx = RenderContext::new();
        ctx.textures
            .register(
                SceneTexture::Floor.tag(),
                DecodedImage::from_rgba(1, 1, 4, vec![0; 4]),
            )
            .unwrap();
        ctx.materials
            .register(SceneMaterial::Floor.material())
            .unwrap();
        ctx.materials
            .register(Material::new(SceneMaterial::Glass.tag()))
            .unwrap();
        ctx
    }

    #[test]
    fn test_origin_is_added_to_every_unit() {
        let mut ctx = context();
        let assembly = SubAssembly::new(
            "pair",
            [10.0, 0.0, -5.0],
            vec![
                RenderUnit::colored("a", MeshDraw::Box, Pose::new([1.0; 3], [0.0; 3], [0.0, 1.0, 0.0]), [1.0; 4]),
                RenderUnit::colored("b", MeshDraw::Box, Pose::new([1.0; 3], [0.0; 3], [1.0, 0.0, 0.0]), [1.0; 4]),
            ],
        );
        assembly.render(&mut ctx);

        let origins: Vec<_> = ctx
            .draws
            .commands()
            .iter()
            .map(|c| c.object.world_origin())
            .collect();
        assert_eq!(origins[0], cgmath::Point3::new(10.0, 1.0, -5.0));
        assert_eq!(origins[1], cgmath::Point3::new(11.0, 0.0, -5.0));
        assert_eq!(ctx.draws.commands()[1].label, "pair/b");
    }

    #[test]
    fn test_material_persists_to_following_units() {
        let mut ctx = context();
        let pose = Pose::default();
        let assembly = SubAssembly::new(
            "room",
            [0.0; 3],
            vec![
                RenderUnit::textured("floor", MeshDraw::Plane, pose, SceneTexture::Floor, [0.3, 0.3])
                    .with_material(SceneMaterial::Floor),
                RenderUnit::colored("jamb", MeshDraw::Plane, pose, [0.0, 0.0, 0.0, 1.0]),
            ],
        );
        assembly.render(&mut ctx);

        let jamb = &ctx.draws.commands()[1];
        assert_eq!(jamb.object.shininess, 2.0);
        assert!(!jamb.object.textured());
        // UV scale also carries over from the floor
        assert_eq!(jamb.object.uv_scale, [0.3, 0.3]);
    }

    #[test]
    fn test_unregistered_texture_keeps_previous_surface() {
        let mut ctx = context();
        let pose = Pose::default();
        let assembly = SubAssembly::new(
            "wall",
            [0.0; 3],
            vec![
                RenderUnit::colored("trim", MeshDraw::Plane, pose, [0.5, 0.5, 0.5, 1.0]),
                RenderUnit::textured("wall", MeshDraw::Plane, pose, SceneTexture::Wall, [1.0, 1.0]),
            ],
        );
        assembly.render(&mut ctx);

        let wall = &ctx.draws.commands()[1];
        assert_eq!(ctx.draws.len(), 2);
        assert!(!wall.object.textured());
        assert_eq!(wall.object.color, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(
            ctx.channel.program().unwrap().vec2(uniforms::UV_SCALE),
            Some([1.0, 1.0])
        );
    }

    #[test]
    fn test_scene_lookup_and_counts() {
        let scene = Scene::new(vec![
            SubAssembly::new("one", [0.0; 3], vec![]),
            SubAssembly::new(
                "two",
                [0.0; 3],
                vec![RenderUnit::colored("x", MeshDraw::Sphere, Pose::default(), [1.0; 4])],
            ),
        ]);
        assert_eq!(scene.unit_count(), 1);
        assert!(scene.find("two").is_some());
        assert!(scene.find("three").is_none());
    }
}
