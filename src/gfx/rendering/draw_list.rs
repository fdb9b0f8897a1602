//! Frame draw recording
//!
//! Issuing a draw snapshots the staged uniform table into a [`DrawCommand`].
//! The render engine replays the frame's [`DrawList`] with opaque draws in
//! authored order followed by translucent draws sorted back-to-front.

use cgmath::{InnerSpace, Matrix, Matrix4, Point3, SquareMatrix};

use crate::gfx::geometry::MeshDraw;
use crate::gfx::resources::TextureSlot;
use crate::gfx::shader::uniforms::{self, point_light_uniform, LightField, MAX_POINT_LIGHTS};
use crate::gfx::shader::UniformTable;

/// Per-draw uniform block, bound with a dynamic offset
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, for transforming normals
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub use_lighting: u32,
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    _padding: f32,
}

impl ObjectUniform {
    /// Packs the object-level uniforms staged in `table`
    ///
    /// Names that were never written pack as zero or false, except `model`
    /// which defaults to identity.
    pub fn from_table(table: &UniformTable) -> Self {
        let model = table.mat4_or_identity(uniforms::MODEL);
        let normal_matrix = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);

        Self {
            model: model.into(),
            normal_matrix: normal_matrix.into(),
            color: table.vec4(uniforms::OBJECT_COLOR).unwrap_or_default(),
            uv_scale: table.vec2(uniforms::UV_SCALE).unwrap_or_default(),
            use_texture: table.bool(uniforms::USE_TEXTURE).unwrap_or(false) as u32,
            use_lighting: table.bool(uniforms::USE_LIGHTING).unwrap_or(false) as u32,
            diffuse_color: table.vec3(uniforms::MATERIAL_DIFFUSE).unwrap_or_default(),
            shininess: table.float(uniforms::MATERIAL_SHININESS).unwrap_or_default(),
            specular_color: table.vec3(uniforms::MATERIAL_SPECULAR).unwrap_or_default(),
            _padding: 0.0,
        }
    }

    pub fn textured(&self) -> bool {
        self.use_texture != 0
    }

    /// World-space position of the mesh origin
    pub fn world_origin(&self) -> Point3<f32> {
        let translation = self.model[3];
        Point3::new(translation[0], translation[1], translation[2])
    }
}

/// One point light slot in GPU layout
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub constant: f32,
    pub ambient: [f32; 3],
    pub linear: f32,
    pub diffuse: [f32; 3],
    pub quadratic: f32,
    pub specular: [f32; 3],
    pub active: u32,
}

/// Per-frame uniform block shared by every draw
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    pub lights: [LightUniform; MAX_POINT_LIGHTS],
}

impl GlobalUniform {
    pub fn from_table(table: &UniformTable) -> Self {
        let mut lights = [LightUniform::default(); MAX_POINT_LIGHTS];
        for (index, light) in lights.iter_mut().enumerate() {
            let name = |field| point_light_uniform(index, field);
            *light = LightUniform {
                position: table.vec3(&name(LightField::Position)).unwrap_or_default(),
                constant: table.float(&name(LightField::Constant)).unwrap_or_default(),
                ambient: table.vec3(&name(LightField::Ambient)).unwrap_or_default(),
                linear: table.float(&name(LightField::Linear)).unwrap_or_default(),
                diffuse: table.vec3(&name(LightField::Diffuse)).unwrap_or_default(),
                quadratic: table.float(&name(LightField::Quadratic)).unwrap_or_default(),
                specular: table.vec3(&name(LightField::Specular)).unwrap_or_default(),
                active: table.bool(&name(LightField::Active)).unwrap_or(false) as u32,
            };
        }

        let eye = table.vec3(uniforms::VIEW_POSITION).unwrap_or_default();
        Self {
            view: table.mat4_or_identity(uniforms::VIEW).into(),
            projection: table.mat4_or_identity(uniforms::PROJECTION).into(),
            view_position: [eye[0], eye[1], eye[2], 1.0],
            lights,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub label: String,
    pub mesh: MeshDraw,
    pub object: ObjectUniform,
    pub texture_slot: Option<TextureSlot>,
    pub translucent: bool,
}

impl DrawCommand {
    /// Snapshots the staged state in `table` for a draw of `mesh`
    pub fn capture(label: &str, mesh: MeshDraw, table: &UniformTable) -> Self {
        let object = ObjectUniform::from_table(table);
        let texture_slot = object
            .textured()
            .then(|| table.int(uniforms::OBJECT_TEXTURE))
            .flatten()
            .and_then(|slot| u32::try_from(slot).ok())
            .map(TextureSlot);
        let translucent = !object.textured() && object.color[3] < 1.0;

        Self {
            label: label.to_string(),
            mesh,
            object,
            texture_slot,
            translucent,
        }
    }
}

/// Draws recorded for one frame
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in the order they were recorded
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands in submission order as seen from `eye`
    ///
    /// Opaque draws keep their recorded order. Translucent draws follow, the
    /// farthest first; ties keep recorded order.
    pub fn ordered(&self, eye: Point3<f32>) -> Vec<&DrawCommand> {
        let (mut ordered, mut translucent): (Vec<_>, Vec<_>) =
            self.commands.iter().partition(|command| !command.translucent);

        let distance = |command: &DrawCommand| (command.object.world_origin() - eye).magnitude2();
        translucent.sort_by(|a, b| distance(b).total_cmp(&distance(a)));

        ordered.extend(translucent);
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::shader::UniformSink;
    use cgmath::Vector3;

    fn table_at(position: [f32; 3], color: [f32; 4]) -> UniformTable {
        let mut table = UniformTable::new();
        table.set_mat4(uniforms::MODEL, Matrix4::from_translation(Vector3::from(position)));
        table.set_bool(uniforms::USE_TEXTURE, false);
        table.set_vec4(uniforms::OBJECT_COLOR, color);
        table
    }

    #[test]
    fn test_uniform_sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<ObjectUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<LightUniform>(), 64);
        assert_eq!(std::mem::size_of::<GlobalUniform>() % 16, 0);
    }

    #[test]
    fn test_capture_packs_staged_values() {
        let mut table = table_at([1.0, 2.0, 3.0], [0.94, 0.67, 0.83, 0.3]);
        table.set_vec2(uniforms::UV_SCALE, [1.0, 0.2]);
        table.set_float(uniforms::MATERIAL_SHININESS, 5.0);

        let command = DrawCommand::capture("band", MeshDraw::Sphere, &table);
        assert_eq!(command.object.uv_scale, [1.0, 0.2]);
        assert_eq!(command.object.shininess, 5.0);
        assert_eq!(command.object.world_origin(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(command.texture_slot, None);
        assert!(command.translucent);
    }

    #[test]
    fn test_textured_draw_is_never_translucent() {
        let mut table = table_at([0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0]);
        table.set_bool(uniforms::USE_TEXTURE, true);
        table.set_int(uniforms::OBJECT_TEXTURE, 6);

        let command = DrawCommand::capture("door", MeshDraw::Plane, &table);
        assert_eq!(command.texture_slot, Some(TextureSlot(6)));
        assert!(!command.translucent);
    }

    #[test]
    fn test_translucent_draws_sorted_back_to_front_after_opaque() {
        let mut list = DrawList::new();
        let opaque = [1.0, 1.0, 1.0, 1.0];
        let glass = [0.16, 0.26, 0.10, 0.9];

        list.push(DrawCommand::capture("near glass", MeshDraw::Torus, &table_at([0.0, 0.0, 1.0], glass)));
        list.push(DrawCommand::capture("floor", MeshDraw::Plane, &table_at([0.0, 0.0, 0.0], opaque)));
        list.push(DrawCommand::capture("far glass", MeshDraw::Torus, &table_at([0.0, 0.0, -9.0], glass)));
        list.push(DrawCommand::capture("wall", MeshDraw::Plane, &table_at([0.0, 5.0, -50.0], opaque)));

        let labels: Vec<_> = list
            .ordered(Point3::new(0.0, 0.0, 10.0))
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, ["floor", "wall", "far glass", "near glass"]);

        // Moving the eye behind the objects flips the translucent order
        let labels: Vec<_> = list
            .ordered(Point3::new(0.0, 0.0, -30.0))
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, ["floor", "wall", "near glass", "far glass"]);
    }

    #[test]
    fn test_global_uniform_packs_lights() {
        let mut table = UniformTable::new();
        table.set_vec3("pointLights[1].position", [0.0, 2.0, 30.0]);
        table.set_float("pointLights[1].quadratic", 0.03);
        table.set_bool("pointLights[1].bActive", true);
        table.set_vec3(uniforms::VIEW_POSITION, [0.0, 15.0, 20.0]);

        let global = GlobalUniform::from_table(&table);
        assert_eq!(global.lights[1].position, [0.0, 2.0, 30.0]);
        assert_eq!(global.lights[1].quadratic, 0.03);
        assert_eq!(global.lights[1].active, 1);
        assert_eq!(global.lights[0].active, 0);
        assert_eq!(global.view_position, [0.0, 15.0, 20.0, 1.0]);
    }

    #[test]
    fn test_shader_light_struct_matches_uniform_layout() {
        let shader = include_str!("scene.wgsl");
        let start = shader.find("struct PointLight {").unwrap();
        let body = &shader[start..];
        let body = &body[body.find('{').unwrap() + 1..body.find('}').unwrap()];
        let fields: Vec<&str> = body
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(name, _)| name.trim())
            .collect();
        assert_eq!(
            fields,
            ["position", "constant", "ambient", "linear", "diffuse", "quadratic", "specular", "active"]
        );

        let formula: String = shader.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(formula.contains(
            "1.0 / (light.constant + light.linear * distance + light.quadratic * distance * distance)"
        ));
    }
}
