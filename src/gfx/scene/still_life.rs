//! The still-life scene
//!
//! Six objects on a wooden floor in the corner of a room: a pacifier, a cup,
//! a bottle, a jam jar and a lotion bottle. Every literal below was matched
//! by eye against the reference photograph.

use std::path::Path;

use super::assembler::{RenderUnit, Scene, SubAssembly};
use super::context::RenderContext;
use crate::error::RegistryError;
use crate::gfx::geometry::{BoxFace, CylinderParts, MeshDraw};
use crate::gfx::resources::{Material, PointLight};
use crate::gfx::transform::Pose;

/// Every texture the scene references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneTexture {
    Floor,
    YellowRubber,
    BottleLabel,
    MetalWrap,
    BluePastel,
    MetalRibbon,
    Door,
    Trim1,
    Trim2,
    Wall,
    Jam,
    Jam2,
    NutritionFacts,
}

impl SceneTexture {
    pub const ALL: [SceneTexture; 13] = [
        SceneTexture::Floor,
        SceneTexture::YellowRubber,
        SceneTexture::BottleLabel,
        SceneTexture::MetalWrap,
        SceneTexture::BluePastel,
        SceneTexture::MetalRibbon,
        SceneTexture::Door,
        SceneTexture::Trim1,
        SceneTexture::Trim2,
        SceneTexture::Wall,
        SceneTexture::Jam,
        SceneTexture::Jam2,
        SceneTexture::NutritionFacts,
    ];

    /// Registry tag
    pub fn tag(&self) -> &'static str {
        match self {
            SceneTexture::Floor => "Floor",
            SceneTexture::YellowRubber => "Yellow_rubber",
            SceneTexture::BottleLabel => "Bottle_label",
            SceneTexture::MetalWrap => "Metal_wrap",
            SceneTexture::BluePastel => "Blue_pastel",
            SceneTexture::MetalRibbon => "Metal_Ribbon",
            SceneTexture::Door => "Door",
            SceneTexture::Trim1 => "Trim1",
            SceneTexture::Trim2 => "Trim2",
            SceneTexture::Wall => "Wall",
            SceneTexture::Jam => "Jam",
            SceneTexture::Jam2 => "Jam_2",
            SceneTexture::NutritionFacts => "Nutrition_facts",
        }
    }

    /// Image file inside the asset directory
    pub fn file_name(&self) -> &'static str {
        match self {
            SceneTexture::Floor => "wood-floor.jpg",
            SceneTexture::YellowRubber => "Mustard_Yellow_Rubber.jpg",
            SceneTexture::BottleLabel => "Martinellis_Label.jpg",
            SceneTexture::MetalWrap => "Aluminium_Foil.jpg",
            SceneTexture::BluePastel => "Cup_Blue_Pastel.jpg",
            SceneTexture::MetalRibbon => "Metal_Ribbon.jpg",
            SceneTexture::Door => "Door.png",
            SceneTexture::Trim1 => "Wood_trim_1.jpg",
            SceneTexture::Trim2 => "Wood_trim_2.jpg",
            SceneTexture::Wall => "Wall_texture.jpg",
            SceneTexture::Jam => "Jam_lable.png",
            SceneTexture::Jam2 => "Jam_lable_2.png",
            SceneTexture::NutritionFacts => "Nutrition_Label.png",
        }
    }
}

/// Every material the scene references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneMaterial {
    Pacifier,
    Floor,
    Glass,
    MetalLid,
    PlasticBottle,
    BrownGlass,
}

impl SceneMaterial {
    pub const ALL: [SceneMaterial; 6] = [
        SceneMaterial::Pacifier,
        SceneMaterial::Floor,
        SceneMaterial::Glass,
        SceneMaterial::MetalLid,
        SceneMaterial::PlasticBottle,
        SceneMaterial::BrownGlass,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            SceneMaterial::Pacifier => "pacifier_material",
            SceneMaterial::Floor => "floor_material",
            SceneMaterial::Glass => "glass",
            SceneMaterial::MetalLid => "metal_lid_material",
            SceneMaterial::PlasticBottle => "plastic_bottle_material",
            SceneMaterial::BrownGlass => "brown_glass_material",
        }
    }

    pub fn material(&self) -> Material {
        let material = Material::new(self.tag());
        match self {
            SceneMaterial::Pacifier => material
                .with_diffuse(1.0, 0.85, 0.2)
                .with_specular(0.8, 0.7, 0.3)
                .with_shininess(32.0),
            SceneMaterial::Floor => material
                .with_diffuse(0.7, 0.7, 0.7)
                .with_specular(0.3, 0.3, 0.3)
                .with_shininess(2.0),
            SceneMaterial::Glass => material
                .with_diffuse(0.2, 0.6, 0.2)
                .with_specular(1.0, 1.0, 1.0)
                .with_shininess(128.0),
            SceneMaterial::MetalLid => material
                .with_diffuse(0.1, 0.3, 0.1)
                .with_specular(0.5, 0.5, 0.5)
                .with_shininess(64.0),
            SceneMaterial::PlasticBottle => material
                .with_diffuse(0.95, 0.85, 0.9)
                .with_specular(0.4, 0.4, 0.4)
                .with_shininess(5.0),
            SceneMaterial::BrownGlass => material
                .with_diffuse(0.5, 0.3, 0.1)
                .with_specular(0.3, 0.3, 0.3)
                .with_shininess(128.0),
        }
    }
}

/// Overhead room light and a softer fill light in front of the scene
pub fn scene_lights() -> [PointLight; 2] {
    [
        PointLight::at(0.0, 70.0, 0.0)
            .with_intensities(0.35, 0.65, 0.35)
            .with_attenuation(1.0, 0.075, 0.02),
        PointLight::at(0.0, 2.0, 30.0)
            .with_intensities(0.2, 0.5, 0.25)
            .with_attenuation(1.0, 0.1, 0.03),
    ]
}

/// Outcome of [`prepare`]
#[derive(Debug, Default)]
pub struct PrepareReport {
    pub textures_loaded: usize,
    pub texture_failures: Vec<RegistryError>,
}

/// Registers textures, materials and lights into `ctx`
///
/// Textures that fail to load are logged and skipped; draws referencing them
/// keep whatever surface was staged before.
pub fn prepare(ctx: &mut RenderContext, asset_dir: &Path) -> PrepareReport {
    let mut report = PrepareReport::default();

    for texture in SceneTexture::ALL {
        let path = asset_dir.join(texture.file_name());
        match ctx.textures.register_texture(&path, texture.tag()) {
            Ok(_) => report.textures_loaded += 1,
            Err(err) => {
                log::warn!("Skipping texture '{}': {err}", texture.tag());
                report.texture_failures.push(err);
            }
        }
    }

    register_materials(ctx);

    for (index, light) in scene_lights().into_iter().enumerate() {
        ctx.lights.set(index, light);
    }
    ctx.apply_lights(true);

    log::info!(
        "Prepared scene: {} of {} textures, {} materials, {} lights",
        report.textures_loaded,
        SceneTexture::ALL.len(),
        ctx.materials.len(),
        ctx.lights.active_count()
    );
    report
}

/// Registers the scene materials, skipping any tag already present
pub fn register_materials(ctx: &mut RenderContext) {
    for material in SceneMaterial::ALL {
        if let Err(err) = ctx.materials.register(material.material()) {
            log::warn!("Skipping material: {err}");
        }
    }
}

fn pose(scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> Pose {
    Pose::new(scale, rotation, position)
}

/// Builds the whole scene in draw order
pub fn build_scene() -> Scene {
    Scene::new(vec![
        background().at([0.0, 0.0, 0.0]),
        pacifier().at([2.8, 0.075, 2.0]),
        cup().at([-9.0, 0.005, -7.0]),
        bottle().at([1.0, 0.0, -8.0]),
        jam_jar().at([9.0, 0.001, -4.0]),
        lotion_bottle().at([0.0, 0.0, 0.0]),
    ])
}

pub fn background() -> SubAssembly {
    use SceneTexture::*;
    let side = [90.0, 90.0, 0.0];

    SubAssembly::new(
        "background",
        [0.0; 3],
        vec![
            RenderUnit::textured(
                "floor",
                MeshDraw::Plane,
                pose([50.0, 1.0, 60.0], [0.0; 3], [0.0, 0.0, -10.0]),
                Floor,
                [0.3, 0.3],
            )
            .with_material(SceneMaterial::Floor),
            RenderUnit::textured(
                "door",
                MeshDraw::Plane,
                pose([50.0, 1.0, 60.0], [90.0, 0.0, 0.0], [0.0, 64.0, -50.0]),
                Door,
                [1.0, 1.0],
            ),
            RenderUnit::textured(
                "door trim",
                MeshDraw::Plane,
                pose([50.0, 1.0, 3.0], [90.0, 0.0, 0.0], [0.0, 0.0, -50.0]),
                Trim2,
                [1.0, 0.1],
            ),
            RenderUnit::colored(
                "door jamb",
                MeshDraw::Plane,
                pose([50.0, 1.0, 0.5], [90.0, 0.0, 0.0], [0.0, 3.5, -50.0]),
                [0.0, 0.0, 0.0, 1.0],
            ),
            RenderUnit::textured(
                "left wall",
                MeshDraw::Plane,
                pose([50.0, 1.0, 60.0], side, [-50.0, 64.0, 0.0]),
                Wall,
                [1.0, 1.0],
            ),
            RenderUnit::textured(
                "left trim",
                MeshDraw::Plane,
                pose([50.0, 1.0, 4.0], side, [-50.0, 0.0, 0.0]),
                Trim1,
                [1.0, 0.1],
            ),
            RenderUnit::textured(
                "right wall",
                MeshDraw::Plane,
                pose([50.0, 1.0, 60.0], side, [50.0, 64.0, 0.0]),
                Wall,
                [1.0, 1.0],
            ),
            RenderUnit::textured(
                "right trim",
                MeshDraw::Plane,
                pose([50.0, 1.0, 4.0], side, [50.0, 0.0, 0.0]),
                Trim1,
                [1.0, 0.1],
            ),
        ],
    )
}

pub fn pacifier() -> SubAssembly {
    let rubber = |label, mesh, placement, uv_scale| {
        RenderUnit::textured(label, mesh, placement, SceneTexture::YellowRubber, uv_scale)
            .with_material(SceneMaterial::Pacifier)
    };

    SubAssembly::new(
        "pacifier",
        [0.0; 3],
        vec![
            rubber(
                "ring",
                MeshDraw::HalfTorus,
                pose([1.25, 1.2, 1.0], [225.0, 45.0, 0.0], [0.0, 1.1, 0.0]),
                [1.0, 0.2],
            ),
            rubber(
                "shield",
                MeshDraw::Sphere,
                pose([0.25, 1.7, 1.7], [0.0, -30.0, 55.0], [0.0, 1.15, 0.0]),
                [0.2, 0.2],
            ),
            rubber(
                "shield dome",
                MeshDraw::HalfSphere,
                pose([0.85, 0.85, 0.85], [30.0, 0.0, 315.0], [0.0, 1.15, 0.0]),
                [0.2, 0.2],
            ),
            rubber(
                "nipple stem",
                MeshDraw::Cylinder(CylinderParts::SIDES),
                pose([0.4, 1.25, 0.4], [30.0, 0.0, 325.0], [0.35, 1.65, 0.35]),
                [0.2, 0.2],
            ),
            rubber(
                "nipple tip",
                MeshDraw::Sphere,
                pose([0.45, 0.45, 0.45], [0.0; 3], [0.9, 2.45, 0.9]),
                [0.2, 0.2],
            ),
        ],
    )
}

pub fn lotion_bottle() -> SubAssembly {
    let pink = [0.94, 0.67, 0.83, 1.0];

    SubAssembly::new(
        "lotion bottle",
        [0.0; 3],
        vec![
            RenderUnit::colored(
                "cap",
                MeshDraw::Cylinder(CylinderParts::new(true, false, true)),
                pose([0.45, 1.0, 0.45], [0.0; 3], [0.0, 6.0, 0.0]),
                [0.92, 0.87, 0.90, 1.0],
            )
            .with_material(SceneMaterial::PlasticBottle),
            RenderUnit::colored(
                "base",
                MeshDraw::TaperedCylinder(CylinderParts::new(true, false, true)),
                pose([2.5, 2.0, 1.4], [0.0, 0.0, 180.0], [0.0, 2.001, 0.0]),
                pink,
            )
            .with_material(SceneMaterial::PlasticBottle),
            RenderUnit::colored(
                "body",
                MeshDraw::TaperedCylinder(CylinderParts::SIDES),
                pose([2.5, 3.0, 1.4], [0.0; 3], [0.0, 2.0, 0.0]),
                pink,
            )
            .with_material(SceneMaterial::PlasticBottle),
            RenderUnit::colored(
                "shoulder band",
                MeshDraw::TaperedCylinder(CylinderParts::new(true, false, true)),
                pose([1.25, 1.0, 0.7], [0.0; 3], [0.0, 5.0, 0.0]),
                [0.94, 0.67, 0.83, 0.30],
            )
            .with_material(SceneMaterial::PlasticBottle),
        ],
    )
}

pub fn cup() -> SubAssembly {
    SubAssembly::new(
        "cup",
        [0.0; 3],
        vec![
            RenderUnit::textured(
                "body",
                MeshDraw::Cylinder(CylinderParts::new(false, true, true)),
                pose([4.5, 8.0, 4.5], [0.0, 30.0, 0.0], [0.0; 3]),
                SceneTexture::BluePastel,
                [1.0, 0.2],
            ),
            RenderUnit::colored(
                "handle",
                MeshDraw::HalfTorus,
                pose([2.75, 4.0, 2.5], [320.0, 0.0, 270.0], [3.39, 4.0, -2.94]),
                [0.13, 0.25, 0.39, 1.0],
            ),
        ],
    )
}

pub fn jam_jar() -> SubAssembly {
    let brown = [0.28, 0.18, 0.10, 1.0];
    let lid = [0.13, 0.33, 0.19, 1.0];
    let body = pose([6.0, 3.0, 6.0], [0.0, -15.0, 0.0], [0.0, 2.5, 0.0]);

    SubAssembly::new(
        "jam jar",
        [0.0; 3],
        vec![
            RenderUnit::textured(
                "label",
                MeshDraw::BoxFace(BoxFace::Right),
                body,
                SceneTexture::Jam2,
                [1.0, 1.0],
            ),
            RenderUnit::textured(
                "label back",
                MeshDraw::BoxFace(BoxFace::Bottom),
                body,
                SceneTexture::Jam,
                [1.0, 1.0],
            ),
            RenderUnit::textured(
                "nutrition label",
                MeshDraw::BoxFace(BoxFace::Left),
                body,
                SceneTexture::NutritionFacts,
                [1.0, 1.0],
            ),
            RenderUnit::colored("front glass", MeshDraw::BoxFace(BoxFace::Front), body, brown)
                .with_material(SceneMaterial::BrownGlass),
            RenderUnit::colored(
                "base",
                MeshDraw::Box,
                pose([6.0, 1.0, 6.0], [0.0, -15.0, 0.0], [0.0, 0.5, 0.0]),
                brown,
            )
            .with_material(SceneMaterial::BrownGlass),
            RenderUnit::colored(
                "shoulder",
                MeshDraw::Box,
                pose([6.0, 1.5, 6.0], [0.0, -15.0, 0.0], [0.0, 4.75, 0.0]),
                brown,
            )
            .with_material(SceneMaterial::BrownGlass),
            RenderUnit::colored(
                "neck",
                MeshDraw::Cylinder(CylinderParts::SIDES),
                pose([2.5, 1.0, 2.5], [0.0; 3], [0.0, 5.5, 0.0]),
                brown,
            )
            .with_material(SceneMaterial::BrownGlass),
            RenderUnit::colored(
                "lid rim",
                MeshDraw::ThinTorus,
                pose([2.5, 2.5, 5.0], [90.0, 0.0, 0.0], [0.0, 6.5, 0.0]),
                lid,
            )
            .with_material(SceneMaterial::MetalLid),
            RenderUnit::colored(
                "lid",
                MeshDraw::Cylinder(CylinderParts::new(false, true, false)),
                pose([2.5, 1.0, 2.5], [0.0; 3], [0.0, 6.7, 0.0]),
                lid,
            )
            .with_material(SceneMaterial::MetalLid),
        ],
    )
}

pub fn bottle() -> SubAssembly {
    let glass = [0.16, 0.26, 0.10, 0.90];

    SubAssembly::new(
        "bottle",
        [0.0; 3],
        vec![
            RenderUnit::textured(
                "label",
                MeshDraw::Cylinder(CylinderParts::SIDES),
                pose([3.75, 8.5, 3.75], [0.0, 100.0, 0.0], [0.0, 1.5, 0.0]),
                SceneTexture::BottleLabel,
                [-1.0, 1.0],
            ),
            RenderUnit::textured(
                "ribbon",
                MeshDraw::TaperedCylinder(CylinderParts::SIDES),
                pose([1.79, 2.0, 1.79], [0.0; 3], [0.0, 15.75, 0.0]),
                SceneTexture::MetalRibbon,
                [1.0, 1.0],
            ),
            RenderUnit::textured(
                "neck foil",
                MeshDraw::Cylinder(CylinderParts::new(true, false, true)),
                pose([0.96, 5.5, 0.96], [0.0; 3], [0.0, 17.6, 0.0]),
                SceneTexture::MetalWrap,
                [1.0, 1.0],
            ),
            RenderUnit::textured(
                "lip",
                MeshDraw::ThinTorus,
                pose([1.0, 1.0, 5.0], [90.0, 0.0, 0.0], [0.0, 22.0, 0.0]),
                SceneTexture::MetalWrap,
                [0.5, 0.5],
            ),
            RenderUnit::colored(
                "heel",
                MeshDraw::ThinTorus,
                pose([3.39, 3.39, 15.0], [90.0, 0.0, 0.0], [0.0, 1.5, 0.0]),
                glass,
            )
            .with_material(SceneMaterial::Glass),
            RenderUnit::colored(
                "bottom",
                MeshDraw::Cylinder(CylinderParts::new(false, true, false)),
                pose([3.39, 1.0, 3.39], [0.0; 3], [0.0, 1.5, 0.0]),
                glass,
            )
            .with_material(SceneMaterial::Glass),
            RenderUnit::colored(
                "shoulder ring",
                MeshDraw::ThinTorus,
                pose([3.39, 3.39, 20.0], [90.0, 0.0, 0.0], [0.0, 10.0, 0.0]),
                glass,
            )
            .with_material(SceneMaterial::Glass),
            RenderUnit::colored(
                "shoulder",
                MeshDraw::TaperedCylinder(CylinderParts::SIDES),
                pose([3.545, 4.0, 3.545], [0.0; 3], [0.0, 11.8, 0.0]),
                glass,
            )
            .with_material(SceneMaterial::Glass),
        ],
    )
}
