//! Identifiers for loaded meshes and for individual draws of them

/// One of the six faces of the box mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxFace {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl BoxFace {
    pub const ALL: [BoxFace; 6] = [
        BoxFace::Front,
        BoxFace::Back,
        BoxFace::Left,
        BoxFace::Right,
        BoxFace::Top,
        BoxFace::Bottom,
    ];
}

/// A drawable index range inside a generated mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshPart {
    Whole,
    Face(BoxFace),
    CylinderTop,
    CylinderBottom,
    CylinderSides,
}

/// Which pieces of a (tapered) cylinder to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CylinderParts {
    pub top: bool,
    pub bottom: bool,
    pub sides: bool,
}

impl CylinderParts {
    pub const ALL: CylinderParts = CylinderParts::new(true, true, true);
    pub const SIDES: CylinderParts = CylinderParts::new(false, false, true);

    pub const fn new(top: bool, bottom: bool, sides: bool) -> Self {
        Self { top, bottom, sides }
    }

    fn mesh_parts(&self) -> Vec<MeshPart> {
        let mut parts = Vec::with_capacity(3);
        if self.top {
            parts.push(MeshPart::CylinderTop);
        }
        if self.bottom {
            parts.push(MeshPart::CylinderBottom);
        }
        if self.sides {
            parts.push(MeshPart::CylinderSides);
        }
        parts
    }
}

/// A mesh that is generated and uploaded once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Plane,
    Box,
    Sphere,
    HalfSphere,
    Cylinder,
    TaperedCylinder,
    Torus,
    HalfTorus,
    ThinTorus,
}

impl MeshKind {
    pub const ALL: [MeshKind; 9] = [
        MeshKind::Plane,
        MeshKind::Box,
        MeshKind::Sphere,
        MeshKind::HalfSphere,
        MeshKind::Cylinder,
        MeshKind::TaperedCylinder,
        MeshKind::Torus,
        MeshKind::HalfTorus,
        MeshKind::ThinTorus,
    ];
}

/// A single draw call against one of the loaded meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshDraw {
    Plane,
    Box,
    BoxFace(BoxFace),
    Sphere,
    HalfSphere,
    Cylinder(CylinderParts),
    TaperedCylinder(CylinderParts),
    Torus,
    HalfTorus,
    ThinTorus,
}

impl MeshDraw {
    pub fn kind(&self) -> MeshKind {
        match self {
            MeshDraw::Plane => MeshKind::Plane,
            MeshDraw::Box | MeshDraw::BoxFace(_) => MeshKind::Box,
            MeshDraw::Sphere => MeshKind::Sphere,
            MeshDraw::HalfSphere => MeshKind::HalfSphere,
            MeshDraw::Cylinder(_) => MeshKind::Cylinder,
            MeshDraw::TaperedCylinder(_) => MeshKind::TaperedCylinder,
            MeshDraw::Torus => MeshKind::Torus,
            MeshDraw::HalfTorus => MeshKind::HalfTorus,
            MeshDraw::ThinTorus => MeshKind::ThinTorus,
        }
    }

    pub fn parts(&self) -> Vec<MeshPart> {
        match self {
            MeshDraw::BoxFace(face) => vec![MeshPart::Face(*face)],
            MeshDraw::Cylinder(parts) | MeshDraw::TaperedCylinder(parts) => parts.mesh_parts(),
            _ => vec![MeshPart::Whole],
        }
    }
}
