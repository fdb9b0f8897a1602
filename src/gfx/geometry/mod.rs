//! # Procedural Geometry Generation
//!
//! This module generates every primitive the still-life is built from, so no
//! model files are needed at runtime.
//!
//! ## Supported Primitives
//!
//! - **Plane**: 2x2 plane in XZ, normal +Y
//! - **Box**: unit cube with six individually drawable faces
//! - **Sphere / Half-sphere**: radius 1, the half-sphere is the upper dome
//! - **Cylinder / Tapered cylinder**: radius 1, height 1 from y = 0, with
//!   separately drawable caps and sides
//! - **Torus / Half-torus / Thin torus**: main radius 1 in the XY plane
//!
//! ## Usage
//!
//! ```rust
//! use still_life::gfx::geometry::{generate_box, BoxFace, MeshPart};
//!
//! let cube = generate_box();
//! let front = cube.index_ranges(&[MeshPart::Face(BoxFace::Front)]);
//! assert_eq!(front[0].len(), 6);
//! ```

pub mod primitives;
pub mod shapes;

use std::ops::Range;

pub use primitives::*;
pub use shapes::{BoxFace, CylinderParts, MeshDraw, MeshKind, MeshPart};

use crate::gfx::rendering::vertex::Vertex3D;

/// Generated geometry ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
    /// Named sub-ranges of `indices` that can be drawn on their own
    pub parts: Vec<(MeshPart, Range<u32>)>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            parts: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Records every index pushed since `start` as `part`
    pub(crate) fn close_part(&mut self, part: MeshPart, start: usize) {
        self.parts
            .push((part, start as u32..self.indices.len() as u32));
    }

    /// Resolves the requested parts to index ranges.
    ///
    /// `MeshPart::Whole` always maps to the full index buffer. Parts this
    /// geometry does not define resolve to nothing.
    pub fn index_ranges(&self, parts: &[MeshPart]) -> Vec<Range<u32>> {
        parts
            .iter()
            .filter_map(|part| match part {
                MeshPart::Whole => Some(0..self.indices.len() as u32),
                other => self
                    .parts
                    .iter()
                    .find(|(p, _)| p == other)
                    .map(|(_, range)| range.clone()),
            })
            .collect()
    }

    /// Interleaves positions, normals and UVs into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
