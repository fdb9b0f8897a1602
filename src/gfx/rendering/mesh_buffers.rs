//! GPU buffers for the primitive mesh library
//!
//! Every [`MeshKind`] is generated once and uploaded as a vertex/index buffer
//! pair. A [`MeshDraw`] resolves to one or more index ranges of its kind's
//! buffers, which lets single box faces or cylinder caps be drawn alone.

use std::collections::HashMap;
use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::gfx::geometry::{generate_mesh, GeometryData, MeshDraw, MeshKind};

/// Uploaded buffers of one mesh kind
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    geometry: GeometryData,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, kind: MeshKind, geometry: GeometryData) -> Self {
        let vertices = geometry.to_vertices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{kind:?} Vertex Buffer")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{kind:?} Index Buffer")),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            geometry,
        }
    }

    pub fn index_ranges(&self, draw: &MeshDraw) -> Vec<Range<u32>> {
        self.geometry.index_ranges(&draw.parts())
    }
}

/// All primitive meshes, uploaded up front
pub struct MeshLibrary {
    meshes: HashMap<MeshKind, GpuMesh>,
}

impl MeshLibrary {
    pub fn new(device: &wgpu::Device) -> Self {
        let meshes: HashMap<MeshKind, GpuMesh> = MeshKind::ALL
            .into_iter()
            .map(|kind| {
                let geometry = generate_mesh(kind);
                log::debug!(
                    "Uploading {kind:?}: {} vertices, {} triangles",
                    geometry.vertex_count(),
                    geometry.triangle_count()
                );
                (kind, GpuMesh::upload(device, kind, geometry))
            })
            .collect();

        Self { meshes }
    }

    pub fn get(&self, kind: MeshKind) -> Option<&GpuMesh> {
        self.meshes.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

pub trait DrawMesh<'a> {
    /// Binds `mesh` and draws the index ranges `draw` selects
    fn draw_mesh_parts(&mut self, mesh: &'a GpuMesh, draw: &MeshDraw);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh_parts(&mut self, mesh: &'b GpuMesh, draw: &MeshDraw) {
        let ranges = mesh.index_ranges(draw);
        if ranges.is_empty() {
            return;
        }

        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for range in ranges {
            self.draw_indexed(range, 0, 0..1);
        }
    }
}
