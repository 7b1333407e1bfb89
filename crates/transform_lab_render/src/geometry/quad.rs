//! The textured quad
//!
//! A unit square centered on the origin in the z = 0 plane, split into two
//! counter-clockwise triangles.

use wgpu::util::DeviceExt;

use crate::pipeline::QuadVertex;

/// Quad corners: bottom-left, top-left, top-right, bottom-right
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex::new([-0.5, -0.5, 0.0], [0.0, 0.0]),
    QuadVertex::new([-0.5, 0.5, 0.0], [0.0, 1.0]),
    QuadVertex::new([0.5, 0.5, 0.0], [1.0, 1.0]),
    QuadVertex::new([0.5, -0.5, 0.0], [1.0, 0.0]),
];

/// Two counter-clockwise triangles: (v0, v2, v1) and (v0, v3, v2)
pub const QUAD_INDICES: [u32; 6] = [0, 2, 1, 0, 3, 2];

/// Vertex and index buffers for the quad
pub struct QuadMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl QuadMesh {
    /// Upload the quad
    pub fn new(device: &wgpu::Device) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Index Buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "Uploaded quad: {} vertices, {} indices",
            QUAD_VERTICES.len(),
            QUAD_INDICES.len()
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: QUAD_INDICES.len() as u32,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Bind the buffers and draw both triangles
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
