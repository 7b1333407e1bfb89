//! Quad pipeline: both transform programs and their shared bindings
//!
//! The 2D and 3D programs use the same bind group layout, so a single
//! uniform write reaches whichever program draws the frame.

use wgpu::util::DeviceExt;

use super::types::{ProgramKind, QuadVertex, TransformUniforms};
use crate::geometry::QuadMesh;
use crate::shader::{compile_module, ShaderError, ShaderLibrary};
use crate::texture::QuadTexture;
use transform_lab_math::TransformMatrix;

/// Render pipelines for the 2D and 3D quad programs
pub struct QuadPipeline {
    flat_2d: wgpu::RenderPipeline,
    spatial_3d: wgpu::RenderPipeline,
    /// Uniform buffer holding the column-major transform
    uniform_buffer: wgpu::Buffer,
    /// Uniforms, texture, and sampler
    bind_group: wgpu::BindGroup,
}

impl QuadPipeline {
    /// Compile both programs and bind the texture
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shaders: &ShaderLibrary,
        texture: &QuadTexture,
    ) -> Result<Self, ShaderError> {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Quad Bind Group Layout"),
            entries: &[
                // Transform uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Texture
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Quad Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let flat_2d = Self::create_program(
            device,
            &pipeline_layout,
            surface_format,
            ProgramKind::Flat2D,
            shaders,
        )?;
        let spatial_3d = Self::create_program(
            device,
            &pipeline_layout,
            surface_format,
            ProgramKind::Spatial3D,
            shaders,
        )?;

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Transform Uniform Buffer"),
            contents: bytemuck::bytes_of(&TransformUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Quad Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(texture.sampler()),
                },
            ],
        });

        Ok(Self {
            flat_2d,
            spatial_3d,
            uniform_buffer,
            bind_group,
        })
    }

    /// Compile one program and build its render pipeline
    fn create_program(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        surface_format: wgpu::TextureFormat,
        kind: ProgramKind,
        shaders: &ShaderLibrary,
    ) -> Result<wgpu::RenderPipeline, ShaderError> {
        let label = kind.label();
        let shader = compile_module(device, label, &shaders.program_source(kind))?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Self::vertex_buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The 3D program can flip the quad; both faces stay visible
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(ShaderError::Link {
                label: label.to_string(),
                message: err.to_string(),
            });
        }

        log::info!("Built program '{}'", label);
        Ok(pipeline)
    }

    /// Get the vertex buffer layout for QuadVertex
    fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // uv: vec2<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }
    }

    /// Upload the edited matrix
    pub fn update_transform(&self, queue: &wgpu::Queue, matrix: &TransformMatrix) {
        let uniforms = TransformUniforms::from_matrix(matrix);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    pub fn program(&self, kind: ProgramKind) -> &wgpu::RenderPipeline {
        match kind {
            ProgramKind::Flat2D => &self.flat_2d,
            ProgramKind::Spatial3D => &self.spatial_3d,
        }
    }

    /// Draw the quad with the given program
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, kind: ProgramKind, mesh: &QuadMesh) {
        render_pass.set_pipeline(self.program(kind));
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        mesh.draw(render_pass);
    }
}
