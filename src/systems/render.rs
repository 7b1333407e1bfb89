//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The 2D/3D quad programs, quad mesh, and texture
//! - The egui overlay
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use transform_lab_math::TransformMatrix;
use transform_lab_render::{
    ContextError, OverlayFrame, OverlayRenderer, ProgramKind, QuadMesh, QuadPipeline, QuadTexture,
    RenderContext, ShaderError, ShaderLibrary,
};
use crate::config::{AssetsConfig, RenderingConfig};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU bring-up failed
    Context(ContextError),
    /// Shader programs could not be built
    Shader(ShaderError),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Context(e) => write!(f, "{}", e),
            RenderError::Shader(e) => write!(f, "{}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Context(e) => Some(e),
            RenderError::Shader(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

impl From<ShaderError> for RenderError {
    fn from(e: ShaderError) -> Self {
        RenderError::Shader(e)
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    quad_pipeline: QuadPipeline,
    mesh: QuadMesh,
    overlay: OverlayRenderer,
    render_config: RenderingConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        assets: &AssetsConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let texture = QuadTexture::load_or_fallback(
            &context.device,
            &context.queue,
            &assets.texture_path,
            render_config.flip_texture_vertically,
        );

        let shaders = match &assets.shader_dir {
            Some(dir) => ShaderLibrary::load(dir),
            None => ShaderLibrary::embedded(),
        };
        let quad_pipeline = Self::build_pipeline(&context, &shaders, &texture)?;

        let mesh = QuadMesh::new(&context.device);
        let overlay = OverlayRenderer::new(&context.device, context.config.format);

        Ok(Self {
            context,
            quad_pipeline,
            mesh,
            overlay,
            render_config: render_config.clone(),
        })
    }

    /// Build both programs, retrying with the embedded shaders when
    /// overrides from disk fail to compile or link
    fn build_pipeline(
        context: &RenderContext,
        shaders: &ShaderLibrary,
        texture: &QuadTexture,
    ) -> Result<QuadPipeline, RenderError> {
        let format = context.config.format;
        match QuadPipeline::new(&context.device, format, shaders, texture) {
            Ok(pipeline) => Ok(pipeline),
            Err(e) if !shaders.is_embedded() => {
                log::error!("{}; falling back to embedded shaders", e);
                let embedded = ShaderLibrary::embedded();
                Ok(QuadPipeline::new(&context.device, format, &embedded, texture)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(winit::dpi::PhysicalSize::new(width, height));
        log::debug!(
            "Surface {}x{}, aspect {:.3}",
            self.context.config.width,
            self.context.config.height,
            self.context.aspect_ratio()
        );
    }

    /// Reconfigure the surface after `RenderError::SurfaceLost`
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Render a single frame: the quad, then the overlay on top
    pub fn render_frame(
        &mut self,
        matrix: &TransformMatrix,
        overlay: OverlayFrame,
    ) -> Result<(), RenderError> {
        self.quad_pipeline.update_transform(&self.context.queue, matrix);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = &self.render_config.background_color;
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Quad Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg[0] as f64,
                            g: bg[1] as f64,
                            b: bg[2] as f64,
                            a: bg[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let program = ProgramKind::for_mode(matrix.mode());
            self.quad_pipeline.draw(&mut render_pass, program, &self.mesh);
        }

        let size = [self.context.config.width, self.context.config.height];
        let overlay_buffers = self.overlay.render(
            &self.context.device,
            &self.context.queue,
            &mut encoder,
            &view,
            size,
            overlay,
        );

        // Submit
        self.context.queue.submit(
            overlay_buffers
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        output.present();

        Ok(())
    }
}
