//! egui overlay drawn on top of the quad

use egui_wgpu::{Renderer as EguiRenderer, ScreenDescriptor};

/// Tessellated egui output for one frame
pub struct OverlayFrame {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl OverlayFrame {
    /// A frame that paints nothing
    pub fn empty(pixels_per_point: f32) -> Self {
        Self {
            primitives: Vec::new(),
            textures_delta: egui::TexturesDelta::default(),
            pixels_per_point,
        }
    }
}

/// Wraps the egui wgpu renderer
pub struct OverlayRenderer {
    renderer: EguiRenderer,
}

impl OverlayRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            renderer: EguiRenderer::new(device, surface_format, None, 1, false),
        }
    }

    /// Paint the overlay into `view`, keeping what is already there
    ///
    /// Returns any extra command buffers egui needs submitted before the
    /// encoder's own work.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        frame: OverlayFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: frame.pixels_per_point,
        };
        let command_buffers =
            self.renderer
                .update_buffers(device, queue, encoder, &frame.primitives, &screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let mut render_pass = render_pass.forget_lifetime();
            self.renderer
                .render(&mut render_pass, &frame.primitives, &screen_descriptor);
        }

        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }

        command_buffers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame() {
        let frame = OverlayFrame::empty(2.0);
        assert!(frame.primitives.is_empty());
        assert!(frame.textures_delta.set.is_empty());
        assert!(frame.textures_delta.free.is_empty());
        assert_eq!(frame.pixels_per_point, 2.0);
    }
}
