//! On-screen matrix editor
//!
//! [`UiSystem`] owns the egui context and its winit glue; [`MatrixPanel`]
//! draws the editor window itself.

mod matrix_panel;

pub use matrix_panel::{MatrixPanel, PanelAction};

use transform_lab_math::TransformMatrix;
use transform_lab_render::OverlayFrame;
use winit::event::WindowEvent;
use winit::window::Window;

/// Everything the UI produced for one frame
pub struct UiFrame {
    /// Paint jobs for the overlay renderer
    pub overlay: OverlayFrame,
    /// Menu and button presses, to be applied after the frame
    pub actions: Vec<PanelAction>,
}

/// egui context, winit integration, and the matrix panel
pub struct UiSystem {
    ctx: egui::Context,
    state: egui_winit::State,
    panel: MatrixPanel,
}

impl UiSystem {
    pub fn new(window: &Window, panel: MatrixPanel) -> Self {
        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals::dark());

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        Self { ctx, state, panel }
    }

    /// Feed a window event to egui; returns true when egui consumed it
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// True while a widget is taking keyboard input
    pub fn wants_keyboard_input(&self) -> bool {
        self.ctx.wants_keyboard_input()
    }

    /// Run the panel for one frame, editing `matrix` in place
    pub fn run(&mut self, window: &Window, matrix: &mut TransformMatrix) -> UiFrame {
        let raw_input = self.state.take_egui_input(window);

        let panel = &self.panel;
        let mut actions = Vec::new();
        let full_output = self.ctx.run(raw_input, |ctx| {
            actions = panel.show(ctx, matrix);
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        UiFrame {
            overlay: OverlayFrame {
                primitives,
                textures_delta: full_output.textures_delta,
                pixels_per_point: full_output.pixels_per_point,
            },
            actions,
        }
    }
}
