//! Transform Lab - interactive transform matrix editor
//!
//! Draws a textured quad and lets the user edit the matrix that transforms
//! it through an on-screen panel.

use std::process::ExitCode;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use transform_lab::config::AppConfig;
use transform_lab::input::{InputAction, InputMapper};
use transform_lab::systems::{RenderError, RenderSystem, WindowSystem};
use transform_lab::ui::{MatrixPanel, PanelAction, UiSystem};
use transform_lab_math::TransformMatrix;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    /// The matrix being edited
    matrix: TransformMatrix,
    window: Option<WindowSystem>,
    ui: Option<UiSystem>,
    renderer: Option<RenderSystem>,
    /// Set when startup failed and the loop was asked to exit
    failed: bool,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let matrix = TransformMatrix::with_mode(config.matrix.initial_mode);
        Self {
            config,
            matrix,
            window: None,
            ui: None,
            renderer: None,
            failed: false,
        }
    }

    /// Create the window, GPU resources, and UI
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn std::error::Error>> {
        let window = WindowSystem::create(event_loop, &self.config.window)?;

        let renderer = RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            &self.config.assets,
            self.config.window.vsync,
        )?;

        let ui = UiSystem::new(
            window.window(),
            MatrixPanel::new(self.config.matrix.drag_speed),
        );

        window.update_title(self.matrix.mode());
        window.request_redraw();

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.ui = Some(ui);
        Ok(())
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetMatrix => PanelAction::Reset.apply(&mut self.matrix),
            InputAction::SelectMode(mode) => PanelAction::SelectMode(mode).apply(&mut self.matrix),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
        }
    }

    /// Run the UI, apply its actions, and draw
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(ui), Some(renderer)) =
            (&self.window, &mut self.ui, &mut self.renderer)
        else {
            return;
        };

        let frame = ui.run(window.window(), &mut self.matrix);
        for action in frame.actions {
            action.apply(&mut self.matrix);
        }
        window.update_title(self.matrix.mode());

        match renderer.render_frame(&self.matrix, frame.overlay) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => {
                log::debug!("Surface lost, reconfiguring");
                renderer.recover_surface();
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("{}", e),
        }

        // Request next frame
        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Startup failed: {}", e);
            self.failed = true;
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let ui_has_focus = match (&self.window, &mut self.ui) {
            (Some(window), Some(ui)) => {
                let consumed = ui.on_window_event(window.window(), &event);
                consumed || ui.wants_keyboard_input()
            }
            _ => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let action = InputMapper::map_keyboard(key, event.state, ui_has_focus);
                    if let Some(action) = action {
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("Shutting down");
        // GPU resources go before the window they present to
        self.renderer = None;
        self.ui = None;
        self.window = None;
    }
}

fn main() -> ExitCode {
    let config = AppConfig::load();

    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting Transform Lab");

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    if app.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
