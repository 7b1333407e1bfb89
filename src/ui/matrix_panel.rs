//! The "Transform Matrix" editor window

use transform_lab_math::{MatrixMode, TransformMatrix};

/// Something the user asked for through the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// A menu bar entry was clicked
    SelectMode(MatrixMode),
    /// The RESET button was clicked
    Reset,
}

impl PanelAction {
    pub fn apply(self, matrix: &mut TransformMatrix) {
        match self {
            PanelAction::SelectMode(mode) => {
                if matrix.mode() != mode {
                    log::info!("Matrix mode: {}", mode);
                }
                matrix.set_mode(mode);
            }
            PanelAction::Reset => {
                matrix.reset();
                log::debug!("Matrix reset to identity");
            }
        }
    }
}

/// Auto-sized window with a mode menu, a reset button, and one drag value
/// per editable matrix entry
pub struct MatrixPanel {
    drag_speed: f32,
}

impl MatrixPanel {
    pub const TITLE: &'static str = "Transform Matrix";

    pub fn new(drag_speed: f32) -> Self {
        Self { drag_speed }
    }

    pub fn drag_speed(&self) -> f32 {
        self.drag_speed
    }

    /// Draw the panel; entries are edited in place, everything else is
    /// returned as actions
    pub fn show(&self, ctx: &egui::Context, matrix: &mut TransformMatrix) -> Vec<PanelAction> {
        let mut actions = Vec::new();
        let speed = self.drag_speed;

        egui::Window::new(Self::TITLE)
            .resizable(false)
            .auto_sized()
            .show(ctx, |ui| {
                egui::menu::bar(ui, |ui| {
                    for mode in MatrixMode::ALL {
                        let selected = matrix.mode() == mode;
                        if ui.selectable_label(selected, mode.label()).clicked() {
                            actions.push(PanelAction::SelectMode(mode));
                        }
                    }
                });

                ui.horizontal(|ui| {
                    if ui.button("RESET").clicked() {
                        actions.push(PanelAction::Reset);
                    }
                    ui.label(matrix.mode().status_label());
                });

                for row in matrix.editable_rows_mut() {
                    ui.horizontal(|ui| {
                        for value in row.iter_mut() {
                            ui.add(egui::DragValue::new(value).speed(speed).fixed_decimals(3));
                        }
                    });
                }
            });

        actions
    }
}

impl Default for MatrixPanel {
    fn default() -> Self {
        Self::new(0.01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_headless(panel: &MatrixPanel, matrix: &mut TransformMatrix) -> Vec<PanelAction> {
        let ctx = egui::Context::default();
        let mut actions = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            actions = panel.show(ctx, matrix);
        });
        actions
    }

    #[test]
    fn test_show_without_input_changes_nothing() {
        let panel = MatrixPanel::default();
        for mode in MatrixMode::ALL {
            let mut matrix = TransformMatrix::with_mode(mode);
            let actions = run_headless(&panel, &mut matrix);
            assert!(actions.is_empty());
            assert!(matrix.is_identity());
            assert_eq!(matrix.mode(), mode);
        }
    }

    #[test]
    fn test_show_paints_something() {
        let panel = MatrixPanel::default();
        let mut matrix = TransformMatrix::new();
        let ctx = egui::Context::default();
        // The first frame only measures the window
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            panel.show(ctx, &mut matrix);
        });
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            panel.show(ctx, &mut matrix);
        });
        assert!(!output.shapes.is_empty());
    }

    fn collect_text(shape: &egui::Shape, out: &mut Vec<String>) {
        match shape {
            egui::Shape::Text(text) => out.push(text.galley.text().to_string()),
            egui::Shape::Vec(shapes) => shapes.iter().for_each(|s| collect_text(s, out)),
            _ => {}
        }
    }

    #[test]
    fn test_entries_show_three_decimals() {
        let panel = MatrixPanel::default();
        let mut matrix = TransformMatrix::new();
        matrix.set(0, 1, 0.125);
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            panel.show(ctx, &mut matrix);
        });
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            panel.show(ctx, &mut matrix);
        });

        let mut texts = Vec::new();
        for clipped in &output.shapes {
            collect_text(&clipped.shape, &mut texts);
        }
        assert!(texts.iter().any(|t| t == "1.000"), "texts: {:?}", texts);
        assert!(texts.iter().any(|t| t == "0.125"), "texts: {:?}", texts);
    }

    #[test]
    fn test_select_mode_action() {
        let mut matrix = TransformMatrix::new();
        matrix.set(0, 1, 0.5);
        PanelAction::SelectMode(MatrixMode::Homogeneous3D).apply(&mut matrix);
        assert_eq!(matrix.mode(), MatrixMode::Homogeneous3D);
        // Entries survive a mode switch
        assert_eq!(matrix.get(0, 1), Some(0.5));
    }

    #[test]
    fn test_reset_action() {
        let mut matrix = TransformMatrix::with_mode(MatrixMode::Linear3D);
        matrix.set(2, 2, -1.0);
        PanelAction::Reset.apply(&mut matrix);
        assert!(matrix.is_identity());
        assert_eq!(matrix.mode(), MatrixMode::Linear3D);
    }

    #[test]
    fn test_default_drag_speed() {
        assert_eq!(MatrixPanel::default().drag_speed(), 0.01);
    }
}
