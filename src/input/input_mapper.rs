//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like Exit or ResetMatrix.
//! Pointer input belongs to the egui panel and is not mapped here.

use transform_lab_math::MatrixMode;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Close the window (Escape)
    Exit,
    /// Restore the identity matrix (R key)
    ResetMatrix,
    /// Switch editing mode (1-4, menu order)
    SelectMode(MatrixMode),
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// While the UI has keyboard focus (e.g. typing into a matrix entry),
    /// only Escape is mapped so digits and letters reach the widget.
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        ui_has_focus: bool,
    ) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        if key == KeyCode::Escape {
            return Some(InputAction::Exit);
        }
        if ui_has_focus {
            return None;
        }

        match key {
            KeyCode::KeyR => Some(InputAction::ResetMatrix),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Digit1 => Some(InputAction::SelectMode(MatrixMode::ALL[0])),
            KeyCode::Digit2 => Some(InputAction::SelectMode(MatrixMode::ALL[1])),
            KeyCode::Digit3 => Some(InputAction::SelectMode(MatrixMode::ALL[2])),
            KeyCode::Digit4 => Some(InputAction::SelectMode(MatrixMode::ALL[3])),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed, false);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_escape_exits_even_with_ui_focus() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed, true);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Released, false);
        assert_eq!(action, None);
    }

    #[test]
    fn test_digits_select_modes_in_menu_order() {
        let keys = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4];
        for (key, mode) in keys.into_iter().zip(MatrixMode::ALL) {
            assert_eq!(
                InputMapper::map_keyboard(key, ElementState::Pressed, false),
                Some(InputAction::SelectMode(mode))
            );
        }
    }

    #[test]
    fn test_shortcuts_suppressed_while_ui_focused() {
        for key in [KeyCode::KeyR, KeyCode::KeyF, KeyCode::Digit2] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed, true);
            assert_eq!(action, None, "Key {:?} should reach the UI", key);
        }
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyR, ElementState::Pressed, false),
            Some(InputAction::ResetMatrix)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyF, ElementState::Pressed, false),
            Some(InputAction::ToggleFullscreen)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyW, ElementState::Pressed, false),
            None
        );
    }
}
