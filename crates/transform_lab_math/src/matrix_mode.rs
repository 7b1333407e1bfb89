//! Matrix editing modes
//!
//! The editor exposes four modes. Each one picks which shader program draws
//! the quad (2D or 3D) and how many rows and columns of the matrix are
//! editable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four editing modes offered in the panel's menu bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixMode {
    /// 2D linear map, 2x2 editable
    #[default]
    #[serde(rename = "2d-2x2")]
    Linear2D,
    /// 2D homogeneous map (translation, projective row), 3x3 editable
    #[serde(rename = "2d-3x3")]
    Homogeneous2D,
    /// 3D linear map, 3x3 editable
    #[serde(rename = "3d-3x3")]
    Linear3D,
    /// 3D homogeneous map, full 4x4 editable
    #[serde(rename = "3d-4x4")]
    Homogeneous3D,
}

impl MatrixMode {
    /// All modes, in menu order
    pub const ALL: [MatrixMode; 4] = [
        MatrixMode::Linear2D,
        MatrixMode::Homogeneous2D,
        MatrixMode::Linear3D,
        MatrixMode::Homogeneous3D,
    ];

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            MatrixMode::Linear2D => "2D (2x2)",
            MatrixMode::Homogeneous2D => "2D (3x3)",
            MatrixMode::Linear3D => "3D (3x3)",
            MatrixMode::Homogeneous3D => "3D (4x4)",
        }
    }

    /// Spatial dimension the quad is drawn in (2 or 3)
    pub fn dimension(self) -> usize {
        match self {
            MatrixMode::Linear2D | MatrixMode::Homogeneous2D => 2,
            MatrixMode::Linear3D | MatrixMode::Homogeneous3D => 3,
        }
    }

    /// Number of editable rows and columns
    pub fn size(self) -> usize {
        match self {
            MatrixMode::Linear2D => 2,
            MatrixMode::Homogeneous2D | MatrixMode::Linear3D => 3,
            MatrixMode::Homogeneous3D => 4,
        }
    }

    pub fn is_3d(self) -> bool {
        self.dimension() == 3
    }

    /// Status text shown next to the reset button
    pub fn status_label(self) -> &'static str {
        if self.is_3d() {
            "3D Active"
        } else {
            "2D Active"
        }
    }
}

impl fmt::Display for MatrixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_2d_2x2() {
        let mode = MatrixMode::default();
        assert_eq!(mode, MatrixMode::Linear2D);
        assert_eq!(mode.dimension(), 2);
        assert_eq!(mode.size(), 2);
    }

    #[test]
    fn test_dimensions_and_sizes() {
        let expected = [(2, 2), (2, 3), (3, 3), (3, 4)];
        for (mode, (dim, size)) in MatrixMode::ALL.iter().zip(expected) {
            assert_eq!(mode.dimension(), dim, "{}", mode);
            assert_eq!(mode.size(), size, "{}", mode);
        }
    }

    #[test]
    fn test_status_label() {
        assert_eq!(MatrixMode::Homogeneous2D.status_label(), "2D Active");
        assert_eq!(MatrixMode::Linear3D.status_label(), "3D Active");
    }

    #[test]
    fn test_labels_are_unique() {
        let labels: std::collections::HashSet<_> =
            MatrixMode::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels.len(), 4);
    }

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        mode: MatrixMode,
    }

    #[test]
    fn test_serde_uses_short_keys() {
        let text = toml::to_string(&Wrapper { mode: MatrixMode::Homogeneous3D }).unwrap();
        assert!(text.contains("\"3d-4x4\""), "got {}", text);

        let parsed: Wrapper = toml::from_str("mode = \"2d-3x3\"").unwrap();
        assert_eq!(parsed.mode, MatrixMode::Homogeneous2D);
    }
}
