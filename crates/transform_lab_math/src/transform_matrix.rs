//! The user-edited transform matrix
//!
//! Entries are stored row-major in the order they appear in the editor, so
//! `rows[r][c]` is the widget on row `r`, column `c`. The matrix the shaders
//! multiply with has those same rows; [`TransformMatrix::to_gpu`] produces
//! the column-major layout WGSL wants.

use crate::mat4::{self, Mat4, IDENTITY};
use crate::{MatrixMode, Vec4};

/// Editable 4x4 matrix plus the active editing mode
///
/// Switching modes never touches the entries: values outside the editable
/// block of a smaller mode are kept and still take part in the transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix {
    rows: [[f32; 4]; 4],
    mode: MatrixMode,
}

impl TransformMatrix {
    /// Identity matrix in the default mode
    pub fn new() -> Self {
        Self::with_mode(MatrixMode::default())
    }

    /// Identity matrix in the given mode
    pub fn with_mode(mode: MatrixMode) -> Self {
        Self {
            rows: IDENTITY,
            mode,
        }
    }

    pub fn mode(&self) -> MatrixMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MatrixMode) {
        self.mode = mode;
    }

    /// Restore the identity matrix, keeping the current mode
    pub fn reset(&mut self) {
        self.rows = IDENTITY;
    }

    pub fn is_identity(&self) -> bool {
        self.rows == IDENTITY
    }

    /// Read an entry; `None` when out of range
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Write an entry; out-of-range indices are ignored
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        if let Some(entry) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *entry = value;
        }
    }

    /// Raw row-major storage
    pub fn rows(&self) -> &[[f32; 4]; 4] {
        &self.rows
    }

    /// The block the current mode lets the user edit, one slice per row
    pub fn editable_rows_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        let size = self.mode.size();
        self.rows.iter_mut().take(size).map(move |row| &mut row[..size])
    }

    /// Column-major matrix for the uniform buffer
    pub fn to_gpu(&self) -> Mat4 {
        mat4::from_rows(self.rows)
    }

    /// Map a quad-space point the way the 2D program does
    ///
    /// The point is lifted to `(x, y, 1)`, multiplied by the upper-left 3x3
    /// block and divided by the resulting third component. That component is
    /// the clip w of the 2D program, so `None` is returned when it is zero or
    /// negative and the GPU would clip the vertex.
    pub fn apply_2d(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        let r = &self.rows;
        let px = r[0][0] * x + r[0][1] * y + r[0][2];
        let py = r[1][0] * x + r[1][1] * y + r[1][2];
        let pz = r[2][0] * x + r[2][1] * y + r[2][2];
        if pz <= 0.0 {
            None
        } else {
            Some((px / pz, py / pz))
        }
    }

    /// Map a homogeneous point the way the 3D program does
    pub fn apply_3d(&self, v: Vec4) -> Vec4 {
        mat4::transform(self.to_gpu(), v)
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_new_is_identity() {
        let m = TransformMatrix::new();
        assert!(m.is_identity());
        assert_eq!(m.mode(), MatrixMode::Linear2D);
        assert_eq!(m.to_gpu(), IDENTITY);
    }

    #[test]
    fn test_reset_keeps_mode() {
        let mut m = TransformMatrix::with_mode(MatrixMode::Homogeneous3D);
        m.set(0, 3, 0.5);
        assert!(!m.is_identity());

        m.reset();
        assert!(m.is_identity());
        assert_eq!(m.mode(), MatrixMode::Homogeneous3D);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut m = TransformMatrix::new();
        m.set(1, 2, 7.0);
        assert_eq!(m.get(1, 2), Some(7.0));

        m.set(4, 0, 9.0);
        m.set(0, 4, 9.0);
        assert_eq!(m.get(4, 0), None);
        assert_eq!(m.get(0, 4), None);
        assert_eq!(m.rows()[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_editable_rows_follow_mode() {
        for mode in MatrixMode::ALL {
            let mut m = TransformMatrix::with_mode(mode);
            let rows: Vec<usize> = m.editable_rows_mut().map(|r| r.len()).collect();
            assert_eq!(rows, vec![mode.size(); mode.size()], "{}", mode);
        }
    }

    #[test]
    fn test_editing_through_rows_writes_entries() {
        let mut m = TransformMatrix::with_mode(MatrixMode::Homogeneous2D);
        for (r, row) in m.editable_rows_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = (r * 10 + c) as f32;
            }
        }
        assert_eq!(m.get(2, 1), Some(21.0));
        // Outside the 3x3 block is untouched
        assert_eq!(m.get(3, 3), Some(1.0));
        assert_eq!(m.get(0, 3), Some(0.0));
    }

    #[test]
    fn test_switching_mode_keeps_hidden_entries() {
        let mut m = TransformMatrix::with_mode(MatrixMode::Homogeneous3D);
        m.set(3, 3, 2.0);
        m.set_mode(MatrixMode::Linear2D);
        assert_eq!(m.get(3, 3), Some(2.0));
        m.set_mode(MatrixMode::Homogeneous3D);
        assert_eq!(m.get(3, 3), Some(2.0));
    }

    #[test]
    fn test_to_gpu_is_column_major() {
        let mut m = TransformMatrix::new();
        // Row 0, column 3 is x translation
        m.set(0, 3, 0.25);
        let gpu = m.to_gpu();
        assert_eq!(gpu[3][0], 0.25);
        assert_eq!(gpu[0][3], 0.0);
    }

    #[test]
    fn test_apply_2d_identity_and_scale() {
        let mut m = TransformMatrix::new();
        assert_eq!(m.apply_2d(0.5, -0.5), Some((0.5, -0.5)));

        m.set(0, 0, 2.0);
        m.set(1, 1, 3.0);
        assert_eq!(m.apply_2d(0.5, 0.5), Some((1.0, 1.5)));
    }

    #[test]
    fn test_apply_2d_translation_uses_third_column() {
        let mut m = TransformMatrix::with_mode(MatrixMode::Homogeneous2D);
        m.set(0, 2, 0.3);
        m.set(1, 2, -0.2);
        let (x, y) = m.apply_2d(0.0, 0.0).unwrap();
        assert!(approx_eq(x, 0.3));
        assert!(approx_eq(y, -0.2));
    }

    #[test]
    fn test_apply_2d_projective_row_divides() {
        let mut m = TransformMatrix::with_mode(MatrixMode::Homogeneous2D);
        m.set(2, 2, 2.0);
        assert_eq!(m.apply_2d(0.5, 0.5), Some((0.25, 0.25)));

        m.set(2, 2, 0.0);
        assert_eq!(m.apply_2d(0.5, 0.5), None);

        // Behind the clip plane
        m.set(2, 2, -1.0);
        assert_eq!(m.apply_2d(0.25, 0.25), None);
    }

    #[test]
    fn test_apply_3d_translation() {
        let mut m = TransformMatrix::with_mode(MatrixMode::Homogeneous3D);
        m.set(0, 3, 1.0);
        m.set(2, 3, -2.0);
        let p = m.apply_3d(Vec4::point(0.5, 0.5, 0.0));
        assert_eq!(p, Vec4::point(1.5, 0.5, -2.0));
    }

    #[test]
    fn test_apply_3d_rotation_about_y() {
        // 90 degrees about Y: x -> -z
        let mut m = TransformMatrix::with_mode(MatrixMode::Linear3D);
        m.set(0, 0, 0.0);
        m.set(0, 2, 1.0);
        m.set(2, 0, -1.0);
        m.set(2, 2, 0.0);
        let p = m.apply_3d(Vec4::point(1.0, 0.0, 0.0));
        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.z, -1.0));
        assert!(approx_eq(p.w, 1.0));
    }
}
