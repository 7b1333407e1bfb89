//! 4x4 matrix helpers
//!
//! Matrices here are column-major (`m[col][row]`), which is the layout WGSL
//! expects for a `mat4x4<f32>` uniform. The user-facing editor stores its
//! entries row-major; see [`crate::TransformMatrix::to_gpu`] for the bridge.

use crate::Vec4;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Build a column-major matrix from rows written in reading order
///
/// ```
/// use transform_lab_math::mat4::{from_rows, transform};
/// use transform_lab_math::Vec4;
/// // Translate by (2, 0, 0)
/// let m = from_rows([
///     [1.0, 0.0, 0.0, 2.0],
///     [0.0, 1.0, 0.0, 0.0],
///     [0.0, 0.0, 1.0, 0.0],
///     [0.0, 0.0, 0.0, 1.0],
/// ]);
/// let p = transform(m, Vec4::point(1.0, 0.0, 0.0));
/// assert_eq!(p.x, 3.0);
/// ```
pub fn from_rows(rows: [[f32; 4]; 4]) -> Mat4 {
    transpose(rows)
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a Vec4 by a 4x4 matrix (column-major)
///
/// result = M * v
pub fn transform(m: Mat4, v: Vec4) -> Vec4 {
    Vec4::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0] * v.w,
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1] * v.w,
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2] * v.w,
        m[0][3] * v.x + m[1][3] * v.y + m[2][3] * v.z + m[3][3] * v.w,
    )
}

/// Get a column vector from a matrix
pub fn get_column(m: Mat4, col: usize) -> Vec4 {
    Vec4::new(m[col][0], m[col][1], m[col][2], m[col][3])
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec4, b: Vec4) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z) && approx_eq(a.w, b.w)
    }

    fn scale(sx: f32, sy: f32) -> Mat4 {
        from_rows([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    fn translate(tx: f32) -> Mat4 {
        from_rows([
            [1.0, 0.0, 0.0, tx],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    #[test]
    fn test_identity() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let result = transform(IDENTITY, v);
        assert!(vec_approx_eq(v, result));
    }

    #[test]
    fn test_from_rows_places_translation_in_last_column() {
        let m = translate(5.0);
        assert_eq!(get_column(m, 3), Vec4::new(5.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_mul_identity() {
        let a = scale(2.0, 3.0);
        assert_eq!(mul(IDENTITY, a), a);
        assert_eq!(mul(a, IDENTITY), a);
    }

    #[test]
    fn test_mul_applies_right_operand_first() {
        // scale then translate: x = 1 -> 2 -> 3
        let m = mul(translate(1.0), scale(2.0, 1.0));
        let p = transform(m, Vec4::point(1.0, 0.0, 0.0));
        assert!(vec_approx_eq(p, Vec4::point(3.0, 0.0, 0.0)), "got {:?}", p);

        // translate then scale: x = 1 -> 2 -> 4
        let m = mul(scale(2.0, 1.0), translate(1.0));
        let p = transform(m, Vec4::point(1.0, 0.0, 0.0));
        assert!(vec_approx_eq(p, Vec4::point(4.0, 0.0, 0.0)), "got {:?}", p);
    }

    #[test]
    fn test_transpose_is_involution() {
        let m = from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        assert_eq!(transpose(transpose(m)), m);
        assert_eq!(transpose(m)[0], [1.0, 2.0, 3.0, 4.0]);
    }
}
