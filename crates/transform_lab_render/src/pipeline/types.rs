//! GPU-compatible data types for the quad programs
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use transform_lab_math::mat4::{Mat4, IDENTITY};
use transform_lab_math::{MatrixMode, TransformMatrix};

/// A quad vertex: position plus texture coordinate
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// Position (x, y, z)
    pub position: [f32; 3],
    /// Texture coordinate (u, v), v = 0 at the bottom of the image
    pub uv: [f32; 2],
}

impl QuadVertex {
    pub const fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}

/// Uniforms shared by both programs
/// Layout: 64 bytes (must match `TransformUniforms` in the WGSL sources)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct TransformUniforms {
    /// Column-major transform
    pub transform: Mat4,
}

impl TransformUniforms {
    pub fn from_matrix(matrix: &TransformMatrix) -> Self {
        Self {
            transform: matrix.to_gpu(),
        }
    }
}

impl Default for TransformUniforms {
    fn default() -> Self {
        Self { transform: IDENTITY }
    }
}

/// Which program draws the quad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramKind {
    /// Homogeneous 2D transform of xy
    Flat2D,
    /// Full 4x4 transform of xyz
    Spatial3D,
}

impl ProgramKind {
    /// Program used while editing in `mode`
    pub fn for_mode(mode: MatrixMode) -> Self {
        if mode.is_3d() {
            ProgramKind::Spatial3D
        } else {
            ProgramKind::Flat2D
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProgramKind::Flat2D => "Quad 2D",
            ProgramKind::Spatial3D => "Quad 3D",
        }
    }
}
