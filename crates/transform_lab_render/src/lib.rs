//! Transform Lab rendering library
//!
//! This crate provides the wgpu side of the demo: one textured quad drawn by
//! either a 2D or a 3D transform program, plus the egui overlay on top.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`shader::ShaderLibrary`] - WGSL sources, embedded or loaded from disk
//! - [`pipeline::QuadPipeline`] - the 2D and 3D programs sharing one uniform
//! - [`geometry::QuadMesh`] - vertex and index buffers for the quad
//! - [`texture::QuadTexture`] - the image drawn on the quad
//! - [`overlay::OverlayRenderer`] - egui paint jobs on top of the scene

pub mod context;
pub mod geometry;
pub mod overlay;
pub mod pipeline;
pub mod shader;
pub mod texture;

pub use context::{ContextError, RenderContext};
pub use geometry::{QuadMesh, QUAD_INDICES, QUAD_VERTICES};
pub use overlay::{OverlayFrame, OverlayRenderer};
pub use pipeline::{ProgramKind, QuadPipeline, QuadVertex, TransformUniforms};
pub use shader::{ShaderError, ShaderLibrary, ShaderStage};
pub use texture::{QuadTexture, TextureError};

// Re-export the matrix model for convenience
pub use transform_lab_math::{MatrixMode, TransformMatrix};
