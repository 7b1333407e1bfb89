//! Rendering pipeline components
//!
//! Two programs (2D and 3D) draw the same quad with the same texture and
//! the same transform uniform.

pub mod types;
pub mod quad_pipeline;

pub use types::{ProgramKind, QuadVertex, TransformUniforms};
pub use quad_pipeline::QuadPipeline;
