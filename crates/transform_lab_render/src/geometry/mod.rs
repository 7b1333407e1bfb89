//! Geometry uploaded to the GPU

mod quad;

pub use quad::{QuadMesh, QUAD_INDICES, QUAD_VERTICES};
