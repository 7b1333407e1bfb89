//! Transform Lab mathematics
//!
//! This crate holds the matrix that the user edits and the small amount of
//! linear algebra needed to upload it and preview its effect on the CPU.
//!
//! ## Core Types
//!
//! - [`Vec4`] - homogeneous 4-component vector
//! - [`Mat4`] - column-major 4x4 matrix, as uploaded to the GPU
//! - [`MatrixMode`] - one of the four editing modes offered in the menu bar
//! - [`TransformMatrix`] - the edited matrix, stored in display (row-major) order

mod vec4;
pub mod mat4;
pub mod matrix_mode;
pub mod transform_matrix;

pub use vec4::Vec4;
pub use mat4::Mat4;
pub use matrix_mode::MatrixMode;
pub use transform_matrix::TransformMatrix;
