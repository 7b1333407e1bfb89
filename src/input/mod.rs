//! Input handling
//!
//! Maps raw winit events to application actions.

mod input_mapper;

pub use input_mapper::{InputAction, InputMapper};
