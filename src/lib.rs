//! Transform Lab
//!
//! Library half of the demo binary: configuration, the window/render/UI
//! systems, and input mapping. `main.rs` wires them into a winit
//! application.

pub mod config;
pub mod input;
pub mod systems;
pub mod ui;
