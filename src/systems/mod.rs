//! Application systems
//!
//! Window, rendering, and the per-frame glue between them.

mod render;
mod window;

pub use render::{RenderError, RenderSystem};
pub use window::{format_title, WindowError, WindowSystem};
