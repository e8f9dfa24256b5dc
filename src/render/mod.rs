//! Rendering module: canvas, metrics, layout primitives, and assembly.

mod assembler;
mod canvas;
mod layout;
mod metrics;
pub mod theme;

pub use assembler::{render_full_plan, render_section, RenderedDocument, SectionStart};
pub use canvas::{DocumentBuilder, Rect};
pub use layout::{Cursor, LayoutEngine};
pub use metrics::{text_width, wrap_text, wrapped_line_count};
pub use theme::{Font, Rgb};
