//! Floor-plan renderers: SVG artifacts and a terminal preview.

pub mod ansi;
pub mod svg;

pub use ansi::{AnsiRenderer, PreviewSettings, display_width};
pub use svg::{SvgRenderer, SvgSettings};
