//! 描画アダプタ（端末 / SVG）

pub mod svg;
pub mod terminal;

pub use svg::SvgRenderer;
pub use terminal::TerminalRenderer;
