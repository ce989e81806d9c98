pub mod svg;

pub use svg::SvgCanvas;
