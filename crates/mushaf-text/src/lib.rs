//! Mushaf Text - font backend and shaping
//!
//! This crate provides the text side of the mushaf renderer:
//! - The `FontBackend` seam consumed by layout and rendering
//! - Arabic right-to-left shaping (rustybuzz - HarfBuzz port)
//! - Glyph outlines, variation axes and COLR color layers (ttf-parser)
//! - Line extent measurement for anti-overlap spacing
//! - A synthetic box-glyph font for tests (feature `synthetic`)

pub mod font;
pub mod shaping;
pub mod render;
pub mod extents;

#[cfg(any(test, feature = "synthetic"))]
pub mod synthetic;

pub use font::{
    AxisCoords, FontBackend, GlyphBounds, GlyphSink, LayerColor, OpenTypeFont,
    TajweedCapability, VariationAxis,
};
pub use shaping::{GlyphProvenance, LineMetrics, ShapeRequest, ShapedGlyph, ShapedRun, TextShaper};
pub use render::glyph_path;
pub use extents::{LineExtentMeasurer, LineExtents};

/// Text error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Failed to parse font: {0}")]
    FontParsing(String),
}

pub type Result<T> = std::result::Result<T, TextError>;
