//! Text shaping module

mod run;
mod shaper;

pub use run::{GlyphProvenance, LineMetrics, ShapedGlyph, ShapedRun};
pub use shaper::{Direction, TextShaper};

/// One line of text to shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeRequest<'a> {
    /// Line text in logical order
    pub text: &'a str,
    /// Target width in font units the shaper may justify to
    pub justify_width: Option<f32>,
    /// Enable the font's tajweed coloring lookups
    pub tajweed: bool,
}

impl<'a> ShapeRequest<'a> {
    /// Shape at natural width with tajweed enabled
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            justify_width: None,
            tajweed: true,
        }
    }

    pub fn justify_to(mut self, width: f32) -> Self {
        self.justify_width = Some(width);
        self
    }

    pub fn tajweed(mut self, tajweed: bool) -> Self {
        self.tajweed = tajweed;
        self
    }
}
