//! Font backend seam
//!
//! Layout and rendering talk to fonts only through [`FontBackend`]. The
//! default implementation is [`OpenTypeFont`]; tests use the synthetic font.

mod colr;
mod face;
mod variable;

pub use face::OpenTypeFont;
pub use variable::VariationAxis;

use tiny_skia::{ColorU8, Path, Transform};
use crate::shaping::{ShapeRequest, ShapedRun};
use crate::Result;

/// Fonts with more GPOS lookups than this embed tajweed coloring lookups
pub const TAJWEED_LOOKUP_THRESHOLD: u16 = 150;

/// First lookup index that carries a tajweed color in such fonts
pub const TAJWEED_LOOKUP_START: u16 = 152;

/// Glyph bounding box in font units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphBounds {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

/// Normalized justification-stretch coordinates for one glyph.
///
/// Values are in the `[-1, 1]` normalized design space of the first two
/// variation axes of the font. A value only lives for the duration of a
/// single paint call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisCoords {
    pub left: f32,
    pub right: f32,
}

impl AxisCoords {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// True when both axes sit at their default
    pub fn is_default(&self) -> bool {
        self.left == 0.0 && self.right == 0.0
    }
}

/// Color source of a painted outline layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerColor {
    /// Paint with the color resolved for the glyph
    Foreground,
    /// Paint with a color embedded in the font palette
    Palette(ColorU8),
}

/// Receives filled outline layers in font units
pub trait GlyphSink {
    /// Fill `path` after applying `transform` (font units, y up)
    fn fill(&mut self, path: &Path, transform: Transform, color: LayerColor);
}

/// Whether the font embeds tajweed coloring lookups.
///
/// Resolved once when a font is loaded and carried immutably afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TajweedCapability {
    /// Lookup index from which glyph colors come from tajweed rules
    pub lookup_start: Option<u16>,
}

impl TajweedCapability {
    /// Detect capability from the font's shaping lookup count
    pub fn detect(lookup_count: u16) -> Self {
        let lookup_start = (lookup_count > TAJWEED_LOOKUP_THRESHOLD).then_some(TAJWEED_LOOKUP_START);
        Self { lookup_start }
    }

    /// Font without embedded tajweed lookups
    pub fn none() -> Self {
        Self { lookup_start: None }
    }

    pub fn is_supported(&self) -> bool {
        self.lookup_start.is_some()
    }

    /// Check whether a lookup index colors glyphs with a tajweed rule
    pub fn is_tajweed_lookup(&self, lookup_index: u16) -> bool {
        self.lookup_start.is_some_and(|start| lookup_index >= start)
    }
}

/// Shaping and glyph access for one font
pub trait FontBackend {
    /// Units per em
    fn units_per_em(&self) -> u16;

    /// Number of GPOS lookups in the font
    fn lookup_count(&self) -> u16;

    /// Shape one line of right-to-left text
    fn shape(&self, request: &ShapeRequest<'_>) -> Result<ShapedRun>;

    /// Bounding box of a glyph, `None` for empty glyphs
    fn glyph_bounds(&self, glyph_id: u16) -> Option<GlyphBounds>;

    /// Emit the outline layers of a glyph into `sink`.
    ///
    /// `coords` carries the glyph's stretch coordinates when it is a
    /// stretched filler; they apply to this call only.
    fn paint_glyph(&self, glyph_id: u16, coords: Option<AxisCoords>, sink: &mut dyn GlyphSink);
}

impl<T: FontBackend + ?Sized> FontBackend for &T {
    fn units_per_em(&self) -> u16 {
        (**self).units_per_em()
    }

    fn lookup_count(&self) -> u16 {
        (**self).lookup_count()
    }

    fn shape(&self, request: &ShapeRequest<'_>) -> Result<ShapedRun> {
        (**self).shape(request)
    }

    fn glyph_bounds(&self, glyph_id: u16) -> Option<GlyphBounds> {
        (**self).glyph_bounds(glyph_id)
    }

    fn paint_glyph(&self, glyph_id: u16, coords: Option<AxisCoords>, sink: &mut dyn GlyphSink) {
        (**self).paint_glyph(glyph_id, coords, sink)
    }
}
