//! Shaped text run

use crate::font::AxisCoords;

/// Where a glyph's embedded color comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphProvenance {
    /// Produced without a coloring lookup
    #[default]
    Default,
    /// Last touched by a coloring lookup carrying an RGB color
    Lookup {
        /// GPOS lookup index
        index: u16,
        /// Embedded color
        color: [u8; 3],
    },
}

/// A shaped glyph with position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    /// Glyph ID in the font
    pub glyph_id: u16,
    /// X offset from current position (in font units)
    pub x_offset: i32,
    /// Y offset from current position (in font units)
    pub y_offset: i32,
    /// Horizontal advance (in font units)
    pub x_advance: i32,
    /// Vertical advance (in font units)
    pub y_advance: i32,
    /// Cluster index (byte offset in the source line)
    pub cluster: u32,
    /// Stretch coordinates when the shaper elongated this glyph
    pub stretch: Option<AxisCoords>,
    /// Inter-word filler (space) glyph
    pub is_filler: bool,
    /// Color provenance
    pub provenance: GlyphProvenance,
}

impl ShapedGlyph {
    /// Plain glyph with an advance and no offsets
    pub fn new(glyph_id: u16, cluster: u32, x_advance: i32) -> Self {
        Self {
            glyph_id,
            x_offset: 0,
            y_offset: 0,
            x_advance,
            y_advance: 0,
            cluster,
            stretch: None,
            is_filler: false,
            provenance: GlyphProvenance::Default,
        }
    }
}

/// Width summary of a shaped line, in font units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
    /// Sum of all advances
    pub advance_width: f32,
    /// Sum of advances excluding fillers
    pub text_width: f32,
    /// Number of filler glyphs
    pub filler_count: usize,
}

/// A run of shaped glyphs in visual order (leftmost first)
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedRun {
    /// The shaped glyphs
    pub glyphs: Vec<ShapedGlyph>,
    /// Units per em from the font
    pub units_per_em: u16,
}

impl ShapedRun {
    /// Create a new shaped run
    pub fn new(glyphs: Vec<ShapedGlyph>, units_per_em: u16) -> Self {
        Self { glyphs, units_per_em }
    }

    /// Total advance in font units
    pub fn advance_width(&self) -> f32 {
        self.glyphs.iter().map(|g| g.x_advance as f32).sum()
    }

    pub fn line_metrics(&self) -> LineMetrics {
        self.glyphs.iter().fold(LineMetrics::default(), |mut m, g| {
            let advance = g.x_advance as f32;
            m.advance_width += advance;
            if g.is_filler {
                m.filler_count += 1;
            } else {
                m.text_width += advance;
            }
            m
        })
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
