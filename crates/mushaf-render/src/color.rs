//! Glyph color resolution

use mushaf_text::{GlyphProvenance, LayerColor, TajweedCapability};

use crate::Color;

/// Foreground for a background: the explicit text color when given,
/// otherwise white on dark backgrounds and black on light ones.
pub fn default_foreground(background: Color, text_color: Option<Color>) -> Color {
    text_color.unwrap_or(if background.is_dark() { Color::WHITE } else { Color::BLACK })
}

/// Resolves glyphs and their color layers to display colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorResolver {
    foreground: Color,
    use_foreground: bool,
    tajweed: bool,
    capability: TajweedCapability,
}

impl ColorResolver {
    pub fn new(foreground: Color, capability: TajweedCapability) -> Self {
        Self {
            foreground,
            use_foreground: false,
            tajweed: true,
            capability,
        }
    }

    /// Paint everything, palette layers included, in the foreground
    pub fn use_foreground(mut self, use_foreground: bool) -> Self {
        self.use_foreground = use_foreground;
        self
    }

    pub fn tajweed(mut self, tajweed: bool) -> Self {
        self.tajweed = tajweed;
        self
    }

    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Color of a glyph from its provenance
    pub fn resolve(&self, provenance: GlyphProvenance) -> Color {
        if self.use_foreground {
            return self.foreground;
        }
        match provenance {
            GlyphProvenance::Lookup { index, color: [r, g, b] }
                if self.tajweed && self.capability.is_tajweed_lookup(index) =>
            {
                Color::rgb(r, g, b)
            }
            _ => self.foreground,
        }
    }

    /// Color of one layer of a glyph whose own color is `glyph_color`
    pub fn resolve_layer(&self, layer: LayerColor, glyph_color: Color) -> Color {
        match layer {
            LayerColor::Palette(c) if !self.use_foreground => Color::from(c),
            _ => glyph_color,
        }
    }
}
