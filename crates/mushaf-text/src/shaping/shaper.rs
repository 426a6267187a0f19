//! Text shaper using rustybuzz

use std::str::FromStr;

use rustybuzz::{Face, Feature, UnicodeBuffer};
use rustybuzz::ttf_parser::Tag;

use super::{GlyphProvenance, ShapeRequest, ShapedGlyph, ShapedRun};

/// Feature tag of the tajweed coloring lookups
const TAJWEED_FEATURE: &[u8; 4] = b"tjwd";

/// Text shaper using HarfBuzz (via rustybuzz)
#[derive(Debug, Clone)]
pub struct TextShaper {
    /// Direction for shaping
    direction: Direction,
    /// Script for shaping
    script: Option<rustybuzz::Script>,
    /// Language for shaping
    language: Option<rustybuzz::Language>,
}

/// Text direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    #[default]
    RightToLeft,
}

impl From<Direction> for rustybuzz::Direction {
    fn from(d: Direction) -> Self {
        match d {
            Direction::LeftToRight => rustybuzz::Direction::LeftToRight,
            Direction::RightToLeft => rustybuzz::Direction::RightToLeft,
        }
    }
}

impl TextShaper {
    /// Create a shaper with no script or language hint
    pub fn new() -> Self {
        Self {
            direction: Direction::RightToLeft,
            script: None,
            language: None,
        }
    }

    /// Right-to-left Arabic shaper
    pub fn arabic() -> Self {
        Self::new()
            .direction(Direction::RightToLeft)
            .script(rustybuzz::script::ARABIC)
            .language("ar")
    }

    /// Set text direction
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set script (for automatic feature selection)
    pub fn script(mut self, script: rustybuzz::Script) -> Self {
        self.script = Some(script);
        self
    }

    /// Set language (for automatic feature selection)
    pub fn language(mut self, language: &str) -> Self {
        self.language = rustybuzz::Language::from_str(language).ok();
        self
    }

    fn features(&self, request: &ShapeRequest<'_>) -> [Feature; 1] {
        let tag = Tag::from_bytes(TAJWEED_FEATURE);
        [Feature::new(tag, u32::from(request.tajweed), ..)]
    }

    /// Shape one line with a parsed face.
    ///
    /// Glyphs come back in visual order. `filler_glyph` marks inter-word
    /// glyphs so justification can pad them.
    pub fn shape(&self, face: &Face<'_>, request: &ShapeRequest<'_>, filler_glyph: Option<u16>) -> ShapedRun {
        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(request.text);
        buffer.set_direction(self.direction.into());

        if let Some(script) = self.script {
            buffer.set_script(script);
        }

        if let Some(ref lang) = self.language {
            buffer.set_language(lang.clone());
        }

        let output = rustybuzz::shape(face, &self.features(request), buffer);

        let glyphs: Vec<ShapedGlyph> = output
            .glyph_infos()
            .iter()
            .zip(output.glyph_positions())
            .map(|(info, pos)| {
                let glyph_id = info.glyph_id as u16;
                ShapedGlyph {
                    glyph_id,
                    x_offset: pos.x_offset,
                    y_offset: pos.y_offset,
                    x_advance: pos.x_advance,
                    y_advance: pos.y_advance,
                    cluster: info.cluster,
                    stretch: None,
                    is_filler: filler_glyph == Some(glyph_id),
                    provenance: GlyphProvenance::Default,
                }
            })
            .collect();

        ShapedRun::new(glyphs, face.units_per_em() as u16)
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}
