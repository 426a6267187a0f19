//! Deterministic box-glyph font for tests
//!
//! Every glyph is a rectangle in a 1000 unit em. A handful of characters
//! have special behavior so layout and color paths can be exercised without
//! shipping binary font fixtures:
//!
//! | char        | glyph | behavior                                        |
//! |-------------|-------|-------------------------------------------------|
//! | space       | 3     | filler, advance 250, no ink                     |
//! | `ـ` tatweel | 4     | advance 300, stretched when justification asked |
//! | `ن`         | 5     | tajweed lookup 160 colored when tajweed is on   |
//! | `ي`         | 6     | descends to -450                                |
//! | `ل` `ٱ`     | 7     | rises to 1100                                   |
//! | `#`         | 8     | color glyph: palette layer plus foreground      |
//!
//! Everything else maps to glyph `10 + codepoint % 1000` with advance 500.

use tiny_skia::{ColorU8, PathBuilder, Rect, Transform};

use crate::font::{AxisCoords, FontBackend, GlyphBounds, GlyphSink, LayerColor};
use crate::shaping::{GlyphProvenance, ShapeRequest, ShapedGlyph, ShapedRun};
use crate::Result;

pub const UNITS_PER_EM: u16 = 1000;
pub const FILLER_GLYPH: u16 = 3;
pub const FILLER_ADVANCE: i32 = 250;
pub const TATWEEL_GLYPH: u16 = 4;
pub const TATWEEL_ADVANCE: i32 = 300;
/// Extra advance of a tatweel per unit of left-axis stretch
pub const TATWEEL_STRETCH: i32 = 400;
/// Left-axis stretch applied to tatweels when justification is requested
pub const TATWEEL_STRETCH_LEFT: f32 = 0.5;
pub const TAJWEED_GLYPH: u16 = 5;
pub const TAJWEED_LOOKUP: u16 = 160;
pub const TAJWEED_COLOR: [u8; 3] = [0x00, 0x9E, 0x49];
pub const DEEP_GLYPH: u16 = 6;
pub const TALL_GLYPH: u16 = 7;
pub const COLOR_GLYPH: u16 = 8;
pub const COLOR_GLYPH_PALETTE: ColorU8 = ColorU8::from_rgba(200, 0, 0, 255);
pub const LETTER_ADVANCE: i32 = 500;

const LETTER_BOUNDS: GlyphBounds = GlyphBounds {
    x_min: 40.0,
    y_min: -120.0,
    x_max: 460.0,
    y_max: 700.0,
};

/// Synthetic font with a configurable GPOS lookup count
#[derive(Debug, Clone)]
pub struct SyntheticFont {
    lookup_count: u16,
}

impl SyntheticFont {
    /// Font without tajweed lookups
    pub fn new() -> Self {
        Self { lookup_count: 40 }
    }

    /// Font reporting `lookup_count` GPOS lookups
    pub fn with_lookup_count(lookup_count: u16) -> Self {
        Self { lookup_count }
    }

    /// Glyph id a character maps to
    pub fn glyph_for(c: char) -> u16 {
        match c {
            ' ' => FILLER_GLYPH,
            'ـ' => TATWEEL_GLYPH,
            'ن' => TAJWEED_GLYPH,
            'ي' => DEEP_GLYPH,
            'ل' | 'ٱ' => TALL_GLYPH,
            '#' => COLOR_GLYPH,
            other => 10 + (other as u32 % 1000) as u16,
        }
    }

    fn shape_char(c: char, cluster: u32, request: &ShapeRequest<'_>) -> ShapedGlyph {
        let glyph_id = Self::glyph_for(c);
        match glyph_id {
            FILLER_GLYPH => ShapedGlyph {
                is_filler: true,
                ..ShapedGlyph::new(glyph_id, cluster, FILLER_ADVANCE)
            },
            TATWEEL_GLYPH if request.justify_width.is_some() => {
                let stretch = AxisCoords::new(TATWEEL_STRETCH_LEFT, 0.0);
                ShapedGlyph {
                    stretch: Some(stretch),
                    ..ShapedGlyph::new(glyph_id, cluster, stretched_advance(Some(stretch)))
                }
            }
            TATWEEL_GLYPH => ShapedGlyph::new(glyph_id, cluster, TATWEEL_ADVANCE),
            TAJWEED_GLYPH if request.tajweed => ShapedGlyph {
                provenance: GlyphProvenance::Lookup {
                    index: TAJWEED_LOOKUP,
                    color: TAJWEED_COLOR,
                },
                ..ShapedGlyph::new(glyph_id, cluster, LETTER_ADVANCE)
            },
            _ => ShapedGlyph::new(glyph_id, cluster, LETTER_ADVANCE),
        }
    }
}

impl Default for SyntheticFont {
    fn default() -> Self {
        Self::new()
    }
}

fn stretched_advance(coords: Option<AxisCoords>) -> i32 {
    let left = coords.map_or(0.0, |c| c.left);
    TATWEEL_ADVANCE + (TATWEEL_STRETCH as f32 * left).round() as i32
}

fn rect_path(bounds: GlyphBounds) -> Option<tiny_skia::Path> {
    let rect = Rect::from_ltrb(bounds.x_min, bounds.y_min, bounds.x_max, bounds.y_max)?;
    Some(PathBuilder::from_rect(rect))
}

impl FontBackend for SyntheticFont {
    fn units_per_em(&self) -> u16 {
        UNITS_PER_EM
    }

    fn lookup_count(&self) -> u16 {
        self.lookup_count
    }

    fn shape(&self, request: &ShapeRequest<'_>) -> Result<ShapedRun> {
        let mut glyphs: Vec<ShapedGlyph> = request
            .text
            .char_indices()
            .map(|(i, c)| Self::shape_char(c, i as u32, request))
            .collect();
        glyphs.reverse();
        Ok(ShapedRun::new(glyphs, UNITS_PER_EM))
    }

    fn glyph_bounds(&self, glyph_id: u16) -> Option<GlyphBounds> {
        match glyph_id {
            FILLER_GLYPH => None,
            TATWEEL_GLYPH => Some(GlyphBounds {
                x_min: 0.0,
                y_min: 0.0,
                x_max: TATWEEL_ADVANCE as f32,
                y_max: 80.0,
            }),
            DEEP_GLYPH => Some(GlyphBounds {
                y_min: -450.0,
                y_max: 500.0,
                ..LETTER_BOUNDS
            }),
            TALL_GLYPH => Some(GlyphBounds {
                y_max: 1100.0,
                ..LETTER_BOUNDS
            }),
            0..=2 | 9 => None,
            _ => Some(LETTER_BOUNDS),
        }
    }

    fn paint_glyph(&self, glyph_id: u16, coords: Option<AxisCoords>, sink: &mut dyn GlyphSink) {
        let Some(mut bounds) = self.glyph_bounds(glyph_id) else {
            return;
        };

        if glyph_id == TATWEEL_GLYPH {
            bounds.x_max = stretched_advance(coords) as f32;
        }

        if glyph_id == COLOR_GLYPH {
            if let Some(path) = rect_path(bounds) {
                sink.fill(&path, Transform::identity(), LayerColor::Palette(COLOR_GLYPH_PALETTE));
            }
            let inner = GlyphBounds {
                x_min: 150.0,
                y_min: 100.0,
                x_max: 350.0,
                y_max: 500.0,
            };
            if let Some(path) = rect_path(inner) {
                sink.fill(&path, Transform::identity(), LayerColor::Foreground);
            }
            return;
        }

        if let Some(path) = rect_path(bounds) {
            sink.fill(&path, Transform::identity(), LayerColor::Foreground);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        fills: Vec<(tiny_skia::Rect, LayerColor)>,
    }

    impl GlyphSink for Recorder {
        fn fill(&mut self, path: &tiny_skia::Path, _transform: Transform, color: LayerColor) {
            self.fills.push((path.bounds(), color));
        }
    }

    #[test]
    fn test_output_is_visual_order() {
        let run = SyntheticFont::new().shape(&ShapeRequest::new("بت")).unwrap();
        assert_eq!(run.glyphs[0].cluster, 2);
        assert_eq!(run.glyphs[1].cluster, 0);
    }

    #[test]
    fn test_fillers_marked() {
        let run = SyntheticFont::new().shape(&ShapeRequest::new("ب ب")).unwrap();
        let m = run.line_metrics();
        assert_eq!(m.filler_count, 1);
        assert_eq!(m.advance_width, 1250.0);
        assert_eq!(m.text_width, 1000.0);
    }

    #[test]
    fn test_tatweel_stretches_only_when_justifying() {
        let font = SyntheticFont::new();
        let natural = font.shape(&ShapeRequest::new("ـ")).unwrap();
        assert_eq!(natural.glyphs[0].x_advance, 300);
        assert!(natural.glyphs[0].stretch.is_none());

        let justified = font.shape(&ShapeRequest::new("ـ").justify_to(5000.0)).unwrap();
        assert_eq!(justified.glyphs[0].x_advance, 500);
        assert_eq!(justified.glyphs[0].stretch, Some(AxisCoords::new(0.5, 0.0)));
    }

    #[test]
    fn test_tajweed_provenance_follows_request() {
        let font = SyntheticFont::new();
        let on = font.shape(&ShapeRequest::new("ن")).unwrap();
        assert!(matches!(on.glyphs[0].provenance, GlyphProvenance::Lookup { index: 160, .. }));

        let off = font.shape(&ShapeRequest::new("ن").tajweed(false)).unwrap();
        assert_eq!(off.glyphs[0].provenance, GlyphProvenance::Default);
    }

    #[test]
    fn test_stretched_tatweel_paints_wider() {
        let font = SyntheticFont::new();
        let mut rec = Recorder { fills: Vec::new() };
        font.paint_glyph(TATWEEL_GLYPH, Some(AxisCoords::new(0.5, 0.0)), &mut rec);
        font.paint_glyph(TATWEEL_GLYPH, None, &mut rec);
        assert_eq!(rec.fills[0].0.width(), 500.0);
        assert_eq!(rec.fills[1].0.width(), 300.0);
    }

    #[test]
    fn test_color_glyph_layers() {
        let font = SyntheticFont::new();
        let mut rec = Recorder { fills: Vec::new() };
        font.paint_glyph(COLOR_GLYPH, None, &mut rec);
        assert_eq!(rec.fills.len(), 2);
        assert_eq!(rec.fills[0].1, LayerColor::Palette(COLOR_GLYPH_PALETTE));
        assert_eq!(rec.fills[1].1, LayerColor::Foreground);
    }

    #[test]
    fn test_filler_paints_nothing() {
        let mut rec = Recorder { fills: Vec::new() };
        SyntheticFont::new().paint_glyph(FILLER_GLYPH, None, &mut rec);
        assert!(rec.fills.is_empty());
    }
}
