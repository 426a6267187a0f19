//! Glyph outlines as tiny-skia paths
//!
//! Paths stay in font units with the y axis pointing up; the renderer owns
//! the flip and the scale to pixels.

use ttf_parser::{Face, GlyphId, OutlineBuilder};

/// Outline a glyph into a path, `None` for glyphs without contours
pub fn glyph_path(face: &Face<'_>, glyph_id: u16) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    face.outline_glyph(GlyphId(glyph_id), &mut builder)?;
    builder.finish()
}

/// Path builder that converts ttf-parser outlines to tiny-skia paths
pub(crate) struct PathBuilder {
    builder: tiny_skia::PathBuilder,
}

impl PathBuilder {
    pub(crate) fn new() -> Self {
        Self {
            builder: tiny_skia::PathBuilder::new(),
        }
    }

    pub(crate) fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
