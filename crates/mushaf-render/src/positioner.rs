//! Right-to-left glyph positioning
//!
//! Walks a shaped run from its last glyph to its first, moving the pen
//! leftwards from the line's right edge. Glyph offsets displace a glyph but
//! never the pen.

use mushaf_text::{AxisCoords, FontBackend, GlyphSink, LayerColor, ShapedRun};
use tiny_skia::{Path, Transform};

use crate::{Canvas, Color, ColorResolver};

/// Where and how large a line is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePlacement {
    /// Pixel x where the pen starts (right side of the line)
    pub pen_start: f32,
    /// Baseline in pixels
    pub baseline: f32,
    /// Pixels per font unit, including any shrink
    pub scale: f32,
    /// Padded advance for filler glyphs, in font units
    pub filler_advance: Option<f32>,
}

/// A glyph with its final pixel origin and color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub glyph_id: u16,
    /// Pixel x of the glyph origin
    pub x: f32,
    /// Pixel y of the glyph origin
    pub y: f32,
    pub color: Color,
    /// Stretch coordinates for this glyph's paint call only
    pub stretch: Option<AxisCoords>,
}

impl PlacedGlyph {
    /// Font units (y up) to canvas pixels (y down)
    pub fn transform(&self, scale: f32) -> Transform {
        Transform::from_row(scale, 0.0, 0.0, -scale, self.x, self.y)
    }
}

/// Sink that fills glyph layers into a canvas
struct CanvasSink<'c, 'r> {
    canvas: &'c mut Canvas,
    resolver: &'r ColorResolver,
    base: Transform,
    glyph_color: Color,
}

impl GlyphSink for CanvasSink<'_, '_> {
    fn fill(&mut self, path: &Path, transform: Transform, color: LayerColor) {
        let color = self.resolver.resolve_layer(color, self.glyph_color);
        self.canvas.fill_path(path, color, self.base.pre_concat(transform));
    }
}

/// Positions and paints the glyphs of one line
pub struct GlyphPositioner<'r> {
    resolver: &'r ColorResolver,
}

impl<'r> GlyphPositioner<'r> {
    pub fn new(resolver: &'r ColorResolver) -> Self {
        Self { resolver }
    }

    /// Compute glyph origins and colors in painting order
    pub fn place(&self, run: &ShapedRun, placement: &LinePlacement) -> Vec<PlacedGlyph> {
        let mut pen = 0.0f32;
        run.glyphs
            .iter()
            .rev()
            .map(|glyph| {
                let advance = match placement.filler_advance {
                    Some(padded) if glyph.is_filler => padded,
                    _ => glyph.x_advance as f32,
                };
                pen -= advance;

                let x_units = pen + glyph.x_offset as f32;
                let y_units = glyph.y_offset as f32;
                PlacedGlyph {
                    glyph_id: glyph.glyph_id,
                    x: placement.pen_start + x_units * placement.scale,
                    y: placement.baseline - y_units * placement.scale,
                    color: self.resolver.resolve(glyph.provenance),
                    stretch: glyph.stretch,
                }
            })
            .collect()
    }

    /// Place and paint a line. Returns the placed glyphs.
    pub fn paint<B: FontBackend + ?Sized>(
        &self,
        backend: &B,
        canvas: &mut Canvas,
        run: &ShapedRun,
        placement: &LinePlacement,
    ) -> Vec<PlacedGlyph> {
        let placed = self.place(run, placement);
        for glyph in &placed {
            let mut sink = CanvasSink {
                canvas: &mut *canvas,
                resolver: self.resolver,
                base: glyph.transform(placement.scale),
                glyph_color: glyph.color,
            };
            backend.paint_glyph(glyph.glyph_id, glyph.stretch, &mut sink);
        }
        tracing::trace!(
            glyphs = placed.len(),
            pen_start = placement.pen_start,
            baseline = placement.baseline,
            scale = placement.scale,
            "painted line"
        );
        placed
    }
}
