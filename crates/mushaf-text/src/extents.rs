//! Vertical extents of a shaped line
//!
//! Reduces a line's glyphs to the highest point above and the lowest point
//! below the baseline. Page planning uses the page-wide maxima to pick a line
//! pitch at which neighbouring lines cannot collide.

use crate::font::FontBackend;
use crate::shaping::{ShapeRequest, ShapedRun};
use crate::Result;

/// Max ascent and descent of a line in font units, both non-negative
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineExtents {
    /// Distance from baseline to the highest ink
    pub max_ascent: f32,
    /// Distance from baseline to the lowest ink
    pub max_descent: f32,
}

impl LineExtents {
    pub fn new(max_ascent: f32, max_descent: f32) -> Self {
        Self { max_ascent, max_descent }
    }

    /// Ink height of the line
    pub fn height(&self) -> f32 {
        self.max_ascent + self.max_descent
    }

    /// Component-wise maximum
    pub fn union(self, other: Self) -> Self {
        Self {
            max_ascent: self.max_ascent.max(other.max_ascent),
            max_descent: self.max_descent.max(other.max_descent),
        }
    }
}

/// Measures line extents through a font backend
pub struct LineExtentMeasurer<'b, B: FontBackend + ?Sized> {
    backend: &'b B,
}

impl<'b, B: FontBackend + ?Sized> LineExtentMeasurer<'b, B> {
    pub fn new(backend: &'b B) -> Self {
        Self { backend }
    }

    /// Shape `request` and measure the result
    pub fn measure(&self, request: &ShapeRequest<'_>) -> Result<LineExtents> {
        let run = self.backend.shape(request)?;
        Ok(self.measure_run(&run))
    }

    /// Measure an already shaped run. Glyph y offsets move the ink.
    pub fn measure_run(&self, run: &ShapedRun) -> LineExtents {
        run.glyphs
            .iter()
            .filter_map(|glyph| {
                let bounds = self.backend.glyph_bounds(glyph.glyph_id)?;
                let dy = glyph.y_offset as f32;
                Some(LineExtents::new(bounds.y_max + dy, -(bounds.y_min + dy)))
            })
            .fold(LineExtents::default(), LineExtents::union)
    }
}
