//! Page geometry planning
//!
//! Derives the font size, margins, column width, line pitch and first
//! baseline for one draw call. The pitch comes from measuring the ink of the
//! whole page, so adjacent lines never overlap as long as the canvas is tall
//! enough to hold fifteen of them.

use mushaf_text::LineExtents;

use crate::tuning::LayoutTuning;

/// Line slots on every page
pub const LINES_PER_PAGE: usize = 15;

/// Page width is divided into this many glyph columns for font sizing
const FONT_COLUMNS: f32 = 17.0;
const FONT_FILL: f32 = 0.9;
const MARGIN_DIVISOR: f32 = 42.5;
/// First baseline sits this far into the first line slot
const BASELINE_FRACTION: f32 = 0.72;
const MIN_FONT_SCALE: f32 = 0.5;
const MAX_FONT_SCALE: f32 = 2.0;

/// Geometry of one page render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Font size in pixels
    pub font_size: f32,
    /// Horizontal margin in pixels
    pub margin: f32,
    /// Pixels per font unit
    pub scale: f32,
    /// Column width in font units
    pub column_width: f32,
    /// Distance between baselines in pixels
    pub pitch: f32,
    /// First baseline in pixels from the top
    pub baseline_start: f32,
    /// Page-wide ink extents, absent when the pitch was given explicitly
    pub extents: Option<LineExtents>,
    /// The measured pitch exceeded the `height / 15` ceiling
    pub pitch_clamped: bool,
}

impl PageGeometry {
    /// Baseline of a line slot in pixels
    pub fn baseline(&self, slot: usize) -> f32 {
        self.baseline_start + slot as f32 * self.pitch
    }

    /// Largest pitch at which fifteen slots fit the canvas
    pub fn pitch_ceiling(&self) -> f32 {
        self.height as f32 / LINES_PER_PAGE as f32
    }

    /// Deepest descent on the page in pixels
    pub fn worst_descent(&self) -> f32 {
        self.extents.map_or(0.0, |e| e.max_descent * self.scale)
    }

    /// Right edge in pixels of a line whose target is `target_width` font
    /// units. Narrow lines are centered in the column.
    pub fn line_right_edge(&self, target_width: f32) -> f32 {
        let inset = (self.column_width - target_width).max(0.0) / 2.0;
        self.width as f32 - self.margin - inset * self.scale
    }

    /// Whether the last slot's ink stays on the canvas
    pub fn fits(&self) -> bool {
        self.baseline(LINES_PER_PAGE - 1) + self.worst_descent() <= self.height as f32
    }
}

/// Plans page geometry from the canvas size and render settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometryPlanner {
    font_scale: f32,
    font_size: Option<f32>,
    line_pitch: Option<f32>,
    top_margin_lines: f32,
    tuning: LayoutTuning,
}

impl PageGeometryPlanner {
    pub fn new(tuning: LayoutTuning) -> Self {
        Self {
            font_scale: 1.0,
            font_size: None,
            line_pitch: None,
            top_margin_lines: 0.0,
            tuning,
        }
    }

    /// Font scale, clamped to `[0.5, 2.0]`
    pub fn font_scale(mut self, scale: f32) -> Self {
        self.font_scale = if scale.is_finite() {
            scale.clamp(MIN_FONT_SCALE, MAX_FONT_SCALE)
        } else {
            1.0
        };
        self
    }

    /// Explicit font size in pixels, used verbatim when positive
    pub fn font_size(mut self, size: Option<f32>) -> Self {
        self.font_size = size.filter(|s| s.is_finite() && *s > 0.0);
        self
    }

    /// Explicit pitch in pixels, skips measurement when positive
    pub fn line_pitch(mut self, pitch: Option<f32>) -> Self {
        self.line_pitch = pitch.filter(|p| p.is_finite() && *p > 0.0);
        self
    }

    /// Extra space above the first line, in pitch units
    pub fn top_margin_lines(mut self, lines: Option<f32>) -> Self {
        self.top_margin_lines = lines.filter(|l| l.is_finite()).unwrap_or(0.0);
        self
    }

    /// Font size in pixels for a canvas width
    pub fn font_size_for(&self, width: u32) -> f32 {
        self.font_size
            .unwrap_or_else(|| (width as f32 / FONT_COLUMNS * FONT_FILL * self.font_scale).round())
    }

    /// Horizontal margin in pixels for a canvas width
    pub fn margin_for(width: u32) -> f32 {
        (width as f32 / MARGIN_DIVISOR).round()
    }

    /// Plan a page.
    ///
    /// `measure` receives the column width in font units and returns the
    /// page-wide ink extents; it is only called when no explicit pitch is set.
    pub fn plan<F>(&self, width: u32, height: u32, units_per_em: u16, measure: F) -> PageGeometry
    where
        F: FnOnce(f32) -> LineExtents,
    {
        let font_size = self.font_size_for(width);
        let margin = Self::margin_for(width);
        let scale = if units_per_em > 0 {
            font_size / units_per_em as f32
        } else {
            0.0
        };
        let column_width = if scale > 0.0 {
            (width as f32 - 2.0 * margin).max(0.0) / scale
        } else {
            0.0
        };
        let ceiling = height as f32 / LINES_PER_PAGE as f32;

        let (pitch, extents, pitch_clamped) = match self.line_pitch {
            Some(pitch) => (pitch, None, false),
            None => {
                let extents = measure(column_width);
                let required = extents.height() * scale * (1.0 + self.tuning.pitch_inflation);
                if required <= 0.0 {
                    (ceiling, Some(extents), false)
                } else if required > ceiling {
                    tracing::warn!(required, ceiling, "measured pitch exceeds page height, lines may overlap");
                    (ceiling, Some(extents), true)
                } else {
                    (required, Some(extents), false)
                }
            }
        };

        let baseline_start = (pitch * BASELINE_FRACTION).round() + self.top_margin_lines * pitch;

        let geometry = PageGeometry {
            width,
            height,
            font_size,
            margin,
            scale,
            column_width,
            pitch,
            baseline_start,
            extents,
            pitch_clamped,
        };

        if !geometry.fits() {
            tracing::warn!(
                last_baseline = geometry.baseline(LINES_PER_PAGE - 1),
                descent = geometry.worst_descent(),
                height,
                "last line overflows the canvas"
            );
        }

        tracing::debug!(font_size, margin, pitch, baseline_start, column_width, "planned page geometry");

        geometry
    }
}

impl Default for PageGeometryPlanner {
    fn default() -> Self {
        Self::new(LayoutTuning::default())
    }
}
