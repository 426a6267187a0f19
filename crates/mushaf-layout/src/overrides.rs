//! Sparse per-line width overrides
//!
//! A handful of lines are set narrower than the page column: the fan-shaped
//! opening pages and the short final lines of several closing pages. The
//! table is filled once while the corpus is classified and read-only after.

use std::collections::HashMap;

/// Fan diameter as a fraction of the column width
const FAN_DIAMETER: f64 = 0.9;
const FAN_START_ANGLE: f64 = 30.0;
const FAN_END_ANGLE: f64 = 22.5;
/// Angular steps across the lines below the opening title
const FAN_STEPS: f64 = 6.0;

/// Fixed narrow lines on closing pages, `((page, line), ratio)`
const CLOSING_PAGE_WIDTHS: [((usize, usize), f32); 13] = [
    ((585, 0), 0.81),
    ((592, 1), 0.81),
    ((593, 4), 0.63),
    ((599, 9), 0.63),
    ((601, 4), 0.63),
    ((601, 10), 0.9),
    ((601, 14), 0.53),
    ((602, 9), 0.66),
    ((602, 14), 0.60),
    ((603, 3), 0.55),
    ((603, 8), 0.55),
    ((603, 13), 0.675),
    ((603, 14), 0.5),
];

/// Width ratio of line `line_index` (1-based below the title) on an
/// opening page.
pub fn fan_width_ratio(line_index: usize) -> f32 {
    let step = (180.0 - (FAN_START_ANGLE + FAN_END_ANGLE)) / FAN_STEPS;
    let degrees = FAN_START_ANGLE + (line_index as f64 - 1.0) * step;
    (FAN_DIAMETER * degrees.to_radians().sin()) as f32
}

/// Immutable `(page, line) -> ratio` lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidthOverrides {
    ratios: HashMap<(usize, usize), f32>,
}

impl WidthOverrides {
    /// Table holding only the closing-page entries
    pub fn closing_pages() -> Self {
        Self {
            ratios: CLOSING_PAGE_WIDTHS.into_iter().collect(),
        }
    }

    pub(crate) fn insert(&mut self, page: usize, line: usize, ratio: f32) {
        self.ratios.insert((page, line), ratio);
    }

    /// Width ratio for a line, `None` when it uses the full column
    pub fn get(&self, page: usize, line: usize) -> Option<f32> {
        self.ratios.get(&(page, line)).copied()
    }

    /// Target width of a line given the page column width
    pub fn target_width(&self, page: usize, line: usize, column_width: f32) -> f32 {
        self.get(page, line).map_or(column_width, |ratio| column_width * ratio)
    }

    /// Number of overridden lines
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}
