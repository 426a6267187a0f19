//! Planned page layout

use crate::corpus::{Justification, LineRole};
use crate::geometry::PageGeometry;
use crate::justify::LineFit;

/// Placement of one line on a planned page
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    /// Line slot, 0-based from the top
    pub slot: usize,
    pub role: LineRole,
    pub justification: Justification,
    /// Baseline in pixels from the top
    pub baseline: f32,
    /// Right edge of the line's target span in pixels
    pub right_edge: f32,
    pub fit: LineFit,
}

impl LineLayout {
    /// Pixel x of the first (rightmost) glyph's pen start
    pub fn pen_start(&self, geometry: &PageGeometry) -> f32 {
        self.right_edge - self.fit.lead * geometry.scale
    }

    /// Pixel width actually covered by the line's glyphs
    pub fn content_width(&self, geometry: &PageGeometry) -> f32 {
        self.fit.content_width * geometry.scale
    }
}

/// Full layout of a page, without pixels
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_index: usize,
    pub geometry: PageGeometry,
    pub lines: Vec<LineLayout>,
}

impl PageLayout {
    pub fn line(&self, slot: usize) -> Option<&LineLayout> {
        self.lines.get(slot)
    }

    /// Lines with a given role
    pub fn lines_with_role(&self, role: LineRole) -> impl Iterator<Item = &LineLayout> + '_ {
        self.lines.iter().filter(move |line| line.role == role)
    }
}
