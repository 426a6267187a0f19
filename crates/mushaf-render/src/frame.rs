//! Decorative frames behind surah title lines

use tiny_skia::{Path, PathBuilder, Transform};

use crate::{Canvas, Color};

/// Frame height as a fraction of the line pitch
const FRAME_HEIGHT: f32 = 0.9;
/// Slot center sits this far above the baseline, in pitch units
const SLOT_CENTER_ABOVE_BASELINE: f32 = 0.22;
/// Bulge depth relative to frame height
const BULGE: f32 = 0.35;
/// Border thickness relative to frame height
const BORDER: f32 = 0.08;
/// Ornament half-size relative to frame height
const ORNAMENT: f32 = 0.16;

/// Frame colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePalette {
    pub border: Color,
    pub fill: Color,
    pub ornament: Color,
}

impl FramePalette {
    pub const LIGHT: FramePalette = FramePalette {
        border: Color::rgb(0, 128, 128),
        fill: Color::WHITE,
        ornament: Color::rgb(0, 128, 128),
    };

    pub const DARK: FramePalette = FramePalette {
        border: Color::rgb(0, 188, 212),
        fill: Color::rgb(30, 30, 30),
        ornament: Color::rgb(0, 188, 212),
    };

    /// Teal on light backgrounds, cyan on dark ones
    pub fn for_background(background: Color) -> Self {
        if background.is_dark() { Self::DARK } else { Self::LIGHT }
    }
}

/// Draws the ornamental frame of a title line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorativeFrameDrawer {
    palette: FramePalette,
}

impl DecorativeFrameDrawer {
    pub fn new(palette: FramePalette) -> Self {
        Self { palette }
    }

    pub fn for_background(background: Color) -> Self {
        Self::new(FramePalette::for_background(background))
    }

    pub fn palette(&self) -> FramePalette {
        self.palette
    }

    /// Draw a frame spanning `left..right` for the line slot whose baseline
    /// is `baseline`.
    pub fn draw(&self, canvas: &mut Canvas, left: f32, right: f32, baseline: f32, pitch: f32) {
        let height = pitch * FRAME_HEIGHT;
        let center = baseline - pitch * SLOT_CENTER_ABOVE_BASELINE;
        if height <= 0.0 || right - left <= 2.0 * height * BULGE {
            return;
        }

        let top = center - height / 2.0;
        let bottom = center + height / 2.0;
        let bulge = height * BULGE;
        let inset = (height * BORDER).max(1.0);

        if let Some(outer) = bulged_rect(left, top, right, bottom, bulge) {
            canvas.fill_path(&outer, self.palette.border, Transform::identity());
        }
        if let Some(inner) = bulged_rect(left + inset, top + inset, right - inset, bottom - inset, bulge) {
            canvas.fill_path(&inner, self.palette.fill, Transform::identity());
        }

        let size = height * ORNAMENT;
        for cx in [left + bulge * 0.6, right - bulge * 0.6] {
            if let Some(diamond) = diamond(cx, center, size) {
                canvas.fill_path(&diamond, self.palette.ornament, Transform::identity());
            }
        }
    }
}

/// Rectangle whose vertical sides bow outwards to reach `left` and `right`
/// at mid-height.
fn bulged_rect(left: f32, top: f32, right: f32, bottom: f32, bulge: f32) -> Option<Path> {
    let handle = bulge * 4.0 / 3.0;
    let mut pb = PathBuilder::new();
    pb.move_to(left + bulge, top);
    pb.line_to(right - bulge, top);
    pb.cubic_to(right - bulge + handle, top, right - bulge + handle, bottom, right - bulge, bottom);
    pb.line_to(left + bulge, bottom);
    pb.cubic_to(left + bulge - handle, bottom, left + bulge - handle, top, left + bulge, top);
    pb.close();
    pb.finish()
}

fn diamond(cx: f32, cy: f32, size: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy - size);
    pb.line_to(cx + size, cy);
    pb.line_to(cx, cy + size);
    pb.line_to(cx - size, cy);
    pb.close();
    pb.finish()
}
