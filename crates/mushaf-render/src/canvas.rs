//! Canvas backed by a tiny-skia Pixmap

use tiny_skia::{FillRule, Paint, Path, Pixmap, Rect, Transform};

use crate::Color;

/// Pixel canvas
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Create a new canvas, `None` for zero or oversized dimensions
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill the whole canvas
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_tiny_skia());
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.to_tiny_skia());
        paint.anti_alias = true;
        paint
    }

    /// Fill a rectangle
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        if let Some(rect) = Rect::from_xywh(x, y, width, height) {
            self.pixmap
                .fill_rect(rect, &Self::paint(color), Transform::identity(), None);
        }
    }

    /// Fill a path after applying `transform`
    pub fn fill_path(&mut self, path: &Path, color: Color, transform: Transform) {
        if color.a == 0 {
            return;
        }
        self.pixmap
            .fill_path(path, &Self::paint(color), FillRule::Winding, transform, None);
    }

    /// Demultiplied color of a pixel
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()))
    }

    /// Premultiplied RGBA rows, `width * 4` bytes each
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }
}
