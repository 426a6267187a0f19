//! Mushaf Render - Painting Engine
//!
//! CPU rendering of planned lines using tiny-skia.
//!
//! This crate provides:
//! - Canvas backed by a tiny-skia Pixmap
//! - Output into caller-owned RGBA/BGRA pixel buffers
//! - Glyph color resolution (tajweed, palette layers, foreground)
//! - Right-to-left glyph positioning and painting
//! - Decorative frames behind surah titles

mod buffer;
mod canvas;
mod color;
mod frame;
mod positioner;

pub use buffer::{PixelBuffer, PixelFormat};
pub use canvas::Canvas;
pub use color::{default_foreground, ColorResolver};
pub use frame::{DecorativeFrameDrawer, FramePalette};
pub use positioner::{GlyphPositioner, LinePlacement, PlacedGlyph};

/// Color (RGBA)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create from a packed `0xRRGGBBAA` value
    pub const fn from_rgba_u32(value: u32) -> Self {
        Self {
            r: (value >> 24) as u8,
            g: (value >> 16) as u8,
            b: (value >> 8) as u8,
            a: value as u8,
        }
    }

    /// Pack into `0xRRGGBBAA`
    pub const fn to_rgba_u32(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    /// Create from hex string (e.g., "#ff0000" or "#ff000080")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::rgb(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Color::rgba(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Perceived brightness in `[0, 1]`
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }

    pub fn is_dark(&self) -> bool {
        self.luminance() < 0.5
    }

    pub(crate) fn to_tiny_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl From<tiny_skia::ColorU8> for Color {
    fn from(c: tiny_skia::ColorU8) -> Self {
        Self::rgba(c.red(), c.green(), c.blue(), c.alpha())
    }
}
