//! Caller-owned pixel output

use crate::Canvas;

/// Channel order of an output buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    #[default]
    Rgba8888,
    Bgra8888,
}

/// A caller-owned 32-bit premultiplied pixel buffer.
///
/// Rows are `stride` bytes apart; bytes past `width * 4` in a row are
/// padding and never written.
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    pub pixels: &'a mut [u8],
    pub width: u32,
    pub height: u32,
    /// Bytes per row
    pub stride: usize,
    pub format: PixelFormat,
}

impl<'a> PixelBuffer<'a> {
    pub fn new(pixels: &'a mut [u8], width: u32, height: u32, stride: usize, format: PixelFormat) -> Self {
        Self {
            pixels,
            width,
            height,
            stride,
            format,
        }
    }

    /// Tightly packed RGBA buffer
    pub fn rgba(pixels: &'a mut [u8], width: u32, height: u32) -> Self {
        Self::new(pixels, width, height, width as usize * 4, PixelFormat::Rgba8888)
    }

    fn row_bytes(&self) -> Option<usize> {
        (self.width as usize).checked_mul(4)
    }

    /// Bytes the buffer must hold for its dimensions and stride, `None`
    /// when that does not fit in `usize`
    pub fn required_len(&self) -> Option<usize> {
        if self.height == 0 {
            return Some(0);
        }
        self.stride
            .checked_mul(self.height as usize - 1)?
            .checked_add(self.row_bytes()?)
    }

    /// Non-empty, stride wide enough for a row, slice long enough
    pub fn is_valid(&self) -> bool {
        let (Some(row_bytes), Some(required)) = (self.row_bytes(), self.required_len()) else {
            return false;
        };
        self.width > 0 && self.height > 0 && self.stride >= row_bytes && self.pixels.len() >= required
    }

    /// Copy a same-sized canvas into the buffer in the buffer's channel
    /// order. Returns false and writes nothing on a size mismatch.
    pub fn write_canvas(&mut self, canvas: &Canvas) -> bool {
        if !self.is_valid() || canvas.width() != self.width || canvas.height() != self.height {
            tracing::debug!(
                width = self.width,
                height = self.height,
                stride = self.stride,
                canvas_width = canvas.width(),
                canvas_height = canvas.height(),
                "pixel buffer rejected"
            );
            return false;
        }
        let Some(row_bytes) = self.row_bytes() else {
            return false;
        };

        let src_rows = canvas.data().chunks_exact(row_bytes);
        let dst_rows = self.pixels.chunks_mut(self.stride);
        for (src, dst) in src_rows.zip(dst_rows) {
            let dst = &mut dst[..row_bytes];
            match self.format {
                PixelFormat::Rgba8888 => dst.copy_from_slice(src),
                PixelFormat::Bgra8888 => {
                    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                        d[0] = s[2];
                        d[1] = s[1];
                        d[2] = s[0];
                        d[3] = s[3];
                    }
                }
            }
        }
        true
    }
}
