//! COLR color glyph layers
//!
//! Flattens a color glyph into filled outline layers. Gradients and
//! compositing modes are not rendered; their layers fall back to the
//! glyph's foreground color.

use tiny_skia::Transform;
use ttf_parser::colr::{self, ClipBox, CompositeMode, Paint};
use ttf_parser::{Face, GlyphId, RgbaColor};

use super::{GlyphSink, LayerColor};
use crate::render::glyph_path;

/// Stand-in foreground handed to ttf-parser so foreground layers can be told
/// apart from palette layers.
pub(crate) fn foreground_sentinel() -> RgbaColor {
    RgbaColor::new(0x01, 0x02, 0x03, 0xFF)
}

/// Collects COLR paint operations into sink fills
pub(crate) struct LayerPainter<'f, 'a, 's> {
    face: &'f Face<'a>,
    sink: &'s mut dyn GlyphSink,
    pending: Option<tiny_skia::Path>,
    clips: Vec<Option<tiny_skia::Path>>,
    transforms: Vec<Transform>,
    /// Number of filled layers
    pub(crate) layers: usize,
}

impl<'f, 'a, 's> LayerPainter<'f, 'a, 's> {
    pub(crate) fn new(face: &'f Face<'a>, sink: &'s mut dyn GlyphSink) -> Self {
        Self {
            face,
            sink,
            pending: None,
            clips: Vec::new(),
            transforms: Vec::new(),
            layers: 0,
        }
    }

    fn current_transform(&self) -> Transform {
        self.transforms.last().copied().unwrap_or_default()
    }

    fn current_clip(&self) -> Option<&tiny_skia::Path> {
        self.clips
            .iter()
            .rev()
            .find_map(|clip| clip.as_ref())
            .or(self.pending.as_ref())
    }
}

fn layer_color(color: RgbaColor) -> LayerColor {
    let sentinel = foreground_sentinel();
    if color.red == sentinel.red && color.green == sentinel.green && color.blue == sentinel.blue {
        LayerColor::Foreground
    } else {
        LayerColor::Palette(tiny_skia::ColorU8::from_rgba(color.red, color.green, color.blue, color.alpha))
    }
}

impl<'a> colr::Painter<'a> for LayerPainter<'_, '_, '_> {
    fn outline_glyph(&mut self, glyph_id: GlyphId) {
        self.pending = glyph_path(self.face, glyph_id.0);
    }

    fn paint(&mut self, paint: Paint<'a>) {
        let color = match paint {
            Paint::Solid(color) => layer_color(color),
            _ => LayerColor::Foreground,
        };
        let transform = self.current_transform();
        if let Some(path) = self.current_clip().cloned() {
            self.sink.fill(&path, transform, color);
            self.layers += 1;
        }
    }

    fn push_clip(&mut self) {
        let clip = self.pending.take();
        self.clips.push(clip);
    }

    fn push_clip_box(&mut self, _clipbox: ClipBox) {
        self.clips.push(None);
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }

    fn push_layer(&mut self, _mode: CompositeMode) {}

    fn pop_layer(&mut self) {}

    fn push_transform(&mut self, transform: ttf_parser::Transform) {
        let t = Transform::from_row(transform.a, transform.b, transform.c, transform.d, transform.e, transform.f);
        let combined = self.current_transform().pre_concat(t);
        self.transforms.push(combined);
    }

    fn pop_transform(&mut self) {
        self.transforms.pop();
    }
}
