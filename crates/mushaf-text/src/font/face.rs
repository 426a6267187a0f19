//! OpenType font backed by rustybuzz and ttf-parser

use tiny_skia::Transform;
use ttf_parser::GlyphId;

use super::colr::{foreground_sentinel, LayerPainter};
use super::{AxisCoords, FontBackend, GlyphBounds, GlyphSink, LayerColor, TajweedCapability, VariationAxis};
use crate::render::glyph_path;
use crate::shaping::{ShapeRequest, ShapedRun, TextShaper};
use crate::{Result, TextError};

/// A parsed OpenType font borrowing its data.
///
/// rustybuzz does not report which lookup produced a glyph, so every glyph
/// this backend shapes carries [`GlyphProvenance::Default`]. Tajweed colors
/// therefore never appear with it, even for fonts whose lookup count marks
/// them as tajweed capable. Justification widths are likewise ignored: runs
/// come back at natural width and only fillers are padded.
///
/// [`GlyphProvenance::Default`]: crate::GlyphProvenance::Default
pub struct OpenTypeFont<'a> {
    /// Face used for shaping
    shaping: rustybuzz::Face<'a>,
    /// Face used for outlines, bounds and color layers
    outlines: ttf_parser::Face<'a>,
    shaper: TextShaper,
    /// Glyph of U+0020, the inter-word filler
    filler_glyph: Option<u16>,
    lookup_count: u16,
    axes: Vec<VariationAxis>,
}

impl<'a> OpenTypeFont<'a> {
    /// Parse a font face from data
    pub fn parse(data: &'a [u8], index: u32) -> Result<Self> {
        let outlines = ttf_parser::Face::parse(data, index)
            .map_err(|e| TextError::FontParsing(e.to_string()))?;
        let shaping = rustybuzz::Face::from_slice(data, index)
            .ok_or_else(|| TextError::FontParsing("Failed to parse font for shaping".into()))?;

        let lookup_count = outlines
            .tables()
            .gpos
            .map(|gpos| gpos.lookups.len())
            .unwrap_or(0);
        let filler_glyph = outlines.glyph_index(' ').map(|id| id.0);
        let axes: Vec<VariationAxis> = outlines.variation_axes().into_iter().map(VariationAxis::from).collect();

        tracing::debug!(
            units_per_em = outlines.units_per_em(),
            lookup_count,
            axes = axes.len(),
            tajweed = TajweedCapability::detect(lookup_count).is_supported(),
            "loaded font"
        );

        Ok(Self {
            shaping,
            outlines,
            shaper: TextShaper::arabic(),
            filler_glyph,
            lookup_count,
            axes,
        })
    }

    /// Variation axes of the font
    pub fn axes(&self) -> &[VariationAxis] {
        &self.axes
    }

    /// Glyph used as the inter-word filler
    pub fn filler_glyph(&self) -> Option<u16> {
        self.filler_glyph
    }

    /// Get underlying ttf-parser face
    pub fn ttf_face(&self) -> &ttf_parser::Face<'a> {
        &self.outlines
    }

    /// Face with the glyph's stretch applied to the first two axes
    fn varied_face(&self, coords: Option<AxisCoords>) -> ttf_parser::Face<'a> {
        let mut face = self.outlines.clone();
        if let Some(coords) = coords.filter(|c| !c.is_default()) {
            for (axis, value) in self.axes.iter().zip([coords.left, coords.right]) {
                face.set_variation(axis.tag, axis.denormalize(value));
            }
        }
        face
    }
}

impl FontBackend for OpenTypeFont<'_> {
    fn units_per_em(&self) -> u16 {
        self.outlines.units_per_em()
    }

    fn lookup_count(&self) -> u16 {
        self.lookup_count
    }

    fn shape(&self, request: &ShapeRequest<'_>) -> Result<ShapedRun> {
        // Kashida justification is not available through rustybuzz;
        // runs come back at natural width and justify_width is ignored.
        Ok(self.shaper.shape(&self.shaping, request, self.filler_glyph))
    }

    fn glyph_bounds(&self, glyph_id: u16) -> Option<GlyphBounds> {
        self.outlines.glyph_bounding_box(GlyphId(glyph_id)).map(|rect| GlyphBounds {
            x_min: rect.x_min as f32,
            y_min: rect.y_min as f32,
            x_max: rect.x_max as f32,
            y_max: rect.y_max as f32,
        })
    }

    fn paint_glyph(&self, glyph_id: u16, coords: Option<AxisCoords>, sink: &mut dyn GlyphSink) {
        let face = self.varied_face(coords);
        let id = GlyphId(glyph_id);

        if face.is_color_glyph(id) {
            let mut painter = LayerPainter::new(&face, sink);
            face.paint_color_glyph(id, 0, foreground_sentinel(), &mut painter);
            if painter.layers > 0 {
                return;
            }
        }

        if let Some(path) = glyph_path(&face, glyph_id) {
            sink.fill(&path, Transform::identity(), LayerColor::Foreground);
        }
    }
}
