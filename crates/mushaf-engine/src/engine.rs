//! Engine - Main entry point

use std::sync::Arc;

use mushaf_layout::{
    Corpus, CorpusError, Justification, JustificationDecider, Line, LineFit, LineLayout, LineRole,
    Page, PageGeometryPlanner, PageLayout, PAGE_COUNT,
};
use mushaf_render::{
    Canvas, ColorResolver, DecorativeFrameDrawer, GlyphPositioner, LinePlacement, PixelBuffer,
};
use mushaf_text::{
    FontBackend, LineExtentMeasurer, LineExtents, OpenTypeFont, ShapeRequest, ShapedRun,
    TajweedCapability, TextError,
};

use crate::{RenderConfig, Result, TextConfig};

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Font error: {0}")]
    Font(#[from] TextError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),
}

/// Pixel size of a measured line
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    /// Total advance
    pub width: f32,
    /// Ink height from highest ascent to lowest descent
    pub height: f32,
}

/// The mushaf typesetting engine.
///
/// Holds a font backend and a shared classified corpus. Drawing takes
/// `&self`; an engine is `Sync` whenever its backend is.
pub struct Engine<B> {
    backend: B,
    corpus: Arc<Corpus>,
    capability: TajweedCapability,
}

impl<'a> Engine<OpenTypeFont<'a>> {
    /// Create an engine from OpenType font data and a classified corpus
    pub fn from_font_data(font_data: &'a [u8], corpus: Arc<Corpus>) -> Result<Self> {
        let font = OpenTypeFont::parse(font_data, 0)?;
        Ok(Self::new(font, corpus))
    }

    /// Create an engine from font data and form-feed separated corpus text
    pub fn from_sources(font_data: &'a [u8], corpus_text: &str) -> Result<Self> {
        let corpus = Corpus::from_text(corpus_text)?;
        Self::from_font_data(font_data, Arc::new(corpus))
    }
}

impl<B: FontBackend> Engine<B> {
    /// Create a new engine. Tajweed capability is fixed here.
    pub fn new(backend: B, corpus: Arc<Corpus>) -> Self {
        let capability = TajweedCapability::detect(backend.lookup_count());
        tracing::info!(
            pages = corpus.page_count(),
            lookups = backend.lookup_count(),
            tajweed = capability.is_supported(),
            "mushaf engine {} initialized",
            crate::VERSION
        );
        Self {
            backend,
            corpus,
            capability,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    pub fn capability(&self) -> TajweedCapability {
        self.capability
    }

    /// Number of pages, always 604
    pub fn page_count(&self) -> usize {
        PAGE_COUNT
    }

    /// Lay out a page without painting it
    pub fn plan_page(&self, width: u32, height: u32, page_index: usize, config: &RenderConfig) -> Option<PageLayout> {
        self.layout_page(width, height, page_index, config).map(|(layout, _)| layout)
    }

    /// Render a page into `buffer`.
    ///
    /// Does nothing and returns `None` when the page index is out of range
    /// or the buffer is empty or too small for its dimensions.
    pub fn draw_page(&self, buffer: &mut PixelBuffer<'_>, page_index: usize, config: &RenderConfig) -> Option<PageLayout> {
        if !buffer.is_valid() {
            tracing::debug!(width = buffer.width, height = buffer.height, stride = buffer.stride, "rejected pixel buffer");
            return None;
        }

        let (layout, runs) = self.layout_page(buffer.width, buffer.height, page_index, config)?;
        let mut canvas = Canvas::new(buffer.width, buffer.height)?;
        let background = config.background();
        canvas.clear(background);

        let resolver = ColorResolver::new(config.foreground(), self.capability)
            .use_foreground(config.use_foreground)
            .tajweed(config.tajweed);
        let positioner = GlyphPositioner::new(&resolver);
        let frame = DecorativeFrameDrawer::for_background(background);
        let geometry = &layout.geometry;

        // Frames first: a frame reaches into the slot above and must stay
        // behind that line's descenders.
        for line in layout.lines_with_role(LineRole::SurahTitle) {
            let right = geometry.width as f32 - geometry.margin;
            frame.draw(&mut canvas, geometry.margin, right, line.baseline, geometry.pitch);
        }

        for (line, run) in layout.lines.iter().zip(&runs) {
            let placement = LinePlacement {
                pen_start: line.pen_start(geometry),
                baseline: line.baseline,
                scale: geometry.scale * line.fit.ratio(),
                filler_advance: line.fit.filler_advance(),
            };
            positioner.paint(&self.backend, &mut canvas, run, &placement);
        }

        buffer.write_canvas(&canvas).then_some(layout)
    }

    fn shape_page(&self, page_index: usize, page: &Page, column_width: f32, config: &RenderConfig) -> Vec<ShapedRun> {
        page.lines()
            .iter()
            .enumerate()
            .map(|(slot, line)| {
                let target = self.corpus.overrides().target_width(page_index, slot, column_width);
                let request = line_request(line, target, config);
                self.backend.shape(&request).unwrap_or_else(|err| {
                    tracing::warn!(page_index, slot, %err, "shaping failed, line left empty");
                    ShapedRun::new(Vec::new(), self.backend.units_per_em())
                })
            })
            .collect()
    }

    fn layout_page(
        &self,
        width: u32,
        height: u32,
        page_index: usize,
        config: &RenderConfig,
    ) -> Option<(PageLayout, Vec<ShapedRun>)> {
        let page = self.corpus.page(page_index)?;
        if width == 0 || height == 0 {
            return None;
        }

        let planner = PageGeometryPlanner::new(config.tuning)
            .font_scale(config.font_scale)
            .font_size(config.font_size)
            .line_pitch(config.line_pitch)
            .top_margin_lines(config.top_margin_lines);
        let measurer = LineExtentMeasurer::new(&self.backend);

        let mut measured = None;
        let geometry = planner.plan(width, height, self.backend.units_per_em(), |column_width| {
            let runs = self.shape_page(page_index, page, column_width, config);
            let extents = runs
                .iter()
                .map(|run| measurer.measure_run(run))
                .fold(LineExtents::default(), LineExtents::union);
            measured = Some(runs);
            extents
        });
        let runs = measured.unwrap_or_else(|| self.shape_page(page_index, page, geometry.column_width, config));

        let decider = JustificationDecider::new(&config.tuning);
        let lines = page
            .lines()
            .iter()
            .zip(&runs)
            .enumerate()
            .map(|(slot, (line, run))| {
                let target = self.corpus.overrides().target_width(page_index, slot, geometry.column_width);
                let fit = decider.decide(&run.line_metrics(), target, config.justify, line.justification);
                LineLayout {
                    slot,
                    role: line.role,
                    justification: line.justification,
                    baseline: geometry.baseline(slot),
                    right_edge: geometry.line_right_edge(target),
                    fit,
                }
            })
            .collect();

        tracing::debug!(page_index, lines = page.len(), pitch = geometry.pitch, "laid out page");

        Some((
            PageLayout {
                page_index,
                geometry,
                lines,
            },
            runs,
        ))
    }

    /// Measure one line of free text at `font_size` pixels
    pub fn measure_text(&self, text: &str, font_size: f32) -> Option<TextExtent> {
        if text.is_empty() || !(font_size > 0.0) {
            return None;
        }
        let run = self.backend.shape(&ShapeRequest::new(text)).ok()?;
        let scale = font_size / self.backend.units_per_em() as f32;
        let extents = LineExtentMeasurer::new(&self.backend).measure_run(&run);
        Some(TextExtent {
            width: run.advance_width() * scale,
            height: extents.height() * scale,
        })
    }

    /// Draw one line of free text, vertically centered and right aligned.
    /// Returns the drawn width in pixels.
    pub fn draw_text(&self, buffer: &mut PixelBuffer<'_>, text: &str, config: &TextConfig) -> Option<f32> {
        if !buffer.is_valid() || text.is_empty() || !(config.font_size > 0.0) {
            return None;
        }
        let mut canvas = Canvas::new(buffer.width, buffer.height)?;
        canvas.clear(config.background());

        let line = self.fit_text(text, config, buffer.width)?;
        let extents = LineExtentMeasurer::new(&self.backend).measure_run(&line.run);
        let ink = (extents.max_ascent - extents.max_descent) * line.scale;
        let baseline = ((buffer.height as f32 + ink) / 2.0).round();
        self.paint_text(&mut canvas, &line, config, buffer.width as f32, baseline);

        buffer
            .write_canvas(&canvas)
            .then(|| line.fit.content_width * line.scale)
    }

    /// Draw newline-separated lines of free text, `line_spacing` font sizes
    /// apart. Returns the number of line slots placed; a line that fails to
    /// shape keeps its slot and is left blank.
    pub fn draw_multiline_text(
        &self,
        buffer: &mut PixelBuffer<'_>,
        text: &str,
        config: &TextConfig,
        line_spacing: f32,
    ) -> usize {
        if !buffer.is_valid() || text.is_empty() || !(config.font_size > 0.0) {
            return 0;
        }
        let Some(mut canvas) = Canvas::new(buffer.width, buffer.height) else {
            return 0;
        };
        canvas.clear(config.background());

        let spacing = if line_spacing > 0.0 { line_spacing } else { 1.0 };
        let pitch = config.font_size * spacing;
        let fitted: Vec<Option<FittedText>> = text
            .lines()
            .map(|line| self.fit_text(line, config, buffer.width))
            .collect();
        let measurer = LineExtentMeasurer::new(&self.backend);
        let ascent = fitted
            .iter()
            .flatten()
            .map(|line| measurer.measure_run(&line.run).max_ascent * line.scale)
            .fold(0.0f32, f32::max)
            .ceil();

        let mut drawn = 0;
        for (i, line) in fitted.iter().enumerate() {
            let baseline = ascent + i as f32 * pitch;
            if baseline > buffer.height as f32 {
                break;
            }
            match line {
                Some(line) => self.paint_text(&mut canvas, line, config, buffer.width as f32, baseline),
                None => tracing::warn!(line = i, "shaping failed, line left blank"),
            }
            drawn += 1;
        }

        if buffer.write_canvas(&canvas) { drawn } else { 0 }
    }

    fn fit_text(&self, text: &str, config: &TextConfig, width: u32) -> Option<FittedText> {
        let scale = config.font_size / self.backend.units_per_em() as f32;
        let target_px = config.line_width.filter(|w| *w > 0.0).unwrap_or(width as f32);
        let target = target_px / scale;

        let request = ShapeRequest::new(text).tajweed(config.tajweed);
        let request = if config.justify { request.justify_to(target) } else { request };
        let run = self
            .backend
            .shape(&request)
            .map_err(|err| tracing::debug!(%err, "free text shaping failed"))
            .ok()?;
        let fit = JustificationDecider::default().decide(&run.line_metrics(), target, config.justify, Justification::Justify);
        Some(FittedText { run, fit, scale })
    }

    fn paint_text(&self, canvas: &mut Canvas, line: &FittedText, config: &TextConfig, right_edge: f32, baseline: f32) {
        let resolver = ColorResolver::new(config.foreground(), self.capability)
            .use_foreground(config.use_foreground)
            .tajweed(config.tajweed);
        let placement = LinePlacement {
            pen_start: right_edge,
            baseline,
            scale: line.scale * line.fit.ratio(),
            filler_advance: line.fit.filler_advance(),
        };
        GlyphPositioner::new(&resolver).paint(&self.backend, canvas, &line.run, &placement);
    }
}

/// A free-text line shaped and justified for painting
struct FittedText {
    run: ShapedRun,
    fit: LineFit,
    /// Pixels per font unit before any shrink
    scale: f32,
}

fn line_request<'l>(line: &'l Line, target: f32, config: &RenderConfig) -> ShapeRequest<'l> {
    let request = ShapeRequest::new(&line.text).tajweed(config.tajweed && line.role != LineRole::SurahTitle);
    if config.justify && line.justification == Justification::Justify {
        request.justify_to(target)
    } else {
        request
    }
}
