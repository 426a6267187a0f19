//! Integration tests - Corpus to pixels
//!
//! Drives the engine with the synthetic box font over a full 604 page
//! corpus and inspects the produced buffers.

use std::sync::Arc;

use mushaf_engine::layout::{Adjustment, Justification, LineRole, LINES_PER_PAGE};
use mushaf_engine::metadata;
use mushaf_engine::{Corpus, Engine, PixelBuffer, PixelFormat, RenderConfig, TextConfig, PAGE_COUNT};
use mushaf_text::synthetic::SyntheticFont;

const WIDTH: u32 = 1080;
const HEIGHT: u32 = 1920;
const BODY: &str = "بب تت ثث جج حح";
/// Every glyph descends to -450 units
const DEEP_LINE: &str = "يييييييي";
const GREEN: [u8; 4] = [0x00, 0x9E, 0x49, 0xFF];

fn corpus() -> Arc<Corpus> {
    let blocks: Vec<String> = (0..PAGE_COUNT)
        .map(|page| {
            let lines: Vec<String> = match page {
                0 | 1 => {
                    let mut lines = vec!["سُورَة الفاتحة".to_string()];
                    lines.extend((1..=7).map(|_| BODY.to_string()));
                    lines
                }
                49 => {
                    let mut lines = vec!["سُورَة آل عمران".to_string()];
                    lines.extend((1..LINES_PER_PAGE).map(|_| BODY.to_string()));
                    lines
                }
                10 | 11 => {
                    let second = if page == 10 { "سُورَة ب" } else { BODY };
                    let mut lines = vec![DEEP_LINE.to_string(), second.to_string()];
                    lines.extend((2..LINES_PER_PAGE).map(|_| BODY.to_string()));
                    lines
                }
                200 => (0..LINES_PER_PAGE).map(|_| "نن بب نن".to_string()).collect(),
                300 => {
                    let long = vec![BODY; 4].join(" ");
                    (0..LINES_PER_PAGE).map(|_| long.clone()).collect()
                }
                400 => (0..LINES_PER_PAGE).map(|_| "لل يي بب".to_string()).collect(),
                _ => (0..LINES_PER_PAGE).map(|_| BODY.to_string()).collect(),
            };
            format!("\u{1}{}", lines.join("\n"))
        })
        .collect();
    Arc::new(Corpus::from_blocks(&blocks).unwrap())
}

fn engine() -> Engine<SyntheticFont> {
    Engine::new(SyntheticFont::new(), corpus())
}

fn tajweed_engine() -> Engine<SyntheticFont> {
    Engine::new(SyntheticFont::with_lookup_count(160), corpus())
}

fn render(engine: &Engine<SyntheticFont>, page: usize, width: u32, height: u32, config: &RenderConfig) -> Vec<u8> {
    let mut pixels = vec![0u8; (width * height * 4) as usize];
    let mut buffer = PixelBuffer::rgba(&mut pixels, width, height);
    assert!(engine.draw_page(&mut buffer, page, config).is_some());
    pixels
}

fn pixel(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
}

fn is_ink(p: [u8; 4]) -> bool {
    p[0] < 100 && p[1] < 100 && p[2] < 100
}

/// Leftmost and rightmost dark pixel on a row
fn ink_span(pixels: &[u8], width: u32, y: u32) -> Option<(u32, u32)> {
    let inked: Vec<u32> = (0..width).filter(|&x| is_ink(pixel(pixels, width, x, y))).collect();
    Some((*inked.first()?, *inked.last()?))
}

fn count(pixels: &[u8], color: [u8; 4]) -> usize {
    pixels.chunks_exact(4).filter(|p| *p == color).count()
}

// ============================================================================
// PAGE GEOMETRY
// ============================================================================

#[test]
fn test_page_count() {
    let engine = engine();
    assert_eq!(engine.page_count(), 604);
    assert_eq!(engine.corpus().page_count(), PAGE_COUNT);
}

#[test]
fn test_pitch_contract_across_pages() {
    let engine = engine();
    let config = RenderConfig::default();

    for page in (0..PAGE_COUNT).step_by(23).chain([400, 603]) {
        let layout = engine.plan_page(WIDTH, HEIGHT, page, &config).unwrap();
        let g = layout.geometry;
        assert!(g.fits(), "page {page} overflows");
        assert!(g.pitch <= g.pitch_ceiling() + 1e-3);
        assert!(!g.pitch_clamped);

        let extents = g.extents.unwrap();
        assert!(g.pitch >= extents.height() * g.scale, "page {page} lines collide");
    }
}

#[test]
fn test_tall_and_deep_glyphs_widen_pitch() {
    let engine = engine();
    let config = RenderConfig::default();
    let plain = engine.plan_page(WIDTH, HEIGHT, 100, &config).unwrap().geometry;
    let tall = engine.plan_page(WIDTH, HEIGHT, 400, &config).unwrap().geometry;

    // 1550 font units of ink at 57px, plus 2%
    assert!((tall.pitch - 1550.0 * 0.057 * 1.02).abs() < 1e-2);
    assert!(tall.pitch > plain.pitch);
    assert_eq!(tall.baseline_start, (tall.pitch * 0.72).round());
}

#[test]
fn test_short_canvas_clamps_pitch() {
    let engine = engine();
    let layout = engine.plan_page(WIDTH, 600, 400, &RenderConfig::default()).unwrap();
    assert!(layout.geometry.pitch_clamped);
    assert_eq!(layout.geometry.pitch, 40.0);
}

#[test]
fn test_explicit_pitch_skips_measurement() {
    let engine = engine();
    let config = RenderConfig {
        line_pitch: Some(100.0),
        top_margin_lines: Some(1.0),
        ..RenderConfig::default()
    };
    let g = engine.plan_page(WIDTH, HEIGHT, 100, &config).unwrap().geometry;
    assert_eq!(g.pitch, 100.0);
    assert!(g.extents.is_none());
    assert_eq!(g.baseline(0), 172.0);
    assert_eq!(g.baseline(14), 1572.0);
}

// ============================================================================
// JUSTIFICATION
// ============================================================================

#[test]
fn test_justified_lines_span_column() {
    let engine = engine();
    let config = RenderConfig::default();
    let layout = engine.plan_page(WIDTH, HEIGHT, 100, &config).unwrap();
    let pixels = render(&engine, 100, WIDTH, HEIGHT, &config);
    let g = layout.geometry;

    for line in &layout.lines {
        assert!(matches!(line.fit.adjustment, Adjustment::PadFillers { .. }));
        assert!((line.content_width(&g) - (WIDTH as f32 - 2.0 * g.margin)).abs() <= 0.01 * WIDTH as f32);

        let (left, right) = ink_span(&pixels, WIDTH, line.baseline as u32 - 20).unwrap();
        // Box glyphs keep 40 units of side bearing
        assert!(left.abs_diff(27) <= 2, "left ink at {left}");
        assert!(right.abs_diff(1052) <= 2, "right ink at {right}");
    }
}

#[test]
fn test_unjustified_lines_keep_natural_width() {
    let engine = engine();
    let config = RenderConfig {
        justify: false,
        ..RenderConfig::default()
    };
    let layout = engine.plan_page(WIDTH, HEIGHT, 100, &config).unwrap();
    for line in &layout.lines {
        assert_eq!(line.fit.adjustment, Adjustment::Natural);
        assert_eq!(line.fit.content_width, 6000.0);
    }
}

#[test]
fn test_wide_lines_shrink_inside_margins() {
    let engine = engine();
    let config = RenderConfig::default();
    let layout = engine.plan_page(WIDTH, HEIGHT, 300, &config).unwrap();
    let pixels = render(&engine, 300, WIDTH, HEIGHT, &config);
    let g = layout.geometry;

    for line in &layout.lines {
        assert!(line.fit.ratio() < 1.0);
        assert!((line.content_width(&g) - 1030.0).abs() < 0.5);

        let (left, right) = ink_span(&pixels, WIDTH, line.baseline as u32 - 20).unwrap();
        assert!(left >= g.margin as u32);
        assert!(right < WIDTH - g.margin as u32);
    }
}

#[test]
fn test_title_centered() {
    let engine = engine();
    let config = RenderConfig::default();
    let layout = engine.plan_page(WIDTH, HEIGHT, 49, &config).unwrap();
    let title = layout.line(0).unwrap();
    assert_eq!(title.role, LineRole::SurahTitle);
    assert_eq!(title.justification, Justification::Center);
    assert!(title.fit.lead > 0.0);

    let pixels = render(&engine, 49, WIDTH, HEIGHT, &config);
    let (left, right) = ink_span(&pixels, WIDTH, title.baseline as u32 - 20).unwrap();
    let right_gap = WIDTH - 1 - right;
    assert!(left.abs_diff(right_gap) <= 2, "left gap {left}, right gap {right_gap}");
}

#[test]
fn test_opening_titles_centered() {
    let engine = engine();
    let config = RenderConfig::default();

    for page in [0, 1] {
        let layout = engine.plan_page(WIDTH, HEIGHT, page, &config).unwrap();
        let first = layout.line(0).unwrap();
        assert_eq!(first.justification, Justification::Center);
        assert!(first.fit.lead > 0.0);

        let pixels = render(&engine, page, WIDTH, HEIGHT, &config);
        let (left, right) = ink_span(&pixels, WIDTH, first.baseline as u32 - 20).unwrap();
        let right_gap = WIDTH - 1 - right;
        assert!(left.abs_diff(right_gap) <= 2, "page {page}: left gap {left}, right gap {right_gap}");
    }
}

#[test]
fn test_title_frame_keeps_descenders_above() {
    let engine = engine();
    let config = RenderConfig::default();
    let framed = engine.plan_page(WIDTH, HEIGHT, 10, &config).unwrap();
    let plain = engine.plan_page(WIDTH, HEIGHT, 11, &config).unwrap();
    assert_eq!(framed.line(1).unwrap().role, LineRole::SurahTitle);
    assert_eq!(framed.geometry, plain.geometry);

    let g = framed.geometry;
    let baseline = framed.line(0).unwrap().baseline as u32;
    let descent = g.worst_descent().floor() as u32;
    let ink_below_baseline = |pixels: &[u8]| {
        (baseline..baseline + descent)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| pixel(pixels, WIDTH, x, y) == [0, 0, 0, 255])
            .count()
    };

    let with_title = render(&engine, 10, WIDTH, HEIGHT, &config);
    let with_body = render(&engine, 11, WIDTH, HEIGHT, &config);
    let expected = ink_below_baseline(&with_body);
    assert!(expected > 0);
    assert_eq!(ink_below_baseline(&with_title), expected);
}

#[test]
fn test_title_frame_drawn() {
    let engine = engine();
    let config = RenderConfig::default();
    let layout = engine.plan_page(WIDTH, HEIGHT, 49, &config).unwrap();
    let pixels = render(&engine, 49, WIDTH, HEIGHT, &config);

    let title = layout.line(0).unwrap();
    assert!(count(&pixels, [0, 128, 128, 255]) > 0);
    // Frame fill keeps the slot background white between border and text
    assert_eq!(pixel(&pixels, WIDTH, 100, title.baseline as u32 - 10), [255, 255, 255, 255]);

    // Body pages carry no frame
    let body = render(&engine, 100, WIDTH, HEIGHT, &config);
    assert_eq!(count(&body, [0, 128, 128, 255]), 0);
}

#[test]
fn test_opening_pages_fan_out() {
    let engine = engine();
    let layout = engine.plan_page(WIDTH, HEIGHT, 0, &RenderConfig::default()).unwrap();
    let g = layout.geometry;

    let widths: Vec<f32> = layout.lines.iter().skip(1).map(|l| l.content_width(&g)).collect();
    assert_eq!(widths.len(), 7);
    assert!(widths.iter().all(|w| *w < WIDTH as f32 - 2.0 * g.margin));
    // Every fan line is centered in the column
    for line in layout.lines.iter().skip(1) {
        let left = line.right_edge - line.content_width(&g);
        let right_gap = WIDTH as f32 - line.right_edge;
        assert!((left - right_gap).abs() < 1.0);
    }
}

// ============================================================================
// COLORS
// ============================================================================

#[test]
fn test_tajweed_colors_need_rich_font() {
    let config = RenderConfig::default();

    let plain = render(&engine(), 200, 540, 960, &config);
    assert_eq!(count(&plain, GREEN), 0);

    let rich = render(&tajweed_engine(), 200, 540, 960, &config);
    assert!(count(&rich, GREEN) > 0);

    let off = RenderConfig {
        tajweed: false,
        ..RenderConfig::default()
    };
    let rich_off = render(&tajweed_engine(), 200, 540, 960, &off);
    assert_eq!(count(&rich_off, GREEN), 0);

    let mono = RenderConfig {
        use_foreground: true,
        ..RenderConfig::default()
    };
    let rich_mono = render(&tajweed_engine(), 200, 540, 960, &mono);
    assert_eq!(count(&rich_mono, GREEN), 0);
}

#[test]
fn test_dark_background_uses_white_text() {
    let config = RenderConfig {
        background_color: 0x1E1E1EFF,
        ..RenderConfig::default()
    };
    let pixels = render(&engine(), 100, 540, 960, &config);
    assert_eq!(pixel(&pixels, 540, 0, 0), [0x1E, 0x1E, 0x1E, 0xFF]);
    assert!(count(&pixels, [255, 255, 255, 255]) > 0);
    assert_eq!(count(&pixels, [0, 0, 0, 255]), 0);
}

#[test]
fn test_explicit_text_color() {
    let config = RenderConfig {
        text_color: Some(0x0000FFFF),
        ..RenderConfig::default()
    };
    let pixels = render(&engine(), 100, 540, 960, &config);
    assert!(count(&pixels, [0, 0, 255, 255]) > 0);
    assert_eq!(count(&pixels, [0, 0, 0, 255]), 0);
}

// ============================================================================
// OUTPUT BUFFER
// ============================================================================

#[test]
fn test_rendering_is_deterministic() {
    let engine = engine();
    let config = RenderConfig::default();
    let first = render(&engine, 49, 540, 960, &config);
    let second = render(&engine, 49, 540, 960, &config);
    assert!(first == second);
}

#[test]
fn test_concurrent_draws_match() {
    let engine = tajweed_engine();
    let config = RenderConfig::default();
    let (a, b) = std::thread::scope(|scope| {
        let a = scope.spawn(|| render(&engine, 200, 540, 960, &config));
        let b = scope.spawn(|| render(&engine, 200, 540, 960, &config));
        (a.join().unwrap(), b.join().unwrap())
    });
    assert!(a == b);
}

#[test]
fn test_bgra_swizzle_and_padding() {
    let engine = tajweed_engine();
    let config = RenderConfig::default();
    let (width, height) = (540u32, 960u32);
    let rgba = render(&engine, 200, width, height, &config);

    let stride = width as usize * 4 + 16;
    let mut pixels = vec![0xABu8; stride * height as usize];
    let mut buffer = PixelBuffer::new(&mut pixels, width, height, stride, PixelFormat::Bgra8888);
    assert!(engine.draw_page(&mut buffer, 200, &config).is_some());

    for y in 0..height as usize {
        let row = &pixels[y * stride..(y + 1) * stride];
        for x in 0..width as usize {
            let s = &rgba[(y * width as usize + x) * 4..][..4];
            let d = &row[x * 4..x * 4 + 4];
            assert_eq!([d[0], d[1], d[2], d[3]], [s[2], s[1], s[0], s[3]]);
        }
        assert!(row[width as usize * 4..].iter().all(|&b| b == 0xAB));
    }
}

#[test]
fn test_invalid_requests_leave_buffer_untouched() {
    let engine = engine();
    let config = RenderConfig::default();

    let mut pixels = vec![0x11u8; 64 * 64 * 4];
    let mut buffer = PixelBuffer::rgba(&mut pixels, 64, 64);
    assert!(engine.draw_page(&mut buffer, PAGE_COUNT, &config).is_none());
    assert!(pixels.iter().all(|&b| b == 0x11));

    let mut short = vec![0x11u8; 64 * 64 * 4 - 1];
    let mut buffer = PixelBuffer::rgba(&mut short, 64, 64);
    assert!(engine.draw_page(&mut buffer, 0, &config).is_none());
    assert!(short.iter().all(|&b| b == 0x11));

    let mut empty: Vec<u8> = Vec::new();
    let mut buffer = PixelBuffer::rgba(&mut empty, 0, 0);
    assert!(engine.draw_page(&mut buffer, 0, &config).is_none());

    assert!(engine.plan_page(WIDTH, HEIGHT, PAGE_COUNT, &config).is_none());
}

// ============================================================================
// FREE TEXT
// ============================================================================

#[test]
fn test_measure_and_draw_text() {
    let engine = engine();
    let extent = engine.measure_text("بب تت", 100.0).unwrap();
    assert!((extent.width - 225.0).abs() < 1e-3);

    let config = TextConfig {
        font_size: 100.0,
        ..TextConfig::default()
    };
    let mut pixels = vec![0u8; 400 * 200 * 4];
    let mut buffer = PixelBuffer::rgba(&mut pixels, 400, 200);
    let width = engine.draw_text(&mut buffer, "بب تت", &config).unwrap();
    assert!((width - extent.width).abs() < 1e-3);

    // Right aligned: ink ends near the right edge, vertically centered
    let (left, right) = ink_span(&pixels, 400, 100).unwrap();
    assert!(right.abs_diff(395) <= 1);
    assert!(left.abs_diff(179) <= 1);
}

#[test]
fn test_draw_text_justified_to_line_width() {
    let engine = engine();
    let config = TextConfig {
        font_size: 100.0,
        justify: true,
        line_width: Some(300.0),
        ..TextConfig::default()
    };
    let mut pixels = vec![0u8; 400 * 200 * 4];
    let mut buffer = PixelBuffer::rgba(&mut pixels, 400, 200);
    let width = engine.draw_text(&mut buffer, "بب تت", &config).unwrap();
    assert!((width - 300.0).abs() < 1e-3);
}

#[test]
fn test_draw_multiline_text() {
    let engine = engine();
    let config = TextConfig {
        font_size: 50.0,
        ..TextConfig::default()
    };

    let mut pixels = vec![0u8; 400 * 400 * 4];
    let mut buffer = PixelBuffer::rgba(&mut pixels, 400, 400);
    assert_eq!(engine.draw_multiline_text(&mut buffer, "بب\nتت\nثث", &config, 1.5), 3);

    let mut pixels = vec![0u8; 400 * 60 * 4];
    let mut buffer = PixelBuffer::rgba(&mut pixels, 400, 60);
    assert_eq!(engine.draw_multiline_text(&mut buffer, "بب\nتت\nثث", &config, 1.5), 1);
}

// ============================================================================
// METADATA
// ============================================================================

#[test]
fn test_metadata_matches_page_numbering() {
    assert_eq!(metadata::surahs().len(), 114);
    assert_eq!(metadata::ayah_count(2), Some(286));
    assert_eq!(metadata::surah_start_page(3), Some(49));
    assert_eq!(metadata::surah_start_page(114), Some(603));
    assert!(metadata::surah_info(0).is_none());

    // The synthetic corpus puts a title where surah 3 begins
    let engine = engine();
    let page = engine.corpus().page(49).unwrap();
    assert_eq!(page.lines()[0].role, LineRole::SurahTitle);
}
