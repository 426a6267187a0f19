//! mushaf - Command line entry point
//!
//! Renders pages and free text to PNG and answers surah/page lookups.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use mushaf_engine::render::Color;
use mushaf_engine::{metadata, Engine, PixelBuffer, PixelFormat, RenderConfig, TextConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mushaf", version, about = "Typeset mushaf pages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render one page to a PNG file
    Render(RenderArgs),
    /// Render a line of free text to a PNG file
    Text(TextArgs),
    /// Print a surah's metadata as JSON
    Surah { number: u8 },
    /// Print the 0-based page holding an ayah
    Locate { surah: u8, ayah: u16 },
    /// Print the first ayah of a 0-based page
    Page { index: usize },
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// OpenType font file
    #[arg(long)]
    font: PathBuf,
    /// Corpus text, pages separated by form feeds
    #[arg(long)]
    corpus: PathBuf,
    /// 0-based page index
    #[arg(long, default_value_t = 0)]
    page: usize,
    #[arg(long, default_value_t = 1080)]
    width: u32,
    #[arg(long, default_value_t = 1920)]
    height: u32,
    /// JSON render config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Font size multiplier
    #[arg(long)]
    scale: Option<f32>,
    /// Background color, `#RRGGBB` or `#RRGGBBAA`
    #[arg(long)]
    background: Option<String>,
    #[arg(long)]
    no_tajweed: bool,
    #[arg(long)]
    no_justify: bool,
    /// Render through a BGRA buffer
    #[arg(long)]
    bgra: bool,
    /// Output PNG
    #[arg(short, long, default_value = "page.png")]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct TextArgs {
    #[arg(long)]
    font: PathBuf,
    #[arg(long)]
    corpus: PathBuf,
    text: String,
    #[arg(long, default_value_t = 1080)]
    width: u32,
    #[arg(long, default_value_t = 160)]
    height: u32,
    #[arg(long, default_value_t = 48.0)]
    size: f32,
    #[arg(long)]
    justify: bool,
    #[arg(short, long, default_value = "text.png")]
    out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Render(args) => render_page(&args),
        Command::Text(args) => render_text(&args),
        Command::Surah { number } => {
            let info = metadata::surah_info(number).with_context(|| format!("no surah {number}"))?;
            println!("{}", serde_json::to_string_pretty(info)?);
            Ok(())
        }
        Command::Locate { surah, ayah } => {
            let page = metadata::ayah_page(surah, ayah).with_context(|| format!("no ayah {surah}:{ayah}"))?;
            println!("{page}");
            Ok(())
        }
        Command::Page { index } => {
            let location = metadata::page_location(index).with_context(|| format!("no page {index}"))?;
            println!("{}", serde_json::to_string_pretty(&location)?);
            Ok(())
        }
    }
}

fn render_config(args: &RenderArgs) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => RenderConfig::default(),
    };

    if let Some(scale) = args.scale {
        config.font_scale = scale;
    }
    if let Some(hex) = &args.background {
        let color = Color::from_hex(hex).with_context(|| format!("invalid color {hex}"))?;
        config.background_color = color.to_rgba_u32();
    }
    if args.no_tajweed {
        config.tajweed = false;
    }
    if args.no_justify {
        config.justify = false;
    }
    Ok(config)
}

fn render_page(args: &RenderArgs) -> Result<()> {
    let config = render_config(args)?;
    let font_data = fs::read(&args.font).with_context(|| format!("reading {}", args.font.display()))?;
    let corpus_text = fs::read_to_string(&args.corpus).with_context(|| format!("reading {}", args.corpus.display()))?;
    let engine = Engine::from_sources(&font_data, &corpus_text)?;

    let format = if args.bgra { PixelFormat::Bgra8888 } else { PixelFormat::Rgba8888 };
    let stride = args.width as usize * 4;
    let mut pixels = vec![0u8; stride * args.height as usize];
    let mut buffer = PixelBuffer::new(&mut pixels, args.width, args.height, stride, format);

    let Some(layout) = engine.draw_page(&mut buffer, args.page, &config) else {
        bail!("page {} not drawn (valid pages: 0..{})", args.page, engine.page_count());
    };
    tracing::info!(
        page = args.page,
        pitch = layout.geometry.pitch,
        clamped = layout.geometry.pitch_clamped,
        "rendered page"
    );

    if args.bgra {
        bgra_to_rgba(&mut pixels);
    }
    save_png(&args.out, pixels, args.width, args.height)
}

fn render_text(args: &TextArgs) -> Result<()> {
    let font_data = fs::read(&args.font).with_context(|| format!("reading {}", args.font.display()))?;
    let corpus_text = fs::read_to_string(&args.corpus).with_context(|| format!("reading {}", args.corpus.display()))?;
    let engine = Engine::from_sources(&font_data, &corpus_text)?;
    let config = TextConfig {
        font_size: args.size,
        justify: args.justify,
        ..TextConfig::default()
    };

    let mut pixels = vec![0u8; args.width as usize * args.height as usize * 4];
    let mut buffer = PixelBuffer::rgba(&mut pixels, args.width, args.height);
    if args.text.contains('\n') {
        let lines = engine.draw_multiline_text(&mut buffer, &args.text, &config, 1.5);
        tracing::info!(lines, "rendered text");
    } else {
        let width = engine.draw_text(&mut buffer, &args.text, &config).context("text not drawn")?;
        tracing::info!(width, "rendered text");
    }

    save_png(&args.out, pixels, args.width, args.height)
}

fn bgra_to_rgba(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
}

fn save_png(path: &Path, pixels: Vec<u8>, width: u32, height: u32) -> Result<()> {
    let image = image::RgbaImage::from_raw(width, height, pixels).context("pixel buffer size mismatch")?;
    image.save(path).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved");
    Ok(())
}
