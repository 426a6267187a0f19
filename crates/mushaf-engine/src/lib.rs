//! Mushaf Engine
//!
//! Typesets the 604 fixed pages of the mushaf into caller-owned pixel
//! buffers: fifteen line slots per page, lines justified to the column or
//! to their width override, a pitch measured so adjacent lines never
//! collide, and per-glyph tajweed colors.
//!
//! # Example
//! ```rust,ignore
//! use mushaf_engine::{Engine, RenderConfig, PixelBuffer};
//!
//! let engine = Engine::from_sources(&font_data, &corpus_text)?;
//! let mut pixels = vec![0u8; 1080 * 1920 * 4];
//! let mut buffer = PixelBuffer::rgba(&mut pixels, 1080, 1920);
//! engine.draw_page(&mut buffer, 0, &RenderConfig::default());
//! ```

mod config;
mod engine;
pub mod metadata;

pub use config::{RenderConfig, TextConfig};
pub use engine::{Engine, EngineError, TextExtent};

// Re-export sub-crates for advanced usage
pub use mushaf_layout as layout;
pub use mushaf_render as render;
pub use mushaf_text as text;

pub use mushaf_layout::{Corpus, PageLayout, PAGE_COUNT};
pub use mushaf_render::{PixelBuffer, PixelFormat};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type Result<T> = std::result::Result<T, EngineError>;
