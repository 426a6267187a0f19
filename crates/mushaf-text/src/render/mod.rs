//! Glyph outline conversion

mod outline;

pub use outline::glyph_path;
