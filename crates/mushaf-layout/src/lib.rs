//! Mushaf Layout Engine
//!
//! Everything between the classified corpus and the painter:
//! - Corpus parsing and line classification
//! - Sparse per-line width overrides (opening fan, closing pages)
//! - Page geometry: font size, margins, anti-overlap pitch, baselines
//! - Per-line justification decisions

mod corpus;
mod geometry;
mod justify;
mod overrides;
mod page;
mod tuning;

pub use corpus::{Corpus, CorpusError, Justification, Line, LineRole, Page, MAX_LINES_PER_PAGE, PAGE_COUNT};
pub use geometry::{PageGeometry, PageGeometryPlanner, LINES_PER_PAGE};
pub use justify::{Adjustment, JustificationDecider, LineFit};
pub use overrides::{fan_width_ratio, WidthOverrides};
pub use page::{LineLayout, PageLayout};
pub use tuning::LayoutTuning;

pub type Result<T> = std::result::Result<T, CorpusError>;
