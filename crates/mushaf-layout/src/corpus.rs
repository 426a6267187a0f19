//! Corpus classification
//!
//! Turns the raw page text into immutable pages of classified lines. Each
//! line gets a role from its content; the two opening pages additionally
//! receive fan-shaped width overrides for every line below their title.

use crate::overrides::{fan_width_ratio, WidthOverrides};
use crate::Result;

/// Number of pages in the mushaf
pub const PAGE_COUNT: usize = 604;

/// Line slots on a page
pub const MAX_LINES_PER_PAGE: usize = 15;

/// Pages drawn with the opening fan layout
const OPENING_PAGES: usize = 2;

/// Word that opens every surah title line
const TITLE_PREFIX: &str = "سُورَة";

/// The invocation line, in both mark orders found in the corpus
const BISMILLAH: [&str; 2] = [
    "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
    "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
];

/// Corpus errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorpusError {
    #[error("Expected {expected} pages, found {found}")]
    PageCount { expected: usize, found: usize },

    #[error("Page {page} has {lines} lines, expected 1 to {MAX_LINES_PER_PAGE}")]
    LineCount { page: usize, lines: usize },
}

/// Semantic role of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRole {
    Body,
    SurahTitle,
    Bismillah,
}

/// Horizontal treatment of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Justification {
    /// Fill the target width
    Justify,
    /// Center within the target width
    Center,
}

/// A classified line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub role: LineRole,
    pub justification: Justification,
}

impl Line {
    /// Classify a line by its content alone
    pub fn classify(text: &str) -> Self {
        let role = if BISMILLAH.contains(&text) {
            LineRole::Bismillah
        } else if text.starts_with(TITLE_PREFIX) {
            LineRole::SurahTitle
        } else {
            LineRole::Body
        };
        let justification = match role {
            LineRole::Body => Justification::Justify,
            LineRole::SurahTitle | LineRole::Bismillah => Justification::Center,
        };
        Self {
            text: text.to_owned(),
            role,
            justification,
        }
    }
}

/// One page of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    lines: Vec<Line>,
}

impl Page {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The classified corpus and its width overrides.
///
/// Built once; share it between engines through an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    pages: Vec<Page>,
    overrides: WidthOverrides,
}

impl Corpus {
    /// Build from per-page blocks, each a page-marker character followed by
    /// newline-separated lines.
    pub fn from_blocks<S: AsRef<str>>(blocks: &[S]) -> Result<Self> {
        let bodies: Vec<&str> = blocks
            .iter()
            .map(|block| {
                let block = block.as_ref();
                let mut chars = block.chars();
                chars.next();
                chars.as_str()
            })
            .collect();
        Self::from_page_texts(&bodies)
    }

    /// Build from a text file with pages separated by form feeds
    /// (`U+000C`), without page markers.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut bodies: Vec<&str> = text
            .split('\x0c')
            .map(|page| page.strip_prefix('\n').unwrap_or(page))
            .collect();
        if bodies.last().is_some_and(|last| last.trim().is_empty()) {
            bodies.pop();
        }
        Self::from_page_texts(&bodies)
    }

    fn from_page_texts(bodies: &[&str]) -> Result<Self> {
        if bodies.len() != PAGE_COUNT {
            return Err(CorpusError::PageCount {
                expected: PAGE_COUNT,
                found: bodies.len(),
            });
        }

        let mut overrides = WidthOverrides::closing_pages();
        let mut pages = Vec::with_capacity(PAGE_COUNT);

        for (page_index, body) in bodies.iter().enumerate() {
            let mut lines: Vec<Line> = body.lines().map(Line::classify).collect();

            if lines.is_empty() || lines.len() > MAX_LINES_PER_PAGE {
                return Err(CorpusError::LineCount {
                    page: page_index,
                    lines: lines.len(),
                });
            }

            if page_index < OPENING_PAGES {
                for (line_index, line) in lines.iter_mut().enumerate() {
                    if line_index == 0 {
                        line.justification = Justification::Center;
                    } else {
                        line.role = LineRole::Body;
                        line.justification = Justification::Justify;
                        overrides.insert(page_index, line_index, fan_width_ratio(line_index));
                    }
                }
            }

            pages.push(Page { lines });
        }

        tracing::debug!(pages = pages.len(), overrides = overrides.len(), "classified corpus");

        Ok(Self { pages, overrides })
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Width overrides, including the opening fan
    pub fn overrides(&self) -> &WidthOverrides {
        &self.overrides
    }
}
