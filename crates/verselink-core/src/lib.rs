use thiserror::Error;

pub mod backend;
pub mod books;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod link;
pub mod normalize;
pub mod resolve;
pub mod token;

pub use backend::{BackendError, LinkSink, TextSource};
pub use books::book_code;
pub use config::{
    ConfigError, DEFAULT_BASE_URL, DEFAULT_NOISE_RATIO, DEFAULT_RECT_MARGIN, LinkerConfig,
    LinkerConfigBuilder,
};
pub use engine::{Linker, RunStats};
pub use resolve::{Context, Reference, Resolved};

/// A single positioned glyph as produced by the extraction collaborator.
///
/// `block` and `line` identify the source line within its page; characters
/// of one line share the same pair. `size` is the font size of the span the
/// glyph belongs to, used to tell verse numbers from superscript footnote
/// markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharRecord {
    pub ch: char,
    pub rect: Rect,
    pub size: f32,
    pub block: u32,
    pub line: u32,
}

/// An axis-aligned rectangle in page coordinates (top-left origin, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Componentwise bounding box of `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Grow the rectangle by `margin` on all four sides.
    pub fn expand(&self, margin: f32) -> Rect {
        Rect {
            x0: self.x0 - margin,
            y0: self.y0 - margin,
            x1: self.x1 + margin,
            y1: self.y1 + margin,
        }
    }
}

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Add reference links to a whole document in one pass.
///
/// Pipeline, per page and in document order:
/// 1. Pull each line's character records from `source`
/// 2. Normalize the line (drop apparatus brackets and superscript digits)
/// 3. Scan for reference tokens and classify them against the grammar
/// 4. Resolve elliptical references from the carried (book, chapter) context
/// 5. Emit a (rectangle, URI) pair to `sink` for every resolved token
///
/// Context survives line and page boundaries for the whole traversal.
pub fn add_links(
    source: &dyn TextSource,
    sink: &mut dyn LinkSink,
    config: LinkerConfig,
) -> Result<RunStats, LinkError> {
    Linker::new(config).run(source, sink)
}
