use thiserror::Error;

use crate::{CharRecord, Rect};

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("failed to insert annotation: {0}")]
    AnnotationError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for per-character text extraction backends.
///
/// Implementors provide the low-level positioned-character stream; all
/// matching and resolution lives in [`crate::engine::Linker`]. Lines must be
/// returned in reading order and characters left to right — the resolver's
/// context fold depends on that ordering.
pub trait TextSource {
    /// Number of pages in the document.
    fn page_count(&self) -> Result<usize, BackendError>;

    /// The lines of one page, each an ordered run of character records
    /// sharing a (block, line) id.
    fn page_lines(&self, page_index: usize) -> Result<Vec<Vec<CharRecord>>, BackendError>;
}

/// Trait for annotation backends accepting resolved links.
///
/// One call per resolved token, in token-discovery order. Implementors must
/// not merge or deduplicate rectangles, even overlapping ones.
pub trait LinkSink {
    fn insert_link(&mut self, page_index: usize, rect: Rect, uri: &str)
    -> Result<(), BackendError>;
}
