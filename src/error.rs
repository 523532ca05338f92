//! Error types for notare operations.

use thiserror::Error;

/// Errors that can occur while segmenting or highlighting an article.
///
/// None of the highlighting errors are fatal: whenever one is returned the
/// content tree is exactly as it was before the call.
#[derive(Error, Debug)]
pub enum Error {
    #[error("word index {index} out of range for {len} words")]
    InvalidIndex { index: usize, len: usize },

    #[error("no sentence to highlight")]
    NoTargetSentence,

    #[error("sentence overlaps an existing highlight")]
    AmbiguousOverlap,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cli")]
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
