//! Error types for the `cmg-corpus` crate.

use thiserror::Error;

/// Errors that can occur while generating or loading a reference corpus.
///
/// These are all setup-time failures and always surface to the operator;
/// a partial corpus is never returned.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Reading or writing a corpus file failed.
    #[error("corpus I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A corpus file could not be parsed.
    #[error("corpus parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Malformed generator parameters.
    #[error("invalid generator parameters: {0}")]
    InvalidParams(String),
}

/// A convenience result type for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;
