//! Error types for the `cmg-retrieval` crate.

use thiserror::Error;

/// Errors that can occur in retrieval operations.
///
/// The variants split along the propagation policy: [`InvalidInput`],
/// [`DimensionMismatch`], [`ModelMismatch`], and [`EmptyIndex`] are caller or
/// setup bugs and always surface; [`EmbeddingUnavailable`] is fatal during a
/// corpus build but recovered at query time by the retriever's degraded path.
///
/// [`InvalidInput`]: RetrievalError::InvalidInput
/// [`DimensionMismatch`]: RetrievalError::DimensionMismatch
/// [`ModelMismatch`]: RetrievalError::ModelMismatch
/// [`EmptyIndex`]: RetrievalError::EmptyIndex
/// [`EmbeddingUnavailable`]: RetrievalError::EmbeddingUnavailable
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Malformed configuration or call parameters (zero chunk length, `k == 0`).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The embedding backend could not be reached or timed out.
    #[error("embedding unavailable ({provider}): {message}")]
    EmbeddingUnavailable {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A vector's dimensionality disagrees with the rest of the index.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality established by the first vector in the index.
        expected: usize,
        /// Dimensionality of the offending vector.
        actual: usize,
    },

    /// The index was built with a different embedding model than the one
    /// now being used for queries.
    #[error("embedding model mismatch: index built with '{index_model}', embedder is '{embedder_model}'")]
    ModelMismatch {
        /// Model identifier recorded when the index was built.
        index_model: String,
        /// Model identifier of the embedder used for the query.
        embedder_model: String,
    },

    /// A search was issued before any index was built and published.
    #[error("similarity index is empty: no index has been built")]
    EmptyIndex,
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;
