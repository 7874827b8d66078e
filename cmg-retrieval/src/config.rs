//! Configuration for chunking and retrieval.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetrievalError};

/// Default target chunk length in characters.
pub const DEFAULT_TARGET_CHARS: usize = 300;

/// Default slack allowed past the target length before a chunk is flushed.
pub const DEFAULT_TOLERANCE_CHARS: usize = 40;

/// Chunking parameters.
///
/// `target_chars` bounds chunk length; a chunk may run up to
/// `target_chars + tolerance_chars` when that avoids breaking at an awkward
/// sentence boundary. A single sentence longer than both is emitted whole
/// rather than truncated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Approximate maximum chunk length in characters.
    pub target_chars: usize,
    /// Extra characters a chunk may run past the target.
    pub tolerance_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self { target_chars: DEFAULT_TARGET_CHARS, tolerance_chars: DEFAULT_TOLERANCE_CHARS }
    }
}

impl ChunkConfig {
    /// Create a config with the given target length and the default tolerance.
    pub fn with_target(target_chars: usize) -> Self {
        Self { target_chars, ..Self::default() }
    }

    /// Validate the config.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::InvalidInput`] if `target_chars` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.target_chars == 0 {
            return Err(RetrievalError::InvalidInput(
                "chunk target length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration parameters for the retriever.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Whether retrieval is enabled at all. When `false`, `retrieve` returns
    /// an empty result so memo generation proceeds without similar-case
    /// context.
    pub enabled: bool,
    /// Oversampling factor applied to `k` when querying the index, to leave
    /// room for per-document deduplication.
    pub oversample: usize,
    /// Minimum cosine similarity a match must reach to be kept. The default
    /// of `-1.0` keeps everything; production deployments typically raise
    /// this to weed out weak matches.
    pub similarity_floor: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { enabled: true, oversample: 3, similarity_floor: -1.0 }
    }
}

impl RetrievalConfig {
    /// Create a new builder for constructing a [`RetrievalConfig`].
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    config: RetrievalConfig,
}

impl RetrievalConfigBuilder {
    /// Enable or disable retrieval.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Set the oversampling factor used before deduplication.
    pub fn oversample(mut self, oversample: usize) -> Self {
        self.config.oversample = oversample;
        self
    }

    /// Set the minimum similarity a match must reach.
    pub fn similarity_floor(mut self, floor: f32) -> Self {
        self.config.similarity_floor = floor;
        self
    }

    /// Build the [`RetrievalConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::InvalidInput`] if:
    /// - `oversample == 0`
    /// - `similarity_floor` is outside `[-1, 1]`
    pub fn build(self) -> Result<RetrievalConfig> {
        if self.config.oversample == 0 {
            return Err(RetrievalError::InvalidInput(
                "oversample must be greater than zero".to_string(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.config.similarity_floor) {
            return Err(RetrievalError::InvalidInput(format!(
                "similarity_floor ({}) must be within [-1, 1]",
                self.config.similarity_floor
            )));
        }
        Ok(self.config)
    }
}
