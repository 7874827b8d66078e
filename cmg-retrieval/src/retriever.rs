//! Retrieval orchestration: query synthesis → embedding → search → dedup.
//!
//! [`Retriever`] is the single public entry point the memo-generation
//! caller uses. Retrieval is an enhancement, never a hard dependency:
//! when it is disabled by configuration or the embedding backend is
//! unavailable at query time, [`retrieve`](Retriever::retrieve) returns an
//! explicit empty result instead of an error so memo generation proceeds
//! without similar-case context.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::RetrievalConfig;
use crate::document::RetrievalResult;
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, RetrievalError};
use crate::index::{IndexHandle, SearchFilter};
use crate::query::{QueryProfile, build_query};

/// Orchestrates the retrieval path over a published index.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use cmg_retrieval::{IndexHandle, QueryProfile, RetrievalConfig, Retriever};
///
/// let retriever = Retriever::new(
///     RetrievalConfig::default(),
///     Arc::new(embedder),
///     Arc::new(handle),
/// );
/// let result = retriever.retrieve(&profile, 3).await?;
/// ```
pub struct Retriever {
    config: RetrievalConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<IndexHandle>,
}

impl Retriever {
    /// Create a retriever over the given embedder and index handle.
    pub fn new(
        config: RetrievalConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<IndexHandle>,
    ) -> Self {
        Self { config, embedder, index }
    }

    /// Return a reference to the retrieval configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Retrieve up to `k` reference chunks similar to the borrower profile,
    /// at most one per source document.
    ///
    /// # Errors
    ///
    /// - [`RetrievalError::InvalidInput`] if `k == 0`.
    /// - [`RetrievalError::EmptyIndex`] if no index has been published.
    /// - [`RetrievalError::ModelMismatch`] if the published index was built
    ///   with a different embedding model.
    ///
    /// Embedding-service unavailability is *not* an error here: it degrades
    /// to an empty result with `context_used = false`.
    pub async fn retrieve(&self, profile: &QueryProfile, k: usize) -> Result<RetrievalResult> {
        let query = build_query(profile);
        debug!(%query, k, "synthesized retrieval query");
        self.run_query(&query, k, &SearchFilter::default()).await
    }

    /// Retrieve by free-form keywords instead of a financial profile, with
    /// an optional risk-score constraint.
    ///
    /// Same contract and degraded behavior as [`retrieve`](Self::retrieve).
    pub async fn retrieve_keywords(
        &self,
        keywords: &[&str],
        k: usize,
        risk_score: Option<u8>,
    ) -> Result<RetrievalResult> {
        let query = keywords.join(" ");
        self.run_query(&query, k, &SearchFilter { risk_score, borrower: None }).await
    }

    async fn run_query(
        &self,
        query: &str,
        k: usize,
        filter: &SearchFilter,
    ) -> Result<RetrievalResult> {
        if k == 0 {
            return Err(RetrievalError::InvalidInput("k must be greater than zero".to_string()));
        }

        if !self.config.enabled {
            debug!("retrieval disabled by configuration");
            return Ok(RetrievalResult::empty());
        }

        let index = self.index.current().await?;

        if index.model_id() != self.embedder.model_id() {
            return Err(RetrievalError::ModelMismatch {
                index_model: index.model_id().to_string(),
                embedder_model: self.embedder.model_id().to_string(),
            });
        }

        let query_vector = match self.embedder.embed(query).await {
            Ok(vector) => vector,
            Err(RetrievalError::EmbeddingUnavailable { provider, message }) => {
                warn!(%provider, %message, "query-time embedding unavailable, degrading to empty result");
                return Ok(RetrievalResult::empty());
            }
            Err(err) => return Err(err),
        };

        // Oversample so per-document deduplication still fills k slots.
        let raw = index.search_filtered(&query_vector, k * self.config.oversample, filter)?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut matches = Vec::with_capacity(k);
        for candidate in raw {
            if candidate.score < self.config.similarity_floor {
                break;
            }
            if seen.insert(candidate.chunk.document_id.clone()) {
                matches.push(candidate);
                if matches.len() == k {
                    break;
                }
            }
        }

        info!(result_count = matches.len(), "retrieval completed");

        Ok(RetrievalResult { context_used: !matches.is_empty(), matches })
    }
}
