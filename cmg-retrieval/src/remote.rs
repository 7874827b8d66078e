//! Remote embedding provider backed by an HTTP embedding service.
//!
//! This module is only available when the `remote` feature is enabled.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{Result, RetrievalError};

/// The default model requested from the embedding service.
const DEFAULT_MODEL: &str = "all-mpnet-base-v2";

/// The default dimensionality for `all-mpnet-base-v2`.
const DEFAULT_DIMENSIONS: usize = 768;

/// The default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// An [`EmbeddingProvider`] backed by an HTTP embedding service.
///
/// Posts `{ "model": ..., "input": [...] }` to the configured endpoint and
/// expects `{ "data": [{ "embedding": [...] }, ...] }` back, one entry per
/// input in order.
///
/// Every failure — connection refused, non-2xx status, malformed body, or
/// timeout — surfaces as
/// [`RetrievalError::EmbeddingUnavailable`], which the retriever degrades
/// on at query time and the index build treats as fatal.
///
/// # Example
///
/// ```rust,ignore
/// use cmg_retrieval::remote::RemoteEmbeddingProvider;
///
/// let provider = RemoteEmbeddingProvider::new("http://embedder:8080/v1/embeddings")?
///     .with_timeout(Duration::from_secs(5));
/// let vector = provider.embed("strong liquidity").await?;
/// ```
pub struct RemoteEmbeddingProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    model_id: String,
    dimensions: usize,
}

impl RemoteEmbeddingProvider {
    /// Create a provider for the given endpoint with the default model,
    /// dimensions, and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::EmbeddingUnavailable`] if the endpoint is
    /// empty or the HTTP client cannot be constructed.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(RetrievalError::EmbeddingUnavailable {
                provider: "remote".into(),
                message: "endpoint must not be empty".into(),
            });
        }

        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build().map_err(|e| {
            RetrievalError::EmbeddingUnavailable {
                provider: "remote".into(),
                message: format!("failed to build HTTP client: {e}"),
            }
        })?;

        Ok(Self {
            client,
            endpoint,
            model: DEFAULT_MODEL.into(),
            model_id: format!("{DEFAULT_MODEL}/{DEFAULT_DIMENSIONS}"),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Set the model name and its dimensionality.
    ///
    /// This also updates [`model_id()`](EmbeddingProvider::model_id), so an
    /// index built under one model is rejected for queries under another.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.model_id = format!("{}/{dimensions}", self.model);
        self.dimensions = dimensions;
        self
    }

    /// Set the per-request timeout.
    ///
    /// A timeout during an index build aborts the build; a timeout at query
    /// time triggers the retriever's degraded empty-result path.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        // reqwest applies the timeout per request, covering connect + read.
        if let Ok(client) = reqwest::Client::builder().timeout(timeout).build() {
            self.client = client;
        }
        self
    }
}

// ── Embedding service request/response types ───────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for RemoteEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "remote", text_len = text.len(), "embedding single text");

        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| RetrievalError::EmbeddingUnavailable {
            provider: "remote".into(),
            message: "service returned empty response".into(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            provider = "remote",
            batch_size = texts.len(),
            model = %self.model,
            "embedding batch"
        );

        let request_body = EmbeddingRequest { model: &self.model, input: texts.to_vec() };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "remote", error = %e, "request failed");
                RetrievalError::EmbeddingUnavailable {
                    provider: "remote".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            error!(provider = "remote", %status, "embedding service error");
            return Err(RetrievalError::EmbeddingUnavailable {
                provider: "remote".into(),
                message: format!("service returned {status}: {body}"),
            });
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            error!(provider = "remote", error = %e, "failed to parse response");
            RetrievalError::EmbeddingUnavailable {
                provider: "remote".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(embedding_response.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
