//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that maps text to fixed-dimension dense vectors.
///
/// Implementations wrap a specific embedding backend behind a unified async
/// interface. Two invariants matter to the rest of the engine:
///
/// - **Determinism** — the same text under the same [`model_id`] yields a
///   bit-identical vector, so retrieval is reproducible and cacheable.
/// - **Model consistency** — vectors from different `model_id`s must never
///   share an index; the index records the identifier at build time and the
///   retriever validates it on every query.
///
/// The default [`embed_batch`](EmbeddingProvider::embed_batch) calls
/// [`embed`](EmbeddingProvider::embed) sequentially; backends with native
/// batching should override it.
///
/// [`model_id`]: EmbeddingProvider::model_id
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::EmbeddingUnavailable`](crate::RetrievalError::EmbeddingUnavailable)
    /// when the backend cannot be reached or times out. Callers treat this
    /// as fatal during a corpus build and as retryable/degradable at query
    /// time.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    ///
    /// The default implementation embeds each input sequentially. A failure
    /// on any input fails the whole batch; a partially embedded corpus is
    /// never acceptable.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of vectors produced by this provider.
    fn dimensions(&self) -> usize;

    /// Return the identifier of the model/version backing this provider.
    fn model_id(&self) -> &str;
}
