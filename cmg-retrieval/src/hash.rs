//! Deterministic hash-derived embedding provider.
//!
//! [`HashEmbeddingProvider`] produces normalized vectors from a content
//! hash, with no model download and no network. It backs the demos and the
//! test suite, and doubles as a stand-in in environments where the real
//! embedding service is not configured.

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;
use crate::error::Result;

/// Default dimensionality, matching the production sentence-embedding model.
pub const DEFAULT_HASH_DIMENSIONS: usize = 768;

/// An [`EmbeddingProvider`] that derives vectors from a text hash.
///
/// The same text always yields a bit-identical vector, and the vector is
/// L2-normalized so cosine similarity reduces to a dot product. Similarity
/// between *different* texts is essentially arbitrary; this provider is for
/// determinism, not semantic quality.
///
/// # Example
///
/// ```rust,ignore
/// use cmg_retrieval::HashEmbeddingProvider;
///
/// let provider = HashEmbeddingProvider::new(768);
/// let vector = provider.embed("strong debt service coverage").await?;
/// assert_eq!(vector.len(), 768);
/// ```
#[derive(Debug, Clone)]
pub struct HashEmbeddingProvider {
    dimensions: usize,
    model_id: String,
}

impl HashEmbeddingProvider {
    /// Create a provider producing vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, model_id: format!("hash-embed-v1/{dimensions}") }
    }
}

impl Default for HashEmbeddingProvider {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_DIMENSIONS)
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        // FNV-style rolling hash seeds a per-component sine sweep, so the
        // direction of the vector depends on the whole input.
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));

        let mut vector = vec![0.0f32; self.dimensions];
        for (i, component) in vector.iter_mut().enumerate() {
            *component = ((hash.wrapping_add(i as u64)) as f32).sin();
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_text_yields_bit_identical_vectors() {
        let provider = HashEmbeddingProvider::new(32);
        let a = provider.embed("adequate liquidity").await.unwrap();
        let b = provider.embed("adequate liquidity").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn vectors_are_normalized_with_fixed_dimensions() {
        let provider = HashEmbeddingProvider::new(64);
        let v = provider.embed("weak coverage").await.unwrap();
        assert_eq!(v.len(), 64);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn different_texts_yield_different_vectors() {
        let provider = HashEmbeddingProvider::new(64);
        let a = provider.embed("strong coverage").await.unwrap();
        let b = provider.embed("weak coverage").await.unwrap();
        assert_ne!(a, b);
    }
}
