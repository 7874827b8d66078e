//! Similarity index: exact nearest-neighbor search over chunk embeddings.
//!
//! [`SimilarityIndex`] is an immutable container built once from the full
//! chunk set. [`IndexHandle`] is the process-wide swap point: serving code
//! reads through it while rebuilds publish a fresh index atomically.
//!
//! The corpus is small (tens of documents), so search is an exact
//! brute-force cosine scan. The contract — descending score, ties broken by
//! ascending chunk id — is what an approximate index would also have to
//! honor for any exact-score ties it returns.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::chunking::{Chunker, SentenceChunker};
use crate::config::ChunkConfig;
use crate::document::{Chunk, Document, ScoredChunk};
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, RetrievalError};

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Optional metadata constraints applied before top-k selection.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Keep only chunks with this risk score.
    pub risk_score: Option<u8>,
    /// Keep only chunks whose borrower name contains this substring,
    /// case-insensitively.
    pub borrower: Option<String>,
}

impl SearchFilter {
    fn matches(&self, chunk: &Chunk) -> bool {
        if self.risk_score.is_some_and(|score| chunk.info.risk_score != score) {
            return false;
        }
        if let Some(borrower) = &self.borrower {
            if !chunk.info.borrower.to_lowercase().contains(&borrower.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Summary statistics for a built index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    /// Total chunks indexed.
    pub chunk_count: usize,
    /// Distinct source documents.
    pub document_count: usize,
    /// Vector dimensionality.
    pub dimensions: usize,
    /// Embedding model the vectors were produced with.
    pub model_id: String,
    /// Chunk count per risk score.
    pub by_risk_score: BTreeMap<u8, usize>,
}

#[derive(Debug)]
struct IndexEntry {
    chunk: Chunk,
    vector: Vec<f32>,
}

/// An immutable nearest-neighbor index over `(Chunk, Vector)` pairs.
///
/// Built once from the full chunk set; rebuilding is a full replace through
/// [`IndexHandle::publish`], never an in-place mutation, so concurrent
/// `search` calls need no locking.
#[derive(Debug)]
pub struct SimilarityIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
    model_id: String,
}

impl SimilarityIndex {
    /// Build an index by embedding every chunk with `embedder`.
    ///
    /// Deterministic for the same chunks and embedder. Any embedding
    /// failure aborts the build; a partially embedded corpus is never
    /// published.
    ///
    /// # Errors
    ///
    /// - [`RetrievalError::EmbeddingUnavailable`] if the embedder fails.
    /// - [`RetrievalError::DimensionMismatch`] if any vector's
    ///   dimensionality differs from the first vector seen.
    pub async fn build(chunks: Vec<Chunk>, embedder: &dyn EmbeddingProvider) -> Result<Self> {
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let vectors = embedder.embed_batch(&texts).await?;

        let dimensions = vectors.first().map_or_else(|| embedder.dimensions(), Vec::len);
        for vector in &vectors {
            if vector.len() != dimensions {
                return Err(RetrievalError::DimensionMismatch {
                    expected: dimensions,
                    actual: vector.len(),
                });
            }
        }

        let entries: Vec<IndexEntry> = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| IndexEntry { chunk, vector })
            .collect();

        info!(
            chunk_count = entries.len(),
            dimensions,
            model_id = embedder.model_id(),
            "built similarity index"
        );

        Ok(Self { entries, dimensions, model_id: embedder.model_id().to_string() })
    }

    /// Search for the `k` most similar chunks to `query`.
    ///
    /// Results are ordered by descending cosine similarity; exact score
    /// ties break by ascending chunk id, so ordering is deterministic and
    /// testable.
    ///
    /// # Errors
    ///
    /// - [`RetrievalError::InvalidInput`] if `k == 0`.
    /// - [`RetrievalError::DimensionMismatch`] if `query` has the wrong
    ///   dimensionality.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        self.search_filtered(query, k, &SearchFilter::default())
    }

    /// [`search`](Self::search) with metadata constraints applied before
    /// top-k selection.
    pub fn search_filtered(
        &self,
        query: &[f32],
        k: usize,
        filter: &SearchFilter,
    ) -> Result<Vec<ScoredChunk>> {
        if k == 0 {
            return Err(RetrievalError::InvalidInput("k must be greater than zero".to_string()));
        }
        if query.len() != self.dimensions {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .filter(|entry| filter.matches(&entry.chunk))
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(&entry.vector, query),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score.total_cmp(&a.score).then_with(|| a.chunk.id.cmp(&b.chunk.id))
        });
        scored.truncate(k);
        Ok(scored)
    }

    /// Number of chunks in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vector dimensionality of this index.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Identifier of the embedding model the index was built with.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Summary statistics for operator visibility.
    pub fn stats(&self) -> IndexStats {
        let mut by_risk_score: BTreeMap<u8, usize> = BTreeMap::new();
        let mut documents: HashSet<&str> = HashSet::new();
        for entry in &self.entries {
            *by_risk_score.entry(entry.chunk.info.risk_score).or_default() += 1;
            documents.insert(entry.chunk.document_id.as_str());
        }
        IndexStats {
            chunk_count: self.entries.len(),
            document_count: documents.len(),
            dimensions: self.dimensions,
            model_id: self.model_id.clone(),
            by_risk_score,
        }
    }
}

/// Chunk a document set and build a [`SimilarityIndex`] over it.
///
/// The setup/rebuild entry point: chunks every document with a
/// [`SentenceChunker`] under `chunk_config`, then embeds and indexes the
/// result. Callable again whenever the reference corpus changes; publish
/// the returned index through [`IndexHandle::publish`].
///
/// # Errors
///
/// Propagates chunking configuration errors
/// ([`RetrievalError::InvalidInput`]) and build failures
/// ([`RetrievalError::EmbeddingUnavailable`],
/// [`RetrievalError::DimensionMismatch`]).
pub async fn build_index(
    documents: &[Document],
    embedder: &dyn EmbeddingProvider,
    chunk_config: ChunkConfig,
) -> Result<SimilarityIndex> {
    let chunker = SentenceChunker::new(chunk_config);
    let mut chunks = Vec::new();
    for document in documents {
        chunks.extend(chunker.chunk(document)?);
    }

    info!(document_count = documents.len(), chunk_count = chunks.len(), "chunked corpus");

    SimilarityIndex::build(chunks, embedder).await
}

/// The process-wide serving slot for the similarity index.
///
/// Written once at startup (or on an explicit rebuild) and read many times
/// concurrently. Readers clone the inner `Arc` and drop the lock before
/// scanning, so a rebuild never blocks behind a long search and searches
/// in flight keep the index they started with.
#[derive(Default)]
pub struct IndexHandle {
    slot: RwLock<Option<Arc<SimilarityIndex>>>,
}

impl IndexHandle {
    /// Create a handle with no index published yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle pre-loaded with a built index.
    pub fn preloaded(index: SimilarityIndex) -> Self {
        Self { slot: RwLock::new(Some(Arc::new(index))) }
    }

    /// Atomically replace the serving index.
    pub async fn publish(&self, index: SimilarityIndex) {
        let mut slot = self.slot.write().await;
        *slot = Some(Arc::new(index));
    }

    /// Get the current serving index.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::EmptyIndex`] if no index has been
    /// published; querying before setup is a caller bug and is never
    /// swallowed.
    pub async fn current(&self) -> Result<Arc<SimilarityIndex>> {
        self.slot.read().await.clone().ok_or(RetrievalError::EmptyIndex)
    }

    /// Whether an index has been published.
    pub async fn is_ready(&self) -> bool {
        self.slot.read().await.is_some()
    }
}
