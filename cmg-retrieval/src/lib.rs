//! # cmg-retrieval
//!
//! Similarity retrieval engine for the CMG credit memo generator.
//!
//! Given a borrower's financial profile, retrieves the most similar
//! passages from a knowledge base of prior credit memos so the memo
//! generator can ground its draft in comparable cases:
//!
//! 1. **Chunking** — reference memo narratives are split at sentence
//!    boundaries into bounded-length [`Chunk`]s ([`SentenceChunker`]).
//! 2. **Embedding + index** — chunks are embedded
//!    ([`EmbeddingProvider`]) and indexed for exact cosine
//!    nearest-neighbor search ([`SimilarityIndex`]), with the serving
//!    index swapped atomically through an [`IndexHandle`].
//! 3. **Query + retrieval** — a [`QueryProfile`] is rendered into a
//!    deterministic search sentence, embedded, and matched top-k with
//!    per-document deduplication ([`Retriever`]).
//!
//! Retrieval is an enhancement to memo generation, never a dependency:
//! if the embedding backend is down at query time, or retrieval is
//! disabled, the [`Retriever`] returns an empty [`RetrievalResult`]
//! (flagged `context_used = false`) and the caller proceeds without
//! similar-case context.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cmg_retrieval::{
//!     ChunkConfig, HashEmbeddingProvider, IndexHandle, QueryProfile,
//!     RetrievalConfig, Retriever, build_index,
//! };
//!
//! let embedder = Arc::new(HashEmbeddingProvider::default());
//! let index = build_index(&documents, embedder.as_ref(), ChunkConfig::default()).await?;
//! let handle = Arc::new(IndexHandle::preloaded(index));
//!
//! let retriever = Retriever::new(RetrievalConfig::default(), embedder, handle);
//! let profile = QueryProfile::new("Restaurant", 0.9, 0.75, 1.2);
//! let result = retriever.retrieve(&profile, 3).await?;
//! ```

pub mod chunking;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod hash;
pub mod index;
pub mod query;
#[cfg(feature = "remote")]
pub mod remote;
pub mod retriever;

pub use chunking::{Chunker, SentenceChunker};
pub use config::{ChunkConfig, RetrievalConfig, RetrievalConfigBuilder};
pub use context::{NO_CONTEXT_SENTENCE, format_context};
pub use document::{Chunk, Document, DocumentInfo, FinancialSnapshot, RetrievalResult, ScoredChunk};
pub use embedding::EmbeddingProvider;
pub use error::{Result, RetrievalError};
pub use hash::HashEmbeddingProvider;
pub use index::{IndexHandle, IndexStats, SearchFilter, SimilarityIndex, build_index};
pub use query::{
    CoverageBucket, LeverageBucket, LiquidityBucket, QueryProfile, build_query,
};
#[cfg(feature = "remote")]
pub use remote::RemoteEmbeddingProvider;
pub use retriever::Retriever;
