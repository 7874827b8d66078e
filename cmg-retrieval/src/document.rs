//! Data types for reference memos, chunks, and retrieval results.

use serde::{Deserialize, Serialize};

/// The borrower ratio set a reference memo was generated from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FinancialSnapshot {
    /// Debt service coverage ratio.
    pub dscr: f64,
    /// Leverage ratio (total debt / total assets).
    pub leverage_ratio: f64,
    /// Current ratio (current assets / current liabilities).
    pub current_ratio: f64,
}

/// Display and filter metadata shared by a document and all of its chunks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentInfo {
    /// Short memo title, e.g. "Term loan — Harborview Catering LLC".
    pub title: String,
    /// Borrower legal name.
    pub borrower: String,
    /// Loan product, e.g. "SBA 7(a) term loan".
    pub loan_type: String,
    /// Industry category used for query matching and filtering.
    pub industry: String,
    /// Internal risk rating, 1 (strongest) to 5 (weakest).
    pub risk_score: u8,
    /// Credit committee recommendation from the memo.
    pub recommendation: String,
    /// Ratio set the memo was generated from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financials: Option<FinancialSnapshot>,
}

/// A reference credit memo in the knowledge base.
///
/// Documents are created once at corpus build time and never mutated.
/// `text` holds the risk-analysis narrative that gets chunked and embedded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the memo, e.g. `memo-0007`.
    pub id: String,
    /// The risk-analysis narrative.
    pub text: String,
    /// Metadata inherited by every chunk of this document.
    pub info: DocumentInfo,
}

/// A bounded-length slice of a [`Document`]'s narrative, the unit of retrieval.
///
/// A chunk belongs to exactly one document and is discarded with it on
/// rebuild. Chunk IDs are derived as `{document_id}-{position + 1}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier, derivable from the owning document and position.
    pub id: String,
    /// The ID of the owning [`Document`].
    pub document_id: String,
    /// 0-based position of this chunk within the document.
    pub position: usize,
    /// The chunk's slice of the narrative.
    pub text: String,
    /// Metadata inherited from the owning document.
    pub info: DocumentInfo,
}

impl Chunk {
    /// Construct a chunk for `document` at `position` with the given text.
    pub fn new(document: &Document, position: usize, text: String) -> Self {
        Self {
            id: format!("{}-{}", document.id, position + 1),
            document_id: document.id.clone(),
            position,
            text,
            info: document.info.clone(),
        }
    }
}

/// A retrieved [`Chunk`] paired with its cosine similarity to the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Cosine similarity in `[-1, 1]`; higher is more similar.
    pub score: f32,
}

/// The outcome of a [`retrieve`](crate::Retriever::retrieve) call.
///
/// `matches` holds at most `k` entries, ordered by descending score and
/// deduplicated so no two entries share an owning document. `context_used`
/// tells the memo-generation caller whether similar-case context was
/// actually found, so the surrounding application can disclose a memo
/// drafted without it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Whether any similar-case context was retrieved.
    pub context_used: bool,
    /// Retrieved chunks, best first, one per source document.
    pub matches: Vec<ScoredChunk>,
}

impl RetrievalResult {
    /// The empty result returned on the degraded path.
    pub fn empty() -> Self {
        Self::default()
    }
}
