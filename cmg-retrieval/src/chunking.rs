//! Narrative chunking.
//!
//! This module provides the [`Chunker`] trait and [`SentenceChunker`], the
//! production strategy: accumulate whole sentences up to a target length,
//! never splitting inside a word.

use tracing::debug;

use crate::config::ChunkConfig;
use crate::document::{Chunk, Document};
use crate::error::Result;

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s tagged with their 0-based position and
/// the owning document's metadata. Embeddings are attached later by the
/// index build.
pub trait Chunker: Send + Sync {
    /// Split a document into an ordered sequence of chunks.
    ///
    /// Returns an empty `Vec` for a document with empty text.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::InvalidInput`](crate::RetrievalError::InvalidInput)
    /// if the chunking configuration is malformed.
    fn chunk(&self, document: &Document) -> Result<Vec<Chunk>>;
}

/// Splits narrative text at sentence boundaries into bounded-length chunks.
///
/// Sentences end at `.`, `!`, or `?` followed by whitespace (or end of
/// text). Sentences are accumulated until the running length would pass
/// `target_chars + tolerance_chars`, then the chunk is flushed. A single
/// sentence longer than the bound is emitted as its own chunk rather than
/// truncated, so no narrative text is ever lost.
///
/// # Example
///
/// ```rust,ignore
/// use cmg_retrieval::{ChunkConfig, Chunker, SentenceChunker};
///
/// let chunker = SentenceChunker::new(ChunkConfig::with_target(300));
/// let chunks = chunker.chunk(&document)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SentenceChunker {
    config: ChunkConfig,
}

impl SentenceChunker {
    /// Create a new `SentenceChunker` with the given configuration.
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }
}

/// Split text into trimmed sentences, keeping terminators attached.
///
/// A terminator only ends a sentence when followed by whitespace or the end
/// of the text, so decimals ("1.25x") stay intact.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?')
            && chars.peek().is_none_or(|next| next.is_whitespace())
        {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

impl Chunker for SentenceChunker {
    fn chunk(&self, document: &Document) -> Result<Vec<Chunk>> {
        self.config.validate()?;

        if document.text.is_empty() {
            return Ok(Vec::new());
        }

        let bound = self.config.target_chars + self.config.tolerance_chars;
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut current = String::new();

        for sentence in split_sentences(&document.text) {
            if current.is_empty() {
                // An oversized sentence lands here and is emitted whole below.
                current = sentence;
            } else if current.len() + 1 + sentence.len() <= bound {
                current.push(' ');
                current.push_str(&sentence);
            } else {
                chunks.push(Chunk::new(document, chunks.len(), std::mem::take(&mut current)));
                current = sentence;
            }
        }

        if !current.is_empty() {
            chunks.push(Chunk::new(document, chunks.len(), current));
        }

        debug!(
            document.id = %document.id,
            chunk_count = chunks.len(),
            target_chars = self.config.target_chars,
            "chunked document"
        );

        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentInfo;
    use crate::error::RetrievalError;

    fn doc(text: &str) -> Document {
        Document {
            id: "memo-0001".to_string(),
            text: text.to_string(),
            info: DocumentInfo {
                title: "Working capital line — test".to_string(),
                borrower: "Test Borrower LLC".to_string(),
                loan_type: "Revolving line of credit".to_string(),
                industry: "Restaurant".to_string(),
                risk_score: 3,
                recommendation: "Approve with covenants".to_string(),
                financials: None,
            },
        }
    }

    /// Collapse all whitespace runs to single spaces.
    fn normalize(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        let chunker = SentenceChunker::default();
        let chunks = chunker.chunk(&doc("")).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn short_document_yields_single_chunk() {
        let chunker = SentenceChunker::default();
        let chunks = chunker.chunk(&doc("The borrower shows adequate coverage.")).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].id, "memo-0001-1");
        assert_eq!(chunks[0].position, 0);
        assert_eq!(chunks[0].text, "The borrower shows adequate coverage.");
    }

    #[test]
    fn zero_target_length_is_invalid_input() {
        let chunker = SentenceChunker::new(ChunkConfig::with_target(0));
        let err = chunker.chunk(&doc("Some narrative.")).unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidInput(_)));
    }

    #[test]
    fn chunks_respect_length_bound_and_word_boundaries() {
        let text = "Revenue grew steadily over the review period. Margins held near \
                    the industry median despite input cost pressure. The borrower \
                    maintained positive working capital in every quarter. Debt service \
                    coverage stayed above covenant minimums. Management has a ten year \
                    operating history in the trade area. Deposit balances support the \
                    liquidity position.";
        let config = ChunkConfig { target_chars: 120, tolerance_chars: 20 };
        let chunker = SentenceChunker::new(config);
        let chunks = chunker.chunk(&doc(text)).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.len() <= config.target_chars + config.tolerance_chars);
            // A boundary never lands inside a word: each chunk starts and ends
            // on non-whitespace and its words all appear in the source.
            for word in chunk.text.split_whitespace() {
                assert!(text.contains(word), "word {word:?} not found in source");
            }
        }
    }

    #[test]
    fn concatenating_chunks_reconstructs_the_text() {
        let text = "First finding. Second finding follows! Third finding asks a \
                    question? Fourth finding closes the analysis.";
        let chunker = SentenceChunker::new(ChunkConfig { target_chars: 40, tolerance_chars: 10 });
        let chunks = chunker.chunk(&doc(text)).unwrap();

        let rebuilt = chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join(" ");
        assert_eq!(normalize(&rebuilt), normalize(text));

        // Positions are dense and ordered.
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.position, i);
        }
    }

    #[test]
    fn oversized_sentence_is_emitted_whole() {
        let long_sentence = "The borrower operates a seasonal catering business with \
                             revenue concentrated in the second and fourth quarters, \
                             offset by a standby line that covers trough months.";
        let config = ChunkConfig { target_chars: 50, tolerance_chars: 10 };
        let chunker = SentenceChunker::new(config);
        let chunks = chunker.chunk(&doc(long_sentence)).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, long_sentence);
        // Over the bound, and identifiable as the single-sentence overflow
        // case: no internal sentence boundary.
        assert!(chunks[0].text.len() > config.target_chars + config.tolerance_chars);
        assert_eq!(split_sentences(&chunks[0].text).len(), 1);
    }

    #[test]
    fn decimal_ratios_do_not_split_sentences() {
        let text = "Coverage measured 1.25x at year end. Leverage stood at 0.45 of assets.";
        let sentences = split_sentences(text);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "Coverage measured 1.25x at year end.");
    }

    #[test]
    fn chunks_inherit_document_metadata() {
        let chunker = SentenceChunker::default();
        let document = doc("A single sentence of analysis.");
        let chunks = chunker.chunk(&document).unwrap();
        assert_eq!(chunks[0].info, document.info);
        assert_eq!(chunks[0].document_id, document.id);
    }
}
