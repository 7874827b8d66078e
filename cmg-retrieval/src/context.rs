//! Rendering retrieval results into LLM prompt context.

use std::fmt::Write;

use crate::document::RetrievalResult;

/// The sentence substituted when retrieval produced no usable context.
pub const NO_CONTEXT_SENTENCE: &str = "No relevant examples found in the knowledge base.";

/// Format a retrieval result as the similar-cases block of an LLM prompt.
///
/// Each match renders as a numbered example with its memo metadata,
/// similarity, narrative, and recommendation, in result order. An empty
/// result renders as [`NO_CONTEXT_SENTENCE`] so the prompt template never
/// has a hole.
pub fn format_context(result: &RetrievalResult) -> String {
    if result.matches.is_empty() {
        return NO_CONTEXT_SENTENCE.to_string();
    }

    let mut out = String::new();
    for (i, scored) in result.matches.iter().enumerate() {
        let info = &scored.chunk.info;
        // write! to a String cannot fail.
        let _ = write!(
            out,
            "--- Example {n} ---\n\
             Memo ID: {memo}\n\
             Title: {title}\n\
             Borrower: {borrower}\n\
             Loan Type: {loan_type}\n\
             Industry: {industry}\n\
             Risk Score: {risk}/5\n\
             Similarity: {score:.3}\n\
             \n\
             Risk Analysis:\n{text}\n\
             \n\
             Recommendation: {recommendation}\n",
            n = i + 1,
            memo = scored.chunk.document_id,
            title = info.title,
            borrower = info.borrower,
            loan_type = info.loan_type,
            industry = info.industry,
            risk = info.risk_score,
            score = scored.score,
            text = scored.chunk.text,
            recommendation = info.recommendation,
        );
        if i + 1 < result.matches.len() {
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Chunk, DocumentInfo, ScoredChunk};

    fn scored(document_id: &str, score: f32) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk {
                id: format!("{document_id}-1"),
                document_id: document_id.to_string(),
                position: 0,
                text: "Coverage remained above covenant minimums.".to_string(),
                info: DocumentInfo {
                    title: "Equipment loan".to_string(),
                    borrower: "Summit HVAC Inc".to_string(),
                    loan_type: "Equipment term loan".to_string(),
                    industry: "HVAC Services".to_string(),
                    risk_score: 2,
                    recommendation: "Approve".to_string(),
                    financials: None,
                },
            },
            score,
        }
    }

    #[test]
    fn empty_result_renders_fixed_sentence() {
        let rendered = format_context(&RetrievalResult::empty());
        assert_eq!(rendered, NO_CONTEXT_SENTENCE);
    }

    #[test]
    fn examples_are_numbered_in_result_order() {
        let result = RetrievalResult {
            context_used: true,
            matches: vec![scored("memo-0003", 0.91), scored("memo-0007", 0.84)],
        };
        let rendered = format_context(&result);

        let first = rendered.find("--- Example 1 ---").unwrap();
        let second = rendered.find("--- Example 2 ---").unwrap();
        assert!(first < second);
        assert!(rendered.contains("Memo ID: memo-0003"));
        assert!(rendered.contains("Similarity: 0.910"));
        assert!(rendered.contains("Risk Score: 2/5"));
    }
}
