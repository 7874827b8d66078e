//! Property tests for similarity index search ordering.

use std::collections::HashMap;

use async_trait::async_trait;
use cmg_retrieval::{
    Chunk, DocumentInfo, EmbeddingProvider, Result, SimilarityIndex,
};
use proptest::prelude::*;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

fn chunk(i: usize) -> Chunk {
    Chunk {
        id: format!("memo-{i:04}-1"),
        document_id: format!("memo-{i:04}"),
        position: 0,
        text: format!("narrative {i}"),
        info: DocumentInfo {
            title: format!("Reference memo {i}"),
            borrower: format!("Borrower {i}"),
            loan_type: "Term loan".to_string(),
            industry: "Restaurant".to_string(),
            risk_score: 3,
            recommendation: "Approve".to_string(),
            financials: None,
        },
    }
}

/// Embedder serving pre-generated vectors keyed by chunk text.
struct FixedEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dimensions: usize,
}

#[async_trait]
impl EmbeddingProvider for FixedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vectors.get(text).cloned().unwrap_or_else(|| vec![0.0; self.dimensions]))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        "fixed-embed/test"
    }
}

/// For any set of embedded chunks, `search` returns results ordered by
/// non-increasing cosine similarity, at most `top_k` of them, with exact
/// ties broken by ascending chunk id.
mod prop_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_descending_and_bounded_by_top_k(
            embeddings in proptest::collection::vec(arb_normalized_embedding(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            top_k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, chunk_count) = rt.block_on(async {
                let chunks: Vec<Chunk> = (0..embeddings.len()).map(chunk).collect();
                let vectors: HashMap<String, Vec<f32>> = chunks
                    .iter()
                    .zip(&embeddings)
                    .map(|(c, v)| (c.text.clone(), v.clone()))
                    .collect();
                let embedder = FixedEmbedder { vectors, dimensions: DIM };

                let count = chunks.len();
                let index = SimilarityIndex::build(chunks, &embedder).await.unwrap();
                (index.search(&query, top_k).unwrap(), count)
            });

            // Result count is at most top_k and at most the number of chunks.
            prop_assert!(results.len() <= top_k);
            prop_assert!(results.len() <= chunk_count);

            // Results are ordered by descending score, ties by ascending id.
            for window in results.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
                if window[0].score == window[1].score {
                    prop_assert!(window[0].chunk.id < window[1].chunk.id);
                }
            }
        }
    }
}
