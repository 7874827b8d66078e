//! # Memo Context Demo
//!
//! Demonstrates the full retrieval path: generate a synthetic reference
//! corpus, build the similarity index, then retrieve similar-case context
//! for a borrower profile and print the block the memo generator would
//! feed its LLM prompt.
//!
//! Uses the deterministic [`HashEmbeddingProvider`] so it runs with
//! **zero API keys**.
//!
//! Run: `cargo run --example memo_context`

use std::sync::Arc;

use cmg_corpus::{GeneratorConfig, generate_corpus};
use cmg_retrieval::{
    ChunkConfig, EmbeddingProvider, HashEmbeddingProvider, IndexHandle, QueryProfile,
    RetrievalConfig, Retriever, build_index, build_query, format_context,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // -- 1. Generate the reference corpus ---------------------------------
    // 24 seeded memos rotating through all five risk tiers.
    let documents = generate_corpus(&GeneratorConfig::default())?;
    println!("Generated {} reference memos", documents.len());

    // -- 2. Build the similarity index ------------------------------------
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(HashEmbeddingProvider::default());
    let index = build_index(&documents, embedder.as_ref(), ChunkConfig::default()).await?;

    let stats = index.stats();
    println!(
        "Indexed {} chunks from {} memos ({} dims, model {})",
        stats.chunk_count, stats.document_count, stats.dimensions, stats.model_id
    );

    let handle = Arc::new(IndexHandle::preloaded(index));
    let retriever = Retriever::new(RetrievalConfig::default(), embedder, handle);

    // -- 3. Retrieve context for a borrower profile -----------------------
    // A stressed restaurant: weak coverage, aggressive leverage, strained
    // liquidity.
    let profile = QueryProfile::new("Restaurant", 0.9, 0.75, 1.2);
    println!("\nQuery: \"{}\"", build_query(&profile));

    let result = retriever.retrieve(&profile, 3).await?;
    println!(
        "Retrieved {} similar cases (context_used = {})\n",
        result.matches.len(),
        result.context_used
    );

    for (i, scored) in result.matches.iter().enumerate() {
        println!(
            "  {}. [score={:.4}] {} | {} (risk {}/5)",
            i + 1,
            scored.score,
            scored.chunk.document_id,
            scored.chunk.info.borrower,
            scored.chunk.info.risk_score,
        );
    }

    // -- 4. Render the LLM prompt block -----------------------------------
    println!("\n{}", format_context(&result));

    Ok(())
}
