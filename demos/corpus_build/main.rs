//! # Corpus Build Demo
//!
//! Generates a synthetic reference corpus, persists it as JSON, reloads
//! it, and prints the statistics an operator would check after a rebuild.
//!
//! Run: `cargo run --example corpus_build -- [path]`

use cmg_corpus::{GeneratorConfig, generate_corpus, load_documents, save_documents};
use cmg_retrieval::{ChunkConfig, HashEmbeddingProvider, build_index};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "reference_corpus.json".to_string());

    let documents = generate_corpus(&GeneratorConfig::default())?;
    save_documents(&path, &documents)?;
    println!("Wrote {} memos to {path}", documents.len());

    // Reload and index, the way the serving process would at startup.
    let reloaded = load_documents(&path)?;
    let embedder = HashEmbeddingProvider::default();
    let index = build_index(&reloaded, &embedder, ChunkConfig::default()).await?;

    let stats = index.stats();
    println!("\nCorpus statistics:");
    println!("  memos:      {}", stats.document_count);
    println!("  chunks:     {}", stats.chunk_count);
    println!("  dimensions: {}", stats.dimensions);
    println!("  model:      {}", stats.model_id);
    println!("  chunks by risk score:");
    for (score, count) in &stats.by_risk_score {
        println!("    {score}: {count}");
    }

    Ok(())
}
