//! # cmg-corpus
//!
//! Synthetic reference-memo corpus for the CMG credit memo generator.
//!
//! The retrieval engine needs a knowledge base of prior credit memos to
//! search over. This crate generates one: seeded, reproducible memos whose
//! narratives are assembled from industry cost profiles
//! ([`INDUSTRY_PROFILES`]) and credit tiers ([`CreditTier`]), plus JSON
//! load/store so a generated corpus can be persisted and reloaded at
//! startup.
//!
//! ```rust,ignore
//! use cmg_corpus::{GeneratorConfig, generate_corpus, save_documents};
//!
//! let documents = generate_corpus(&GeneratorConfig { seed: 2023, count: 24 })?;
//! save_documents("corpus.json", &documents)?;
//! ```

pub mod error;
pub mod generator;
pub mod profiles;
pub mod store;

pub use error::{CorpusError, Result};
pub use generator::{GeneratorConfig, generate_corpus};
pub use profiles::{CREDIT_TIERS, CreditTier, INDUSTRY_PROFILES, IndustryProfile};
pub use store::{load_documents, save_documents};
