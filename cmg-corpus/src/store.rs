//! JSON persistence for reference corpora.
//!
//! The on-disk representation is a plain JSON array of documents — an
//! implementation convenience, not a contractual format. Generated corpora
//! are written once at setup time and reloaded on process start, so the
//! index rebuild does not depend on regenerating from the same seed.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use cmg_retrieval::Document;
use tracing::info;

use crate::error::Result;

/// Load a corpus previously written with [`save_documents`].
///
/// # Errors
///
/// Returns [`CorpusError::Io`](crate::CorpusError::Io) if the file cannot
/// be read and [`CorpusError::Parse`](crate::CorpusError::Parse) if it is
/// not a valid document array.
pub fn load_documents(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let documents: Vec<Document> = serde_json::from_reader(reader)?;

    info!(path = %path.display(), count = documents.len(), "loaded reference corpus");

    Ok(documents)
}

/// Write a corpus as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`CorpusError::Io`](crate::CorpusError::Io) if the file cannot
/// be created and [`CorpusError::Parse`](crate::CorpusError::Parse) if
/// serialization fails.
pub fn save_documents(path: impl AsRef<Path>, documents: &[Document]) -> Result<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, documents)?;

    info!(path = %path.display(), count = documents.len(), "saved reference corpus");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CorpusError;
    use crate::generator::{GeneratorConfig, generate_corpus};

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");

        let documents = generate_corpus(&GeneratorConfig { seed: 5, count: 6 }).unwrap();
        save_documents(&path, &documents).unwrap();
        let loaded = load_documents(&path).unwrap();

        assert_eq!(documents, loaded);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_documents("/nonexistent/corpus.json").unwrap_err();
        assert!(matches!(err, CorpusError::Io(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        std::fs::write(&path, "{ not a document array").unwrap();

        let err = load_documents(&path).unwrap_err();
        assert!(matches!(err, CorpusError::Parse(_)));
    }
}
