use crate::DocId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    /// The corpus could not be opened; nothing can be served.
    #[error("failed to open corpus {path}: {source}")]
    CorpusOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("doc_id {doc_id} out of range (forward index holds {len} documents)")]
    DocOutOfRange { doc_id: DocId, len: usize },
    #[error("no postings for word {0:?}")]
    NoPostings(String),
    #[error("query text is empty")]
    EmptyQuery,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 3 fields (title, content, url), found {found}")]
    FieldCount { found: usize },
}
