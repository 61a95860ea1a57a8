//! In-memory document search: a forward index and an inverted index built
//! once from a flat corpus file, queried through a weight-ranked searcher
//! that annotates every hit with a text snippet.

pub mod corpus;
pub mod error;
pub mod index;
pub mod searcher;
pub mod snippet;
pub mod tokenizer;

pub use corpus::{CorpusRecord, FIELD_SEPARATOR};
pub use error::{IndexError, RecordError};
pub use index::{BuildStats, Document, IndexStore, Posting, TITLE_WEIGHT, BODY_WEIGHT};
pub use searcher::{RankedDoc, SearchHit, Searcher};
pub use snippet::Snippet;
pub use tokenizer::{Tokenizer, WordTokenizer};

/// Dense, zero-based position of a document in the forward index.
pub type DocId = u32;
