use crate::corpus::CorpusRecord;
use crate::error::IndexError;
use crate::tokenizer::{Tokenizer, WordTokenizer};
use crate::DocId;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Weight of one occurrence of a word in a document title.
pub const TITLE_WEIGHT: u32 = 10;
/// Weight of one occurrence of a word in a document body.
pub const BODY_WEIGHT: u32 = 1;

const PROGRESS_EVERY: usize = 50;

static SHARED: OnceCell<Arc<IndexStore>> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub doc_id: DocId,
    pub title: String,
    /// Tag-stripped body text.
    pub content: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// Lower-cased token this posting was recorded under.
    pub word: String,
    /// `TITLE_WEIGHT * title occurrences + BODY_WEIGHT * body occurrences`
    pub weight: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub indexed: usize,
    pub skipped: usize,
}

#[derive(Default)]
struct WordCount {
    title: u32,
    body: u32,
}

/// Forward and inverted indices over a corpus.
///
/// A store is only ever populated by one of the `build*` constructors and
/// exposes no mutation afterwards, so a built store can be shared across
/// threads (behind an `Arc`) and read without locking.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IndexStore {
    forward: Vec<Document>,
    inverted: HashMap<String, Vec<Posting>>,
    stats: BuildStats,
}

impl IndexStore {
    /// Build from a corpus file. Failing to open the file is the only error;
    /// malformed records are skipped and counted in [`BuildStats::skipped`].
    pub fn build_from_path<P: AsRef<Path>>(path: P, tokenizer: &dyn Tokenizer) -> Result<Self, IndexError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| IndexError::CorpusOpen { path: path.to_path_buf(), source })?;
        info!(corpus = %path.display(), "building index");
        Ok(Self::build_from_reader(BufReader::new(file), tokenizer))
    }

    /// Build from any line-oriented corpus source.
    pub fn build_from_reader<R: BufRead>(reader: R, tokenizer: &dyn Tokenizer) -> Self {
        let mut store = Self::default();
        for (line_no, line) in reader.split(b'\n').enumerate() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    warn!(line = line_no + 1, error = %e, "corpus read failed, stopping build early");
                    break;
                }
            };
            let text = String::from_utf8_lossy(&line);
            let text = text.strip_suffix('\r').unwrap_or(&text);
            match CorpusRecord::parse_line(text) {
                Ok(record) => {
                    store.add_record(record, tokenizer);
                    if store.forward.len() % PROGRESS_EVERY == 0 {
                        debug!(indexed = store.forward.len(), "indexing progress");
                    }
                }
                Err(e) => {
                    store.stats.skipped += 1;
                    warn!(line = line_no + 1, error = %e, "skipping malformed corpus record");
                }
            }
        }
        store.stats.indexed = store.forward.len();
        info!(
            indexed = store.stats.indexed,
            skipped = store.stats.skipped,
            vocabulary = store.inverted.len(),
            "index build complete"
        );
        store
    }

    /// The process-wide store, built from `path` with [`WordTokenizer`] on the
    /// first call. Later calls return the same instance and ignore `path`.
    /// A failed build leaves the cell empty so a later call may retry.
    pub fn shared<P: AsRef<Path>>(path: P) -> Result<Arc<Self>, IndexError> {
        SHARED
            .get_or_try_init(|| Self::build_from_path(path, &WordTokenizer).map(Arc::new))
            .map(Arc::clone)
    }

    fn add_record(&mut self, record: CorpusRecord, tokenizer: &dyn Tokenizer) {
        let doc_id = self.forward.len() as DocId;

        let mut counts: HashMap<String, WordCount> = HashMap::new();
        for word in tokenizer.tokenize(&record.title) {
            counts.entry(word.to_lowercase()).or_default().title += 1;
        }
        for word in tokenizer.tokenize(&record.content) {
            counts.entry(word.to_lowercase()).or_default().body += 1;
        }

        for (word, count) in counts {
            let weight = TITLE_WEIGHT * count.title + BODY_WEIGHT * count.body;
            self.inverted.entry(word.clone()).or_default().push(Posting { doc_id, word, weight });
        }

        let CorpusRecord { title, content, url } = record;
        self.forward.push(Document { doc_id, title, content, url });
    }

    pub fn get_document(&self, doc_id: DocId) -> Result<&Document, IndexError> {
        self.forward
            .get(doc_id as usize)
            .ok_or(IndexError::DocOutOfRange { doc_id, len: self.forward.len() })
    }

    /// Postings for an already lower-cased word. Postings are ordered by
    /// `doc_id`; that order carries no relevance.
    pub fn get_postings(&self, word: &str) -> Result<&[Posting], IndexError> {
        self.inverted
            .get(word)
            .map(Vec::as_slice)
            .ok_or_else(|| IndexError::NoPostings(word.to_string()))
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.inverted.len()
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }
}
