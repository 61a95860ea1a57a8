use crate::error::IndexError;
use crate::index::IndexStore;
use crate::snippet::{self, Snippet};
use crate::tokenizer::{Tokenizer, WordTokenizer};
use crate::DocId;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// A document's accumulated relevance for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedDoc {
    pub doc_id: DocId,
    /// Sum of posting weights over every matched query word.
    pub weight: u64,
    /// Query words that hit this document, in the order they were processed.
    pub matched_words: Vec<String>,
}

/// One result as handed to callers for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Query engine over a built, shared [`IndexStore`]. Cloning is cheap and
/// every method takes `&self`, so one searcher can serve concurrent queries.
#[derive(Clone)]
pub struct Searcher {
    index: Arc<IndexStore>,
    tokenizer: Arc<dyn Tokenizer>,
}

impl Searcher {
    pub fn new(index: Arc<IndexStore>, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self { index, tokenizer }
    }

    pub fn with_word_tokenizer(index: Arc<IndexStore>) -> Self {
        Self::new(index, Arc::new(WordTokenizer))
    }

    pub fn index(&self) -> &IndexStore {
        &self.index
    }

    /// Distinct lower-cased query tokens, in first-seen order.
    fn query_words(&self, query: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tokenizer
            .tokenize(query)
            .into_iter()
            .map(|w| w.to_lowercase())
            .filter(|w| seen.insert(w.clone()))
            .collect()
    }

    /// Rank every document that matches at least one query word.
    ///
    /// Ordered by accumulated weight, highest first; equal weights are broken
    /// by ascending `doc_id`.
    pub fn rank(&self, query: &str) -> Vec<RankedDoc> {
        let mut acc: HashMap<DocId, RankedDoc> = HashMap::new();
        for word in self.query_words(query) {
            let postings = match self.index.get_postings(&word) {
                Ok(p) => p,
                Err(e) => {
                    debug!(error = %e, "query word contributes nothing");
                    continue;
                }
            };
            for posting in postings {
                let entry = acc.entry(posting.doc_id).or_insert_with(|| RankedDoc {
                    doc_id: posting.doc_id,
                    weight: 0,
                    matched_words: Vec::new(),
                });
                entry.weight += u64::from(posting.weight);
                entry.matched_words.push(word.clone());
            }
        }

        let mut ranked: Vec<RankedDoc> = acc.into_values().collect();
        ranked.sort_by(|a, b| b.weight.cmp(&a.weight).then(a.doc_id.cmp(&b.doc_id)));
        ranked
    }

    /// Rank and render results. An empty or whitespace-only query is rejected;
    /// a query that matches nothing yields an empty list.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>, IndexError> {
        if query.trim().is_empty() {
            return Err(IndexError::EmptyQuery);
        }

        let ranked = self.rank(query);
        debug!(query, matches = ranked.len(), "ranked query");

        let hits = ranked
            .into_iter()
            .filter_map(|r| {
                let doc = match self.index.get_document(r.doc_id) {
                    Ok(doc) => doc,
                    Err(e) => {
                        warn!(error = %e, "dropping stale result");
                        return None;
                    }
                };
                // Every ranked doc has at least one matched word.
                let word = r.matched_words.first()?;
                let snippet = match snippet::extract(&doc.content, word) {
                    Snippet::Excerpt { text, .. } => text,
                    other => {
                        debug!(doc_id = r.doc_id, word = %word, outcome = ?other, "no snippet for result");
                        String::new()
                    }
                };
                Some(SearchHit { title: doc.title.clone(), url: doc.url.clone(), snippet })
            })
            .collect();
        Ok(hits)
    }
}
