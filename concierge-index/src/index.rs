//! BM25 inverted index over the review corpus (§4.1).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use concierge_core::errors::IndexError;

use crate::tokenizer::{self, tokenize};

/// Serialized, process-lifetime inverted index. Built offline, loaded once at
/// startup (§3); immutable for the life of the process thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: HashMap<String, HashMap<String, u32>>,
    doc_lengths: HashMap<String, u32>,
    doc_frequencies: HashMap<String, u32>,
    num_docs: u32,
    avg_doc_length: f64,
    stopwords: HashSet<String>,
    k1: f64,
    b: f64,
}

impl InvertedIndex {
    pub fn k1(&self) -> f64 {
        self.k1
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    fn idf(&self, term: &str) -> f64 {
        let df = match self.doc_frequencies.get(term) {
            Some(&df) => df as f64,
            None => return 0.0,
        };
        let n = self.num_docs as f64;
        (((n - df + 0.5) / (df + 0.5)) + 1.0).ln().max(0.0)
    }

    /// Score a single document against already-tokenized query terms.
    fn score_doc(&self, doc_id: &str, query_terms: &[String]) -> f64 {
        let doc_len = *self.doc_lengths.get(doc_id).unwrap_or(&0) as f64;
        if self.avg_doc_length == 0.0 {
            return 0.0;
        }

        query_terms
            .iter()
            .map(|term| {
                let idf = self.idf(term);
                if idf <= 0.0 {
                    return 0.0;
                }
                let tf = self
                    .postings
                    .get(term)
                    .and_then(|postings| postings.get(doc_id))
                    .copied()
                    .unwrap_or(0) as f64;
                if tf == 0.0 {
                    return 0.0;
                }
                let numerator = tf * (self.k1 + 1.0);
                let denominator =
                    tf + self.k1 * (1.0 - self.b + self.b * doc_len / self.avg_doc_length);
                idf * numerator / denominator
            })
            .sum()
    }

    /// Top-K `(comment_id, score)` for `query`, sorted by score descending,
    /// ties broken by comment_id ascending (§4.1). An empty token list after
    /// filtering returns an empty result set, never an error.
    pub fn search(&self, query: &str, topk: usize) -> Vec<(String, f64)> {
        let query_terms = tokenize(query, &self.stopwords);
        if query_terms.is_empty() {
            return Vec::new();
        }

        let candidate_docs: HashSet<&String> = query_terms
            .iter()
            .filter_map(|term| self.postings.get(term))
            .flat_map(|postings| postings.keys())
            .collect();

        let mut scored: Vec<(String, f64)> = candidate_docs
            .into_par_iter()
            .map(|doc_id| (doc_id.clone(), self.score_doc(doc_id, &query_terms)))
            .filter(|(_, score)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(topk);
        scored
    }

    /// Serialize the full index to a single blob (§4.1 Persistence).
    pub fn persist(&self, path: &Path) -> Result<(), IndexError> {
        let bytes = bincode::serialize(self).map_err(|e| IndexError::PersistFailed {
            reason: e.to_string(),
        })?;
        std::fs::write(path, bytes).map_err(|e| IndexError::PersistFailed {
            reason: e.to_string(),
        })
    }

    /// Load is atomic: either the full structure deserializes or this fails
    /// entirely, never a partially-populated index.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let bytes = std::fs::read(path).map_err(|e| IndexError::LoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        bincode::deserialize(&bytes).map_err(|e| IndexError::LoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Builds an [`InvertedIndex`] offline from the review corpus.
pub struct IndexBuilder {
    postings: HashMap<String, HashMap<String, u32>>,
    doc_lengths: HashMap<String, u32>,
    doc_frequencies: HashMap<String, u32>,
    stopwords: HashSet<String>,
    k1: f64,
    b: f64,
}

impl IndexBuilder {
    pub fn new(k1: f64, b: f64, stopwords: HashSet<String>) -> Self {
        Self {
            postings: HashMap::new(),
            doc_lengths: HashMap::new(),
            doc_frequencies: HashMap::new(),
            stopwords,
            k1,
            b,
        }
    }

    pub fn with_default_stopwords(k1: f64, b: f64) -> Self {
        Self::new(k1, b, tokenizer::default_stopwords())
    }

    /// Tokenize and index one document. `doc_id` must be unique; re-adding
    /// the same id double-counts it, so callers build from a deduplicated corpus.
    pub fn add_document(&mut self, doc_id: impl Into<String>, text: &str) {
        let doc_id = doc_id.into();
        let terms = tokenize(text, &self.stopwords);
        self.doc_lengths.insert(doc_id.clone(), terms.len() as u32);

        let mut term_freqs: HashMap<String, u32> = HashMap::new();
        for term in &terms {
            *term_freqs.entry(term.clone()).or_insert(0) += 1;
        }

        for (term, freq) in term_freqs {
            self.postings
                .entry(term.clone())
                .or_default()
                .insert(doc_id.clone(), freq);
            *self.doc_frequencies.entry(term).or_insert(0) += 1;
        }
    }

    pub fn build(self) -> InvertedIndex {
        let num_docs = self.doc_lengths.len() as u32;
        let avg_doc_length = if num_docs > 0 {
            self.doc_lengths.values().sum::<u32>() as f64 / num_docs as f64
        } else {
            0.0
        };

        InvertedIndex {
            postings: self.postings,
            doc_lengths: self.doc_lengths,
            doc_frequencies: self.doc_frequencies,
            num_docs,
            avg_doc_length,
            stopwords: self.stopwords,
            k1: self.k1,
            b: self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_fixture() -> InvertedIndex {
        let mut builder = IndexBuilder::with_default_stopwords(1.5, 0.75);
        builder.add_document("A", "花园 早餐 很好");
        builder.add_document("B", "早餐 一般");
        builder.build()
    }

    #[test]
    fn bm25_single_term_ranks_both_documents() {
        let index = build_fixture();
        let results = index.search("早餐", 10);
        let ids: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
        assert!(ids.contains(&"A"));
        assert!(ids.contains(&"B"));
        // Both match with equal tf and equal idf, so BM25's length
        // normalization decides: B ("早餐 一般", 4 tokens) is shorter than
        // the corpus average and scores higher than A ("花园 早餐 很好", 6 tokens).
        let a_score = results.iter().find(|(id, _)| id == "A").unwrap().1;
        let b_score = results.iter().find(|(id, _)| id == "B").unwrap().1;
        assert!(b_score >= a_score);
    }

    #[test]
    fn empty_query_returns_empty_results() {
        let index = build_fixture();
        assert!(index.search("", 10).is_empty());
    }

    #[test]
    fn terms_absent_from_index_contribute_zero() {
        let index = build_fixture();
        let results = index.search("游泳池", 10);
        assert!(results.is_empty());
    }

    #[test]
    fn ties_break_on_comment_id_ascending() {
        let mut builder = IndexBuilder::with_default_stopwords(1.5, 0.75);
        builder.add_document("Z", "早餐");
        builder.add_document("A", "早餐");
        let index = builder.build();
        let results = index.search("早餐", 10);
        assert_eq!(results[0].0, "A");
        assert_eq!(results[1].0, "Z");
    }

    #[test]
    fn persist_and_load_round_trip() {
        let index = build_fixture();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.bin");
        index.persist(&path).unwrap();
        let loaded = InvertedIndex::load(&path).unwrap();

        let before = index.search("早餐", 10);
        let after = loaded.search("早餐", 10);
        assert_eq!(before, after);
    }
}
