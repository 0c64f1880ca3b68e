use serde::{Deserialize, Serialize};

use super::defaults;

/// BM25 inverted-index constants (§4.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub k1: f64,
    pub b: f64,
    /// Path to the serialized index blob, loaded once at startup.
    pub blob_path: String,
    /// Path to a configurable stopword file; merged with the built-in English stoplist.
    pub stopwords_path: Option<String>,
    /// Path to the newline-delimited JSON review corpus, loaded once at
    /// startup alongside the index (analogous to the original's `df_comments`).
    pub reviews_path: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            k1: defaults::bm25_k1(),
            b: defaults::bm25_b(),
            blob_path: "data/inverted_index.bin".to_string(),
            stopwords_path: None,
            reviews_path: "data/reviews.ndjson".to_string(),
        }
    }
}
