use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid-retriever tunables (§6 `options`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub route_topk: usize,
    pub retrieval_topk: usize,
    pub ranking_topk: usize,
    pub enable_expansion: bool,
    pub enable_bm25: bool,
    pub enable_vector: bool,
    pub enable_reverse: bool,
    pub enable_hyde: bool,
    pub enable_summary: bool,
    pub enable_ranking: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            route_topk: defaults::route_topk(),
            retrieval_topk: defaults::retrieval_topk(),
            ranking_topk: defaults::ranking_topk(),
            enable_expansion: true,
            enable_bm25: true,
            enable_vector: true,
            enable_reverse: true,
            enable_hyde: true,
            enable_summary: true,
            enable_ranking: true,
        }
    }
}

impl RetrievalConfig {
    /// The streaming entry point defaults `enable_hyde` to `false` (§6) since
    /// HyDE's extra LLM round-trip hurts time-to-first-token; non-streaming
    /// callers keep the `true` default above.
    pub fn for_streaming() -> Self {
        Self {
            enable_hyde: false,
            ..Self::default()
        }
    }

    pub fn enabled_route_count(&self) -> usize {
        [
            self.enable_bm25,
            self.enable_vector,
            self.enable_reverse,
            self.enable_hyde,
            self.enable_summary,
        ]
        .into_iter()
        .filter(|&enabled| enabled)
        .count()
    }
}
