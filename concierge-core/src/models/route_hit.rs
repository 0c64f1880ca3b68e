use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which retrieval route produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Bm25,
    Vector,
    Reverse,
    Hyde,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Bm25 => "bm25",
            Route::Vector => "vector",
            Route::Reverse => "reverse",
            Route::Hyde => "hyde",
        }
    }
}

/// A single hit emitted by a retrieval route (§3): `rank` is 1-based within
/// that route's (query_idx[, hyde_idx]) scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteHit {
    pub comment_id: String,
    pub route: Route,
    pub rank: usize,
    pub query_idx: usize,
    #[serde(default)]
    pub hyde_idx: Option<usize>,
}

impl RouteHit {
    pub fn new(comment_id: impl Into<String>, route: Route, rank: usize, query_idx: usize) -> Self {
        Self {
            comment_id: comment_id.into(),
            route,
            rank,
            query_idx,
            hyde_idx: None,
        }
    }

    pub fn with_hyde_idx(mut self, hyde_idx: usize) -> Self {
        self.hyde_idx = Some(hyde_idx);
        self
    }
}

/// A single route contribution recorded against a fused candidate, grouped by route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRankEntry {
    pub rank: usize,
    pub query_idx: usize,
    #[serde(default)]
    pub hyde_idx: Option<usize>,
}

/// Every route hit that contributed to a candidate's fused score, grouped by route name.
pub type RouteRanks = HashMap<String, Vec<RouteRankEntry>>;
