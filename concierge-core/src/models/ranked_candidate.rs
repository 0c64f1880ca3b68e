use serde::{Deserialize, Serialize};

use super::candidate::Candidate;

/// The per-factor scores that fed a candidate's `final_score` (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureScores {
    pub relevance: f64,
    pub quality: f64,
    pub log_comment_len: f64,
    pub log_review_count: f64,
    pub log_useful_count: f64,
    pub recency: f64,
}

/// A [`Candidate`] extended with rerank and final-blend scores (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub rerank_score: f64,
    /// Rank under relevance alone, independent of the final sort (§4.4).
    pub rerank_rank: usize,
    pub final_score: f64,
    pub final_rank: usize,
    pub feature_scores: FeatureScores,
}
