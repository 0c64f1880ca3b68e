use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::route_hit::RouteRanks;

/// Metadata carried alongside a fused candidate, embedded directly from the
/// review row so downstream stages never need a second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMetadata {
    pub score: f64,
    pub publish_date: NaiveDate,
    pub quality_score: f64,
    pub review_count: u64,
    pub useful_count: u64,
    pub room_type: Option<String>,
    pub fuzzy_room_type: Option<String>,
}

/// The fused view of a review produced by the hybrid retriever (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub comment_id: String,
    pub comment: String,
    pub rrf_score: f64,
    pub rrf_rank: usize,
    pub route_ranks: RouteRanks,
    pub metadata: CandidateMetadata,
}
