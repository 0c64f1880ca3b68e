//! # concierge-ranking
//!
//! Multi-factor ranking (§4.4): blends cross-encoder relevance with quality,
//! length, review/useful counts, and time-sensitivity-aware recency.

pub mod ranker;
pub mod timing;

pub use ranker::MultiFactorRanker;
pub use timing::RankingTiming;
