use crate::constants::*;

pub fn route_topk() -> usize {
    DEFAULT_ROUTE_TOPK
}
pub fn retrieval_topk() -> usize {
    DEFAULT_RETRIEVAL_TOPK
}
pub fn ranking_topk() -> usize {
    DEFAULT_RANKING_TOPK
}
pub fn w_relevance() -> f64 {
    DEFAULT_W_RELEVANCE
}
pub fn w_quality() -> f64 {
    DEFAULT_W_QUALITY
}
pub fn w_length() -> f64 {
    DEFAULT_W_LENGTH
}
pub fn w_review() -> f64 {
    DEFAULT_W_REVIEW
}
pub fn w_useful() -> f64 {
    DEFAULT_W_USEFUL
}
pub fn w_recency() -> f64 {
    DEFAULT_W_RECENCY
}
pub fn base_decay() -> f64 {
    DEFAULT_BASE_DECAY
}
pub fn implied_boost() -> f64 {
    DEFAULT_IMPLIED_BOOST
}
pub fn clear_boost() -> f64 {
    DEFAULT_CLEAR_BOOST
}
pub fn half_life_days() -> i64 {
    DEFAULT_HALF_LIFE_DAYS
}
pub fn length_norm_divisor() -> f64 {
    LENGTH_NORM_DIVISOR
}
pub fn review_count_norm_divisor() -> f64 {
    REVIEW_COUNT_NORM_DIVISOR
}
pub fn useful_count_norm_divisor() -> f64 {
    USEFUL_COUNT_NORM_DIVISOR
}
pub fn bm25_k1() -> f64 {
    BM25_K1
}
pub fn bm25_b() -> f64 {
    BM25_B
}
pub fn request_timeout_ms() -> u64 {
    5_000
}
