use serde::{Deserialize, Serialize};

use super::defaults;

/// Multi-factor ranker weights and decay constants (§4.4), overridable per
/// request via HTTP `options` but defaulting to the values named throughout
/// the spec.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub w_relevance: f64,
    pub w_quality: f64,
    pub w_length: f64,
    pub w_review: f64,
    pub w_useful: f64,
    pub w_recency: f64,
    pub base_decay: f64,
    pub implied_boost: f64,
    pub clear_boost: f64,
    pub half_life_days: i64,
    pub length_norm_divisor: f64,
    pub review_count_norm_divisor: f64,
    pub useful_count_norm_divisor: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            w_relevance: defaults::w_relevance(),
            w_quality: defaults::w_quality(),
            w_length: defaults::w_length(),
            w_review: defaults::w_review(),
            w_useful: defaults::w_useful(),
            w_recency: defaults::w_recency(),
            base_decay: defaults::base_decay(),
            implied_boost: defaults::implied_boost(),
            clear_boost: defaults::clear_boost(),
            half_life_days: defaults::half_life_days(),
            length_norm_divisor: defaults::length_norm_divisor(),
            review_count_norm_divisor: defaults::review_count_norm_divisor(),
            useful_count_norm_divisor: defaults::useful_count_norm_divisor(),
        }
    }
}
