//! Per-stage timing for the ranking pass (§4.4, §6 response envelope).

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RankingTiming {
    pub total: f64,
    pub rerank: f64,
    pub scoring: f64,
}

pub fn elapsed_secs(start: std::time::Instant) -> f64 {
    start.elapsed().as_secs_f64()
}
