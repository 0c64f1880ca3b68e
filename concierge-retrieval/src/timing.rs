//! Per-route and per-request timing (§4.3, §6 response envelope).

use serde::Serialize;

/// The HyDE route's timing breakdown: `generation`/`retrieval` are each the
/// slowest of that stage across every sub-query, not a sum (§4.3.4) — one
/// sub-query's HyDE generation running alongside another's retrieval is the
/// point of the fan-out.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct HydeTiming {
    pub total: f64,
    pub generation: f64,
    pub retrieval: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RouteTimings {
    pub bm25: f64,
    pub vector: f64,
    pub reverse: f64,
    pub hyde: HydeTiming,
    pub summary: f64,
    pub rrf_fusion: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RetrievalTiming {
    pub routes: RouteTimings,
    pub total: f64,
}

/// Wall-clock seconds elapsed since `start`, as an `f64` to match the
/// envelope's timing fields.
pub fn elapsed_secs(start: std::time::Instant) -> f64 {
    start.elapsed().as_secs_f64()
}
