//! The per-request timing envelope returned to callers (§4.6, §6), assembled
//! by the orchestrator out of each stage's own timing type.

use concierge_ranking::RankingTiming;
use concierge_retrieval::timing::RetrievalTiming;
use serde::Serialize;

/// Matches the `timing` dict built stage-by-stage as the request progresses;
/// `retrieval`/`ranking` are only populated on the RETRIEVAL branch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimingReport {
    pub intent_recognition: f64,
    pub intent_detection: f64,
    pub intent_expansion: f64,
    pub query_processing_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval: Option<RetrievalTiming>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<RankingTiming>,
    pub ttft: f64,
    pub ttft_model: f64,
    pub subsequent: f64,
    pub generation: f64,
    pub total: f64,
}
