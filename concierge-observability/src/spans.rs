//! Span definitions per pipeline stage (§4.2–§4.6).
//!
//! Each span brackets one stage so latency and outcome are visible in
//! structured logs without threading timing through every call site.

/// Span for the intent recognizer (§4.2).
#[macro_export]
macro_rules! recognition_span {
    ($query:expr) => {
        tracing::info_span!("concierge.recognition", query = %$query)
    };
}

/// Span for the detector + expander fan-out (§4.2).
#[macro_export]
macro_rules! understanding_span {
    ($query:expr) => {
        tracing::info_span!("concierge.understanding", query = %$query)
    };
}

/// Span for the five-route hybrid retrieval fan-out (§4.3).
#[macro_export]
macro_rules! retrieval_span {
    ($sub_query_count:expr) => {
        tracing::info_span!("concierge.retrieval", sub_query_count = $sub_query_count)
    };
}

/// Span for one retrieval route (§4.3.1–§4.3.5).
#[macro_export]
macro_rules! route_span {
    ($route:expr) => {
        tracing::info_span!("concierge.route", route = $route)
    };
}

/// Span for multi-factor ranking (§4.4).
#[macro_export]
macro_rules! ranking_span {
    ($candidate_count:expr) => {
        tracing::info_span!("concierge.ranking", candidate_count = $candidate_count)
    };
}

/// Span for streamed generation (§4.5).
#[macro_export]
macro_rules! generation_span {
    ($need_retrieval:expr) => {
        tracing::info_span!("concierge.generation", need_retrieval = $need_retrieval)
    };
}

/// Span names as constants for programmatic use (dashboards, filters).
pub mod names {
    pub const RECOGNITION: &str = "concierge.recognition";
    pub const UNDERSTANDING: &str = "concierge.understanding";
    pub const RETRIEVAL: &str = "concierge.retrieval";
    pub const ROUTE: &str = "concierge.route";
    pub const RANKING: &str = "concierge.ranking";
    pub const GENERATION: &str = "concierge.generation";
}
