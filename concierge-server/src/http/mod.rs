//! HTTP surface (§6): the thin transport shell around [`ConciergeEngine`],
//! translating requests into engine calls and engine results into JSON or SSE.

mod error;
mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::engine::ConciergeEngine;

pub fn router(engine: Arc<ConciergeEngine>) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/chat", post(handlers::chat))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}
