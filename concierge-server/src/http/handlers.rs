//! Route handlers for the two endpoints the surface exposes (§6).

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Json};
use axum::http::header;
use futures::stream::Stream;
use tokio_stream::StreamExt;

use crate::dto::{ChatRequest, HealthResponse};
use crate::engine::{ConciergeEngine, ServerEvent};
use crate::http::error::ApiError;

pub async fn health(State(engine): State<Arc<ConciergeEngine>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        rag_ready: !engine.retriever.reviews.is_empty(),
    })
}

/// `POST /api/v1/chat` (§6): a buffered JSON response when
/// `options.enable_generation == false`, an SSE stream otherwise.
pub async fn chat(State(engine): State<Arc<ConciergeEngine>>, Json(request): Json<ChatRequest>) -> axum::response::Response {
    let history = request.options.history.clone();
    if !request.options.enable_generation() {
        return match engine.query(&request.query, &request.options, history.as_ref()).await {
            Ok(result) => Json(serde_json::json!({
                "references": result.references,
                "timing": result.timing,
            }))
            .into_response(),
            Err(err) => ApiError::from(err).into_response(),
        };
    }

    let stream = engine.query_stream(request.query, request.options, history);
    let sse_stream = stream.map(|event| Ok::<Event, Infallible>(to_sse_event(event)));
    sse_response(sse_stream)
}

fn sse_response<S>(stream: S) -> axum::response::Response
where
    S: Stream<Item = Result<Event, Infallible>> + Send + 'static,
{
    let sse = Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)));
    let mut response = sse.into_response();
    // §6: disable proxy buffering so tokens reach the client as they're generated.
    response.headers_mut().insert("X-Accel-Buffering", header::HeaderValue::from_static("no"));
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, header::HeaderValue::from_static("no-cache"));
    response
}

fn to_sse_event(event: ServerEvent) -> Event {
    match event {
        ServerEvent::Intent { need_retrieval } => {
            Event::default().event("intent").json_data(serde_json::json!({ "need_retrieval": need_retrieval })).unwrap_or_default()
        }
        ServerEvent::References(references) => Event::default().event("references").json_data(references).unwrap_or_default(),
        ServerEvent::Chunk { content } => Event::default().event("chunk").json_data(serde_json::json!({ "content": content })).unwrap_or_default(),
        ServerEvent::Done { timing } => Event::default().event("done").json_data(serde_json::json!({ "timing": timing })).unwrap_or_default(),
        ServerEvent::Error { message } => Event::default().event("error").json_data(serde_json::json!({ "error": message })).unwrap_or_default(),
    }
}
