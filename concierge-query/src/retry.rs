//! Shared bounded-retry helper for the best-effort query-understanding stages (§4.2).

use std::future::Future;

use concierge_core::constants::{LLM_STRUCTURED_RETRY_ATTEMPTS, LLM_STRUCTURED_RETRY_BACKOFF_MS};

/// Run `attempt` up to [`LLM_STRUCTURED_RETRY_ATTEMPTS`] times, sleeping
/// [`LLM_STRUCTURED_RETRY_BACKOFF_MS`] between tries. Returns `None` (never
/// an error) once every attempt has failed, logging each failure as it
/// occurs; the caller substitutes the documented fallback value.
pub async fn with_bounded_retry<F, Fut, T, E>(stage: &str, mut attempt: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    for i in 0..LLM_STRUCTURED_RETRY_ATTEMPTS {
        match attempt().await {
            Ok(value) => return Some(value),
            Err(err) => {
                tracing::warn!(stage, attempt = i + 1, error = %err, "best-effort stage attempt failed");
                if i + 1 < LLM_STRUCTURED_RETRY_ATTEMPTS {
                    tokio::time::sleep(std::time::Duration::from_millis(
                        LLM_STRUCTURED_RETRY_BACKOFF_MS,
                    ))
                    .await;
                }
            }
        }
    }
    tracing::warn!(stage, "all retry attempts exhausted, falling back to default");
    None
}

/// LLMs are asked for raw JSON but frequently wrap it in a markdown code
/// fence anyway; strip that defensively before parsing.
pub fn strip_json_fence(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}
