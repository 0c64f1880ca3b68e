//! Maps [`ConciergeError`] onto HTTP status codes per §7: input mistakes are
//! never retried and surface as 4xx, everything else the orchestrator
//! couldn't recover from surfaces as 5xx.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use concierge_core::errors::ConciergeError;
use serde_json::json;

pub struct ApiError(pub ConciergeError);

impl From<ConciergeError> for ApiError {
    fn from(err: ConciergeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_input_invalid() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        tracing::warn!(error = %self.0, status = %status, "request failed");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
