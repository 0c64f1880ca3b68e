/// Hybrid-retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("no retrieval route is enabled")]
    NoRoutesEnabled,

    #[error("route '{route}' failed: {reason}")]
    RouteFailed { route: String, reason: String },

    #[error("embedding call failed: {reason}")]
    EmbeddingFailed { reason: String },

    #[error("comment_id {comment_id} missing from review table")]
    UnknownComment { comment_id: String },
}
