/// Streaming-generation subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation call failed: {reason}")]
    CallFailed { reason: String },

    #[error("generation stream closed before any content was produced")]
    EmptyStream,
}
