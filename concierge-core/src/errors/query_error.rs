/// Query-understanding subsystem errors.
///
/// Only the recognizer is fatal (§4.2); detector, expander, and HyDE degrade
/// to a documented fallback instead of producing one of these.
#[derive(Debug, thiserror::Error)]
pub enum QueryUnderstandingError {
    #[error("intent recognition failed after retry: {reason}")]
    RecognitionFailed { reason: String },

    #[error("empty query")]
    EmptyQuery,
}
