mod generation_error;
mod index_error;
mod query_error;
mod ranking_error;
mod retrieval_error;

pub use generation_error::GenerationError;
pub use index_error::IndexError;
pub use query_error::QueryUnderstandingError;
pub use ranking_error::RankingError;
pub use retrieval_error::RetrievalError;

/// Top-level pipeline error, composed from every subsystem's own error enum.
///
/// The orchestrator is the only place that needs to see all variants at once;
/// every other crate returns its own narrower error type.
#[derive(Debug, thiserror::Error)]
pub enum ConciergeError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    QueryUnderstanding(#[from] QueryUnderstandingError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl ConciergeError {
    /// Whether this error represents caller input that should never be retried (§7).
    ///
    /// Zero enabled routes is grouped here alongside an explicit
    /// `InvalidInput`: both are caller mistakes the server can reject
    /// immediately rather than retry or degrade.
    pub fn is_input_invalid(&self) -> bool {
        matches!(self, ConciergeError::InvalidInput { .. })
            || matches!(self, ConciergeError::Retrieval(RetrievalError::NoRoutesEnabled))
    }

    /// Whether this error is fatal to the request (§7: only recognition failure qualifies).
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ConciergeError::QueryUnderstanding(QueryUnderstandingError::RecognitionFailed { .. })
        )
    }
}

pub type ConciergeResult<T> = Result<T, ConciergeError>;
