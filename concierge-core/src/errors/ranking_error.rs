/// Multi-factor ranking subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("rerank call failed: {reason}")]
    RerankFailed { reason: String },
}
