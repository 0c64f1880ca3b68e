/// BM25 inverted-index errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("failed to load index blob from {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("failed to serialize index blob: {reason}")]
    PersistFailed { reason: String },

    #[error("stopword file {path} could not be read: {reason}")]
    StopwordsUnreadable { path: String, reason: String },
}
