use async_trait::async_trait;

use crate::errors::RetrievalError;

/// Batch dense-embedding provider. Every dense route shares one embedding call
/// per request (§4.3) so this trait is batch-only; single-text embedding is
/// just `embed_batch` with one element. Vectors are always
/// [`crate::constants::EMBEDDING_DIM`]-dimensional; implementations validate
/// this, callers don't need to.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError>;
}
