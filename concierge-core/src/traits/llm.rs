use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::errors::GenerationError;

/// One-shot and streaming access to a chat-completion model.
///
/// Implementations wrap a concrete HTTP-backed provider; the pipeline never
/// depends on a vendor SDK, only this contract.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// A single-shot completion, used by the query-understanding stages.
    async fn generate(
        &self,
        prompt: &str,
        temperature: f64,
        json_mode: bool,
    ) -> Result<String, GenerationError>;

    /// A streamed completion, used by the generator (§4.5).
    ///
    /// Each item is one incremental content chunk.
    async fn generate_stream(
        &self,
        prompt: &str,
        temperature: f64,
    ) -> Result<BoxStream<'static, Result<String, GenerationError>>, GenerationError>;
}
