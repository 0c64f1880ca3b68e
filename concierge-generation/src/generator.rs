//! Streaming response generator (§4.5).

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use concierge_core::errors::GenerationError;
use concierge_core::models::{CategorySummary, PreviousTurn, RankedCandidate, SubQuery};
use concierge_core::traits::LlmClient;
use futures::stream::BoxStream;
use futures::StreamExt;

use crate::prompt::{build_direct_prompt, build_retrieval_prompt};

const GENERATION_TEMPERATURE: f64 = 0.7;

/// Timing captured from a single streamed generation (§4.5, §6 envelope).
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationTiming {
    /// Time to first token, measured from the moment generation starts.
    pub ttft: f64,
    /// Wall-clock spent after the first token arrived.
    pub subsequent: f64,
    /// Total wall-clock for the whole call.
    pub generation: f64,
}

/// What to ground the response in; `Direct` skips retrieval context entirely
/// (§4.2 DIRECT branch), `Retrieval` carries everything gathered upstream.
pub enum GenerationContext<'a> {
    Direct,
    Retrieval {
        sub_queries: Option<&'a [SubQuery]>,
        ranked_comments: Option<&'a [RankedCandidate]>,
        summaries: Option<&'a [CategorySummary]>,
        today: NaiveDate,
    },
}

/// Builds prompts and drives the chat-completion model. Works identically for
/// the Beijing and Singapore-endpoint deployments — only the [`LlmClient`]
/// implementation handed in at construction differs between them.
pub struct Generator {
    llm: Arc<dyn LlmClient>,
}

impl Generator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    fn build_prompt(&self, user_query: &str, context: &GenerationContext<'_>, history: Option<&PreviousTurn>) -> String {
        match context {
            GenerationContext::Direct => build_direct_prompt(user_query, history),
            GenerationContext::Retrieval {
                sub_queries,
                ranked_comments,
                summaries,
                today,
            } => build_retrieval_prompt(
                user_query,
                *sub_queries,
                *ranked_comments,
                *summaries,
                history,
                *today,
            ),
        }
    }

    /// The non-streaming convenience path (§4.5): buffers the whole stream
    /// and reports the same three timing figures as the streaming path would.
    pub async fn generate(
        &self,
        user_query: &str,
        context: GenerationContext<'_>,
        history: Option<&PreviousTurn>,
    ) -> Result<(String, GenerationTiming), GenerationError> {
        let prompt = self.build_prompt(user_query, &context, history);
        let start = Instant::now();

        let mut stream = self.llm.generate_stream(&prompt, GENERATION_TEMPERATURE).await?;

        let mut content = String::new();
        let mut ttft = 0.0;
        let mut first_token_at = None;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if ttft == 0.0 {
                ttft = start.elapsed().as_secs_f64();
                first_token_at = Some(Instant::now());
            }
            content.push_str(&chunk);
        }

        if content.is_empty() {
            return Err(GenerationError::EmptyStream);
        }

        let subsequent = first_token_at.map(|t| t.elapsed().as_secs_f64()).unwrap_or(0.0);
        let generation = start.elapsed().as_secs_f64();

        Ok((content, GenerationTiming { ttft, subsequent, generation }))
    }

    /// The streaming path (§4.5, §4.6): yields raw content chunks. Timing is
    /// the orchestrator's responsibility here since it has to interleave
    /// chunks with SSE events as they arrive, not after the fact.
    pub async fn generate_stream(
        &self,
        user_query: &str,
        context: GenerationContext<'_>,
        history: Option<&PreviousTurn>,
    ) -> Result<BoxStream<'static, Result<String, GenerationError>>, GenerationError> {
        let prompt = self.build_prompt(user_query, &context, history);
        self.llm.generate_stream(&prompt, GENERATION_TEMPERATURE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::stream;

    struct StubLlm(Vec<&'static str>);

    #[async_trait]
    impl LlmClient for StubLlm {
        async fn generate(&self, _prompt: &str, _t: f64, _j: bool) -> Result<String, GenerationError> {
            Ok(self.0.concat())
        }

        async fn generate_stream(
            &self,
            _prompt: &str,
            _t: f64,
        ) -> Result<BoxStream<'static, Result<String, GenerationError>>, GenerationError> {
            let chunks = self.0.clone();
            Ok(stream::iter(chunks.into_iter().map(|c| Ok(c.to_string()))).boxed())
        }
    }

    #[tokio::test]
    async fn generate_buffers_every_chunk_and_reports_ttft() {
        let generator = Generator::new(Arc::new(StubLlm(vec!["早餐很好", "，服务也热情。"])));
        let (text, timing) = generator
            .generate("早餐怎么样", GenerationContext::Direct, None)
            .await
            .unwrap();
        assert_eq!(text, "早餐很好，服务也热情。");
        assert!(timing.generation >= timing.ttft);
    }

    #[tokio::test]
    async fn empty_stream_is_an_error() {
        let generator = Generator::new(Arc::new(StubLlm(vec![])));
        let result = generator.generate("你好", GenerationContext::Direct, None).await;
        assert!(matches!(result, Err(GenerationError::EmptyStream)));
    }
}
