//! Intent Recognizer (§4.2): the one fatal query-understanding stage.

use std::sync::Arc;

use concierge_core::errors::QueryUnderstandingError;
use concierge_core::models::PreviousTurn;
use concierge_core::traits::LlmClient;

const RETRIEVAL_TAG: &str = "RETRIEVAL";
const DIRECT_TAG: &str = "DIRECT";

fn system_prompt() -> String {
    format!(
        "You are a helpful hotel assistant. You should choose one tag from the tag list:\n\
         {{\"{RETRIEVAL_TAG}\": \"questions that require the hotel review knowledge base to \
         answer (facilities, service, location, price, or other concrete details)\", \
         \"{DIRECT_TAG}\": \"general questions answerable directly (greetings, small talk, \
         common knowledge unrelated to this hotel)\"}}\n\
         Just reply with the chosen tag."
    )
}

/// Classifies an utterance as requiring retrieval or answerable directly.
pub struct IntentRecognizer {
    llm: Arc<dyn LlmClient>,
}

impl IntentRecognizer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Returns `true` when retrieval is required. Failure is fatal (§4.2):
    /// the downstream branch depends on this decision, so there is no
    /// fallback to degrade to, unlike every other query-understanding stage.
    pub async fn recognize(
        &self,
        query: &str,
        history: Option<&PreviousTurn>,
    ) -> Result<bool, QueryUnderstandingError> {
        if query.trim().is_empty() {
            return Err(QueryUnderstandingError::EmptyQuery);
        }

        let mut prompt = system_prompt();
        if let Some(turn) = history {
            prompt.push_str(&format!(
                "\n\nPrevious turn — user: {}\nPrevious turn — assistant: {}",
                turn.user, turn.assistant
            ));
        }
        prompt.push_str(&format!("\n\nUser query: {query}"));

        let response = self
            .llm
            .generate(&prompt, 0.0, false)
            .await
            .map_err(|e| QueryUnderstandingError::RecognitionFailed {
                reason: e.to_string(),
            })?;

        Ok(response.trim() == RETRIEVAL_TAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use concierge_core::errors::GenerationError;
    use futures::stream::BoxStream;

    struct StubLlm(&'static str);

    #[async_trait]
    impl LlmClient for StubLlm {
        async fn generate(&self, _prompt: &str, _temp: f64, _json: bool) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }

        async fn generate_stream(
            &self,
            _prompt: &str,
            _temp: f64,
        ) -> Result<BoxStream<'static, Result<String, GenerationError>>, GenerationError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn retrieval_tag_yields_true() {
        let recognizer = IntentRecognizer::new(Arc::new(StubLlm("RETRIEVAL")));
        assert!(recognizer.recognize("早餐怎么样", None).await.unwrap());
    }

    #[tokio::test]
    async fn direct_tag_yields_false() {
        let recognizer = IntentRecognizer::new(Arc::new(StubLlm("DIRECT")));
        assert!(!recognizer.recognize("你好", None).await.unwrap());
    }

    #[tokio::test]
    async fn empty_query_is_rejected_before_any_call() {
        let recognizer = IntentRecognizer::new(Arc::new(StubLlm("RETRIEVAL")));
        assert!(recognizer.recognize("   ", None).await.is_err());
    }
}
