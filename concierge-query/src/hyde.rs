//! HyDE generator (§4.2, §4.3): hypothetical review passages used as dense-vector bait.

use std::sync::Arc;

use concierge_core::constants::{HYDE_PASSAGE_MAX_CHARS, HYDE_PASSAGE_MIN_CHARS};
use concierge_core::traits::LlmClient;
use serde::Deserialize;

use crate::retry::{strip_json_fence, with_bounded_retry};

#[derive(Debug, Deserialize)]
struct RawHypotheses {
    positive: Vec<String>,
    negative: Vec<String>,
}

fn prompt(sub_query: &str) -> String {
    format!(
        "Write hypothetical hotel-review sentences that would appear in reviews answering this \
         question, as if written by real guests. Each sentence must be between \
         {HYDE_PASSAGE_MIN_CHARS} and {HYDE_PASSAGE_MAX_CHARS} characters.\n\
         Return exactly 2 positive sentences (the hotel satisfies the question well) and exactly \
         1 negative sentence (the hotel falls short).\n\
         Reply with a single JSON object: {{\"positive\": [\"...\", \"...\"], \"negative\": \
         [\"...\"]}}. No commentary.\n\n\
         Question: {sub_query}"
    )
}

/// Generates hypothetical review passages for one sub-query (§4.3 HyDE route).
pub struct HyDEGenerator {
    llm: Arc<dyn LlmClient>,
}

impl HyDEGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Best-effort (§4.2): falls back to `[sub_query]` itself as the sole
    /// "hypothesis" once every attempt has failed to produce 2 positive + 1
    /// negative passages.
    pub async fn generate(&self, sub_query: &str) -> Vec<String> {
        let prompt = prompt(sub_query);
        let llm = &self.llm;

        let raw = with_bounded_retry("hyde_generator", || async {
            let response = llm.generate(&prompt, 0.7, true).await?;
            let cleaned = strip_json_fence(&response);
            let parsed: RawHypotheses = serde_json::from_str(cleaned).map_err(|e| {
                concierge_core::errors::GenerationError::CallFailed {
                    reason: format!("HyDE response not valid JSON: {e}"),
                }
            })?;
            if parsed.positive.len() != 2 || parsed.negative.len() != 1 {
                return Err(concierge_core::errors::GenerationError::CallFailed {
                    reason: "HyDE response did not contain 2 positive + 1 negative passages"
                        .to_string(),
                });
            }
            let mut hypotheses = parsed.positive;
            hypotheses.extend(parsed.negative);
            Ok(hypotheses)
        })
        .await;

        raw.unwrap_or_else(|| vec![sub_query.to_string()])
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
        async fn generate(&self, _p: &str, _t: f64, _j: bool) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }
        async fn generate_stream(
            &self,
            _p: &str,
            _t: f64,
        ) -> Result<BoxStream<'static, Result<String, GenerationError>>, GenerationError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn valid_response_yields_three_hypotheses() {
        let gen = HyDEGenerator::new(Arc::new(StubLlm(
            r#"{"positive": ["早餐很丰盛，种类齐全，服务也很热情。", "自助早餐非常棒，水果新鲜好吃。"], "negative": ["早餐种类偏少，选择不多。"]}"#,
        )));
        let hyps = gen.generate("早餐怎么样").await;
        assert_eq!(hyps.len(), 3);
    }

    #[tokio::test]
    async fn wrong_shape_falls_back_to_sub_query_itself() {
        let gen = HyDEGenerator::new(Arc::new(StubLlm(
            r#"{"positive": ["only one"], "negative": []}"#,
        )));
        let hyps = gen.generate("早餐怎么样").await;
        assert_eq!(hyps, vec!["早餐怎么样".to_string()]);
    }

    #[tokio::test]
    async fn unparseable_response_falls_back_to_sub_query_itself() {
        let gen = HyDEGenerator::new(Arc::new(StubLlm("not json")));
        let hyps = gen.generate("随便问问").await;
        assert_eq!(hyps, vec!["随便问问".to_string()]);
    }
}
