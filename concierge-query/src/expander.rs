//! Intent Expander (§4.2): rewrites a query into 1–3 weighted sub-queries.

use std::sync::Arc;

use concierge_core::constants::MAX_SUB_QUERIES;
use concierge_core::models::{validate_sub_queries, SubQuery};
use concierge_core::traits::LlmClient;
use serde::Deserialize;

use crate::retry::{strip_json_fence, with_bounded_retry};

#[derive(Debug, Deserialize)]
struct RawExpansion {
    sub_queries: Vec<SubQuery>,
}

fn prompt(query: &str) -> String {
    format!(
        "Rewrite the hotel question below into 1 to {MAX_SUB_QUERIES} weighted sub-queries that \
         together cover its intent. Each weight must be a multiple of 0.2 and all weights must \
         sum to exactly 1.0. If the question is already narrow, return a single sub-query with \
         weight 1.0.\n\
         Reply with a single JSON object: {{\"sub_queries\": [{{\"query\": \"...\", \"weight\": \
         0.6}}, ...]}}. No commentary.\n\n\
         User query: {query}"
    )
}

/// Expands a query into weighted sub-queries for multi-route retrieval.
pub struct IntentExpander {
    llm: Arc<dyn LlmClient>,
}

impl IntentExpander {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Best-effort (§4.2): falls back to the identity sub-query `[query]` once
    /// every attempt has failed to produce a structurally valid expansion.
    pub async fn expand(&self, query: &str) -> Vec<SubQuery> {
        let prompt = prompt(query);
        let llm = &self.llm;

        let raw = with_bounded_retry("intent_expander", || async {
            let response = llm.generate(&prompt, 0.3, true).await?;
            let cleaned = strip_json_fence(&response);
            let parsed: RawExpansion = serde_json::from_str(cleaned).map_err(|e| {
                concierge_core::errors::GenerationError::CallFailed {
                    reason: format!("expander response not valid JSON: {e}"),
                }
            })?;
            if !validate_sub_queries(&parsed.sub_queries) {
                return Err(concierge_core::errors::GenerationError::CallFailed {
                    reason: "expander response failed sub-query invariants".to_string(),
                });
            }
            Ok(parsed.sub_queries)
        })
        .await;

        raw.unwrap_or_else(|| vec![SubQuery::identity(query)])
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
    async fn valid_expansion_is_returned_as_is() {
        let expander = IntentExpander::new(Arc::new(StubLlm(
            r#"{"sub_queries": [{"query": "早餐质量", "weight": 0.6}, {"query": "早餐种类", "weight": 0.4}]}"#,
        )));
        let subs = expander.expand("早餐怎么样").await;
        assert_eq!(subs.len(), 2);
        assert!((subs.iter().map(|s| s.weight).sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn weights_not_summing_to_one_fall_back_to_identity() {
        let expander = IntentExpander::new(Arc::new(StubLlm(
            r#"{"sub_queries": [{"query": "早餐质量", "weight": 0.6}, {"query": "早餐种类", "weight": 0.6}]}"#,
        )));
        let subs = expander.expand("早餐怎么样").await;
        assert_eq!(subs, vec![SubQuery::identity("早餐怎么样")]);
    }

    #[tokio::test]
    async fn unparseable_response_falls_back_to_identity() {
        let expander = IntentExpander::new(Arc::new(StubLlm("garbage")));
        let subs = expander.expand("随便问问").await;
        assert_eq!(subs, vec![SubQuery::identity("随便问问")]);
    }
}
