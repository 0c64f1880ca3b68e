//! Intent Detector (§4.2): extracts room-type and time-sensitivity constraints.

use std::sync::Arc;

use concierge_core::constants::{EXACT_ROOM_TYPES, FUZZY_ROOM_TYPES};
use concierge_core::models::{QueryConstraints, TimeSensitivity};
use concierge_core::traits::LlmClient;
use serde::Deserialize;

use crate::retry::{strip_json_fence, with_bounded_retry};

#[derive(Debug, Deserialize)]
struct RawDetection {
    room_type: Option<String>,
    fuzzy_room_type: Option<String>,
    time_sensitivity: Option<String>,
}

fn prompt(query: &str) -> String {
    format!(
        "Extract structured constraints from the user's hotel question.\n\
         Return a single JSON object with exactly these keys:\n\
         - \"room_type\": one of {EXACT_ROOM_TYPES:?} if an exact room type is named, else null\n\
         - \"fuzzy_room_type\": one of {FUZZY_ROOM_TYPES:?} if only a coarse room category is \
         named, else null\n\
         - \"time_sensitivity\": \"clear\" if a specific recent time window is named, \"implied\" \
         if the question implies recency without naming a window, or null otherwise\n\
         Reply with JSON only, no commentary.\n\n\
         User query: {query}"
    )
}

/// Pulls room-type and recency constraints out of a query via a structured LLM call.
pub struct IntentDetector {
    llm: Arc<dyn LlmClient>,
}

impl IntentDetector {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Best-effort (§4.2): falls back to an all-`None` [`QueryConstraints`] once
    /// every retry attempt has failed to produce a parseable, valid response.
    pub async fn detect(&self, query: &str) -> QueryConstraints {
        let prompt = prompt(query);
        let llm = &self.llm;

        let raw = with_bounded_retry("intent_detector", || async {
            let response = llm.generate(&prompt, 0.0, true).await?;
            let cleaned = strip_json_fence(&response);
            serde_json::from_str::<RawDetection>(cleaned)
                .map_err(|e| concierge_core::errors::GenerationError::CallFailed {
                    reason: format!("detector response not valid JSON: {e}"),
                })
        })
        .await;

        match raw {
            Some(raw) => coerce(raw),
            None => QueryConstraints::default(),
        }
    }
}

/// Out-of-set values are coerced to `None` rather than trusted verbatim: the
/// model is free-texting even though it was asked for a closed set.
fn coerce(raw: RawDetection) -> QueryConstraints {
    let room_type = raw
        .room_type
        .filter(|v| EXACT_ROOM_TYPES.contains(&v.as_str()));
    let fuzzy_room_type = raw
        .fuzzy_room_type
        .filter(|v| FUZZY_ROOM_TYPES.contains(&v.as_str()));
    let time_sensitivity = match raw.time_sensitivity.as_deref() {
        Some("clear") => Some(TimeSensitivity::Clear),
        Some("implied") => Some(TimeSensitivity::Implied),
        _ => None,
    };

    QueryConstraints {
        room_type,
        fuzzy_room_type,
        time_sensitivity,
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
    async fn valid_response_parses_into_constraints() {
        let detector = IntentDetector::new(Arc::new(StubLlm(
            r#"```json
            {"room_type": "大床房", "fuzzy_room_type": null, "time_sensitivity": "clear"}
            ```"#,
        )));
        let c = detector.detect("大床房最近怎么样").await;
        assert_eq!(c.room_type.as_deref(), Some("大床房"));
        assert_eq!(c.time_sensitivity, Some(TimeSensitivity::Clear));
    }

    #[tokio::test]
    async fn out_of_set_room_type_is_coerced_to_none() {
        let detector = IntentDetector::new(Arc::new(StubLlm(
            r#"{"room_type": "总统套房", "fuzzy_room_type": null, "time_sensitivity": null}"#,
        )));
        let c = detector.detect("住宿怎么样").await;
        assert!(c.room_type.is_none());
    }

    #[tokio::test]
    async fn unparseable_response_exhausts_retries_and_falls_back() {
        let detector = IntentDetector::new(Arc::new(StubLlm("not json at all")));
        let c = detector.detect("随便问问").await;
        assert!(c.room_type.is_none());
        assert!(c.fuzzy_room_type.is_none());
        assert!(c.time_sensitivity.is_none());
    }
}
