//! OpenAI-compatible chat-completion client (§6), used for recognition,
//! detection, expansion, HyDE, and generation alike — only the model name
//! and temperature differ between callers.

use async_trait::async_trait;
use concierge_core::config::ServiceEndpointConfig;
use concierge_core::errors::GenerationError;
use concierge_core::traits::LlmClient;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub struct HttpLlmClient {
    http: reqwest::Client,
    config: ServiceEndpointConfig,
}

impl HttpLlmClient {
    pub fn new(config: ServiceEndpointConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .expect("reqwest client building with a fixed timeout never fails");
        Self { http, config }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatStreamChunk {
    choices: Vec<ChatStreamChoice>,
}

#[derive(Deserialize)]
struct ChatStreamChoice {
    delta: ChatStreamDelta,
}

#[derive(Deserialize, Default)]
struct ChatStreamDelta {
    content: Option<String>,
}

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    messages: [ChatRequestMessage<'a>; 1],
    temperature: f64,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ChatRequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn generate(&self, prompt: &str, temperature: f64, json_mode: bool) -> Result<String, GenerationError> {
        let body = ChatRequestBody {
            model: &self.config.model,
            messages: [ChatRequestMessage { role: "user", content: prompt }],
            temperature,
            stream: false,
            response_format: json_mode.then(|| json!({"type": "json_object"})),
        };

        let response = self
            .http
            .post(self.chat_completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::CallFailed { reason: e.to_string() })?;

        if !response.status().is_success() {
            return Err(GenerationError::CallFailed {
                reason: format!("chat completion returned {}", response.status()),
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::CallFailed { reason: e.to_string() })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| GenerationError::CallFailed {
                reason: "chat completion returned no choices".to_string(),
            })
    }

    async fn generate_stream(
        &self,
        prompt: &str,
        temperature: f64,
    ) -> Result<BoxStream<'static, Result<String, GenerationError>>, GenerationError> {
        let body = ChatRequestBody {
            model: &self.config.model,
            messages: [ChatRequestMessage { role: "user", content: prompt }],
            temperature,
            stream: true,
            response_format: None,
        };

        let response = self
            .http
            .post(self.chat_completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::CallFailed { reason: e.to_string() })?;

        if !response.status().is_success() {
            return Err(GenerationError::CallFailed {
                reason: format!("streaming chat completion returned {}", response.status()),
            });
        }

        let byte_stream = response.bytes_stream();
        let stream = byte_stream
            .map(|chunk| chunk.map_err(|e| GenerationError::CallFailed { reason: e.to_string() }))
            .flat_map(|chunk| {
                let lines: Vec<Result<String, GenerationError>> = match chunk {
                    Ok(bytes) => parse_sse_chunk(&bytes),
                    Err(e) => vec![Err(e)],
                };
                futures::stream::iter(lines)
            })
            .filter_map(|item| async move {
                match item {
                    Ok(content) if content.is_empty() => None,
                    other => Some(other),
                }
            });

        Ok(stream.boxed())
    }
}

/// Splits one `bytes_stream()` chunk into `data: ...` lines and extracts the
/// incremental `delta.content` from each, skipping the terminal `[DONE]`
/// marker every OpenAI-compatible SSE stream ends with.
fn parse_sse_chunk(bytes: &[u8]) -> Vec<Result<String, GenerationError>> {
    let text = String::from_utf8_lossy(bytes);
    text.lines()
        .filter_map(|line| line.strip_prefix("data: ").or_else(|| line.strip_prefix("data:")))
        .filter(|data| *data != "[DONE]")
        .filter(|data| !data.trim().is_empty())
        .map(|data| {
            serde_json::from_str::<ChatStreamChunk>(data)
                .map_err(|e| GenerationError::CallFailed { reason: format!("malformed SSE chunk: {e}") })
                .map(|parsed| {
                    parsed
                        .choices
                        .into_iter()
                        .next()
                        .and_then(|c| c.delta.content)
                        .unwrap_or_default()
                })
        })
        .collect()
}
