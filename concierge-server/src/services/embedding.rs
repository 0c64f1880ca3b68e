//! OpenAI-compatible batch embedding client (§6).

use async_trait::async_trait;
use concierge_core::config::ServiceEndpointConfig;
use concierge_core::errors::RetrievalError;
use concierge_core::traits::EmbeddingClient;
use serde::{Deserialize, Serialize};

pub struct HttpEmbeddingClient {
    http: reqwest::Client,
    config: ServiceEndpointConfig,
    dimension: usize,
}

impl HttpEmbeddingClient {
    pub fn new(config: ServiceEndpointConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .expect("reqwest client building with a fixed timeout never fails");
        Self {
            http,
            config,
            dimension: concierge_core::constants::EMBEDDING_DIM,
        }
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingClient for HttpEmbeddingClient {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = EmbeddingRequest {
            model: &self.config.model,
            input: texts,
            dimensions: self.dimension,
        };

        let response = self
            .http
            .post(format!("{}/embeddings", self.config.base_url.trim_end_matches('/')))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RetrievalError::EmbeddingFailed { reason: e.to_string() })?;

        if !response.status().is_success() {
            return Err(RetrievalError::EmbeddingFailed {
                reason: format!("embedding call returned {}", response.status()),
            });
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::EmbeddingFailed { reason: e.to_string() })?;

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}
