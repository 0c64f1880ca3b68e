//! Cross-encoder rerank client (§4.4, §6), modeled on DashScope's `gte-rerank`
//! endpoint: a query plus a flat document list in, a sparse
//! index→relevance map out.

use std::collections::HashMap;

use async_trait::async_trait;
use concierge_core::config::ServiceEndpointConfig;
use concierge_core::errors::RankingError;
use concierge_core::traits::RerankClient;
use serde::{Deserialize, Serialize};

pub struct HttpRerankClient {
    http: reqwest::Client,
    config: ServiceEndpointConfig,
}

impl HttpRerankClient {
    pub fn new(config: ServiceEndpointConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .expect("reqwest client building with a fixed timeout never fails");
        Self { http, config }
    }
}

#[derive(Serialize)]
struct RerankRequestBody<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
    top_n: usize,
}

#[derive(Deserialize)]
struct RerankResponseBody {
    results: Vec<RerankResult>,
}

#[derive(Deserialize)]
struct RerankResult {
    index: usize,
    relevance_score: f64,
}

#[async_trait]
impl RerankClient for HttpRerankClient {
    async fn rerank(&self, query: &str, documents: &[String], top_n: usize) -> Result<HashMap<usize, f64>, RankingError> {
        if documents.is_empty() {
            return Ok(HashMap::new());
        }

        let body = RerankRequestBody {
            model: &self.config.model,
            query,
            documents,
            top_n,
        };

        let response = self
            .http
            .post(format!("{}/rerank", self.config.base_url.trim_end_matches('/')))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RankingError::RerankFailed { reason: e.to_string() })?;

        if !response.status().is_success() {
            return Err(RankingError::RerankFailed {
                reason: format!("rerank call returned {}", response.status()),
            });
        }

        let parsed: RerankResponseBody = response
            .json()
            .await
            .map_err(|e| RankingError::RerankFailed { reason: e.to_string() })?;

        Ok(parsed.results.into_iter().map(|r| (r.index, r.relevance_score)).collect())
    }
}
