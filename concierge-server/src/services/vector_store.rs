//! Dense comment and reverse-query vector stores (§4.3.2, §4.3.3), modeled
//! on DashVector's `collection.query(vector, topk, filter)` call.

use async_trait::async_trait;
use concierge_core::config::ServiceEndpointConfig;
use concierge_core::errors::RetrievalError;
use concierge_core::traits::{CommentVectorStore, ReverseQueryVectorStore, VectorHit};
use serde::{Deserialize, Serialize};

pub struct HttpCommentVectorStore {
    http: reqwest::Client,
    config: ServiceEndpointConfig,
}

impl HttpCommentVectorStore {
    pub fn new(config: ServiceEndpointConfig) -> Self {
        Self { http: client(&config), config }
    }
}

pub struct HttpReverseQueryVectorStore {
    http: reqwest::Client,
    config: ServiceEndpointConfig,
}

impl HttpReverseQueryVectorStore {
    pub fn new(config: ServiceEndpointConfig) -> Self {
        Self { http: client(&config), config }
    }
}

fn client(config: &ServiceEndpointConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(config.timeout_ms))
        .build()
        .expect("reqwest client building with a fixed timeout never fails")
}

#[derive(Serialize)]
struct VectorQueryBody<'a> {
    vector: &'a [f32],
    topk: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
}

#[derive(Deserialize)]
struct VectorQueryResponse {
    output: Vec<VectorQueryHit>,
}

#[derive(Deserialize)]
struct VectorQueryHit {
    id: String,
}

async fn query(http: &reqwest::Client, config: &ServiceEndpointConfig, vector: &[f32], topk: usize, filter: Option<&str>) -> Result<Vec<VectorHit>, RetrievalError> {
    let body = VectorQueryBody { vector, topk, filter };

    let response = http
        .post(format!("{}/query", config.base_url.trim_end_matches('/')))
        .bearer_auth(&config.api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| RetrievalError::RouteFailed { route: "vector".to_string(), reason: e.to_string() })?;

    if !response.status().is_success() {
        return Err(RetrievalError::RouteFailed {
            route: "vector".to_string(),
            reason: format!("vector store returned {}", response.status()),
        });
    }

    let parsed: VectorQueryResponse = response
        .json()
        .await
        .map_err(|e| RetrievalError::RouteFailed { route: "vector".to_string(), reason: e.to_string() })?;

    Ok(parsed.output.into_iter().map(|h| VectorHit { id: h.id }).collect())
}

#[async_trait]
impl CommentVectorStore for HttpCommentVectorStore {
    async fn query(&self, vector: &[f32], topk: usize, filter: Option<&str>) -> Result<Vec<VectorHit>, RetrievalError> {
        query(&self.http, &self.config, vector, topk, filter).await
    }
}

#[async_trait]
impl ReverseQueryVectorStore for HttpReverseQueryVectorStore {
    async fn query(&self, vector: &[f32], topk: usize, filter: Option<&str>) -> Result<Vec<VectorHit>, RetrievalError> {
        query(&self.http, &self.config, vector, topk, filter).await
    }
}
