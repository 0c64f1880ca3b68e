//! Category-summary store (§4.3.5), modeled on Chroma's
//! `collection.query(query_embeddings=[[...]], n_results=1)`: one batch call
//! per request, parallel `ids`/`documents`/`metadatas` lists of lists back,
//! one slot per input embedding.

use async_trait::async_trait;
use concierge_core::config::ServiceEndpointConfig;
use concierge_core::errors::RetrievalError;
use concierge_core::traits::{SummaryHit, SummaryVectorStore};
use serde::{Deserialize, Serialize};

pub struct HttpSummaryVectorStore {
    http: reqwest::Client,
    config: ServiceEndpointConfig,
}

impl HttpSummaryVectorStore {
    pub fn new(config: ServiceEndpointConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .expect("reqwest client building with a fixed timeout never fails");
        Self { http, config }
    }
}

#[derive(Serialize)]
struct SummaryQueryBody<'a> {
    query_embeddings: &'a [Vec<f32>],
    n_results: usize,
}

#[derive(Deserialize)]
struct SummaryQueryResponse {
    ids: Vec<Vec<String>>,
    documents: Vec<Vec<String>>,
    metadatas: Vec<Vec<SummaryMetadata>>,
}

#[derive(Deserialize)]
struct SummaryMetadata {
    #[serde(default)]
    category: String,
    #[serde(default)]
    keywords: String,
    #[serde(default)]
    comment_count: u64,
}

#[async_trait]
impl SummaryVectorStore for HttpSummaryVectorStore {
    async fn query(&self, embeddings: &[Vec<f32>], n_results: usize) -> Result<Vec<Option<SummaryHit>>, RetrievalError> {
        if embeddings.is_empty() {
            return Ok(Vec::new());
        }

        let body = SummaryQueryBody { query_embeddings: embeddings, n_results };

        let response = self
            .http
            .post(format!("{}/query", self.config.base_url.trim_end_matches('/')))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RetrievalError::RouteFailed { route: "summary".to_string(), reason: e.to_string() })?;

        if !response.status().is_success() {
            return Err(RetrievalError::RouteFailed {
                route: "summary".to_string(),
                reason: format!("summary store returned {}", response.status()),
            });
        }

        let parsed: SummaryQueryResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::RouteFailed { route: "summary".to_string(), reason: e.to_string() })?;

        let hits = parsed
            .ids
            .into_iter()
            .zip(parsed.documents)
            .zip(parsed.metadatas)
            .map(|((ids, documents), metadatas)| {
                let category_id = ids.into_iter().next()?;
                let summary = documents.into_iter().next().unwrap_or_default();
                let meta = metadatas.into_iter().next().unwrap_or(SummaryMetadata {
                    category: String::new(),
                    keywords: String::new(),
                    comment_count: 0,
                });
                Some(SummaryHit {
                    category_id,
                    summary,
                    category: meta.category,
                    keywords: meta.keywords,
                    comment_count: meta.comment_count,
                })
            })
            .collect();

        Ok(hits)
    }
}
