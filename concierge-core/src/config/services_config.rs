use serde::{Deserialize, Serialize};

use super::defaults;

/// Connection settings for one HTTP-backed external service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceEndpointConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_ms: u64,
}

impl Default for ServiceEndpointConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            model: String::new(),
            timeout_ms: defaults::request_timeout_ms(),
        }
    }
}

/// Every external service the pipeline talks to (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub llm: ServiceEndpointConfig,
    pub embedding: ServiceEndpointConfig,
    pub rerank: ServiceEndpointConfig,
    pub comment_vector_store: ServiceEndpointConfig,
    pub reverse_query_vector_store: ServiceEndpointConfig,
    pub summary_vector_store: ServiceEndpointConfig,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            llm: ServiceEndpointConfig::default(),
            embedding: ServiceEndpointConfig::default(),
            rerank: ServiceEndpointConfig::default(),
            comment_vector_store: ServiceEndpointConfig::default(),
            reverse_query_vector_store: ServiceEndpointConfig::default(),
            summary_vector_store: ServiceEndpointConfig::default(),
        }
    }
}

impl ServicesConfig {
    /// Whether every credential a production deployment needs is present.
    /// The transport shell refuses to bind the HTTP listener when this is
    /// false, rather than surfacing the gap as a 503 on first request.
    pub fn is_fully_configured(&self) -> bool {
        !self.llm.api_key.is_empty()
            && !self.embedding.api_key.is_empty()
            && !self.comment_vector_store.base_url.is_empty()
    }
}
