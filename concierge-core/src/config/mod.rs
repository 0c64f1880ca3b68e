mod defaults;
mod index_config;
mod ranking_config;
mod retrieval_config;
mod services_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use index_config::IndexConfig;
pub use ranking_config::RankingConfig;
pub use retrieval_config::RetrievalConfig;
pub use services_config::{ServiceEndpointConfig, ServicesConfig};

/// Root configuration for the RAG pipeline, loaded once at startup and held
/// as a read-only singleton (§5 shared resources).
///
/// Load order, lowest to highest precedence: compiled-in defaults, an
/// optional TOML file, then environment variables (`CONCIERGE_*`). Per-request
/// HTTP `options` (§6) override individual `RetrievalConfig`/`RankingConfig`
/// fields for that request only and never mutate this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub retrieval: RetrievalConfig,
    pub ranking: RankingConfig,
    pub index: IndexConfig,
    pub services: ServicesConfig,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            retrieval: RetrievalConfig::default(),
            ranking: RankingConfig::default(),
            index: IndexConfig::default(),
            services: ServicesConfig::default(),
        }
    }
}

/// Errors encountered while assembling [`RagConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    FileUnreadable { path: String, reason: String },

    #[error("failed to parse config file {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("required credential missing: {0}")]
    MissingCredential(&'static str),
}

impl RagConfig {
    /// Load defaults, then overlay a TOML file if `path` exists, then overlay
    /// a handful of environment variables used for secrets that shouldn't
    /// live in a checked-in file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = path {
            if path.exists() {
                let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileUnreadable {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
                config = toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            }
        }

        config.overlay_env();
        Ok(config)
    }

    /// Overlay well-known environment variables on top of file/compiled defaults.
    fn overlay_env(&mut self) {
        if let Ok(key) = std::env::var("CONCIERGE_LLM_API_KEY") {
            self.services.llm.api_key = key;
        }
        if let Ok(key) = std::env::var("CONCIERGE_EMBEDDING_API_KEY") {
            self.services.embedding.api_key = key;
        }
        if let Ok(url) = std::env::var("CONCIERGE_COMMENT_STORE_URL") {
            self.services.comment_vector_store.base_url = url;
        }
        if let Ok(url) = std::env::var("CONCIERGE_REVERSE_STORE_URL") {
            self.services.reverse_query_vector_store.base_url = url;
        }
    }

    /// Fail loudly before the HTTP listener binds if a required credential is absent.
    pub fn require_services_configured(&self) -> Result<(), ConfigError> {
        if self.services.llm.api_key.is_empty() {
            return Err(ConfigError::MissingCredential("CONCIERGE_LLM_API_KEY"));
        }
        if self.services.embedding.api_key.is_empty() {
            return Err(ConfigError::MissingCredential("CONCIERGE_EMBEDDING_API_KEY"));
        }
        if self.services.comment_vector_store.base_url.is_empty() {
            return Err(ConfigError::MissingCredential("CONCIERGE_COMMENT_STORE_URL"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_constants() {
        let config = RagConfig::default();
        assert_eq!(config.retrieval.route_topk, 150);
        assert_eq!(config.retrieval.retrieval_topk, 100);
        assert_eq!(config.retrieval.ranking_topk, 10);
        assert_eq!(config.ranking.w_relevance, 0.40);
        assert_eq!(config.ranking.half_life_days, 180);
        assert_eq!(config.index.k1, 1.5);
        assert_eq!(config.index.b, 0.75);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = RagConfig::load(Some(Path::new("/nonexistent/path.toml"))).unwrap();
        assert_eq!(config.retrieval.route_topk, 150);
    }

    #[test]
    fn unconfigured_services_fail_the_require_check() {
        let config = RagConfig::default();
        assert!(config.require_services_configured().is_err());
    }
}
