use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::RankingError;

/// Cross-encoder rerank service (§4.4). Returns a sparse map from candidate
/// index (into the `documents` slice passed in) to a relevance score in
/// `[0, 1]`; indices absent from the map default to 0 relevance.
#[async_trait]
pub trait RerankClient: Send + Sync {
    async fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<HashMap<usize, f64>, RankingError>;
}
