use async_trait::async_trait;

use crate::errors::RetrievalError;

/// A single hit from the comment or reverse-query vector store.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorHit {
    /// For the comment store this is the comment_id directly; for the
    /// reverse-query store this is the `comment_id` field stashed on the
    /// synthetic-query document (§4.3.3).
    pub id: String,
}

/// The comment corpus's dense index, queried by the vector and HyDE routes.
#[async_trait]
pub trait CommentVectorStore: Send + Sync {
    async fn query(
        &self,
        vector: &[f32],
        topk: usize,
        filter: Option<&str>,
    ) -> Result<Vec<VectorHit>, RetrievalError>;
}

/// The reverse-query index: synthetic queries pre-generated per comment.
#[async_trait]
pub trait ReverseQueryVectorStore: Send + Sync {
    async fn query(
        &self,
        vector: &[f32],
        topk: usize,
        filter: Option<&str>,
    ) -> Result<Vec<VectorHit>, RetrievalError>;
}

/// A category-summary hit returned by the summary store, before grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryHit {
    pub category_id: String,
    pub summary: String,
    pub category: String,
    pub keywords: String,
    pub comment_count: u64,
}

/// The category-summary store (§3, §4.3.5). Queried with one embedding per
/// sub-query, `n_results = 1`.
#[async_trait]
pub trait SummaryVectorStore: Send + Sync {
    async fn query(&self, embeddings: &[Vec<f32>], n_results: usize) -> Result<Vec<Option<SummaryHit>>, RetrievalError>;
}
