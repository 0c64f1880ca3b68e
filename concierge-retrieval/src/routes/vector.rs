//! Route 2: dense-vector recall over the comment corpus (§4.3.2).

use std::sync::Arc;

use concierge_core::models::{Route, RouteHit};
use concierge_core::traits::CommentVectorStore;

pub async fn run(
    store: Arc<dyn CommentVectorStore>,
    query_embeddings: &[Vec<f32>],
    topk: usize,
    filter: Option<&str>,
) -> Vec<RouteHit> {
    let tasks = query_embeddings.iter().cloned().enumerate().map(|(query_idx, embedding)| {
        let store = Arc::clone(&store);
        let filter = filter.map(str::to_string);
        async move {
            match store.query(&embedding, topk, filter.as_deref()).await {
                Ok(hits) => hits
                    .into_iter()
                    .enumerate()
                    .map(|(i, hit)| RouteHit::new(hit.id, Route::Vector, i + 1, query_idx))
                    .collect(),
                Err(err) => {
                    tracing::warn!(route = "vector", query_idx, error = %err, "route query failed");
                    Vec::new()
                }
            }
        }
    });

    futures::future::join_all(tasks).await.into_iter().flatten().collect()
}
