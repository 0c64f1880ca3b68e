//! Route 3: reverse-query recall over synthetic pre-generated queries (§4.3.3).

use std::sync::Arc;

use concierge_core::models::{Route, RouteHit};
use concierge_core::traits::ReverseQueryVectorStore;

pub async fn run(
    store: Arc<dyn ReverseQueryVectorStore>,
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
                    .map(|(i, hit)| RouteHit::new(hit.id, Route::Reverse, i + 1, query_idx))
                    .collect(),
                Err(err) => {
                    tracing::warn!(route = "reverse", query_idx, error = %err, "route query failed");
                    Vec::new()
                }
            }
        }
    });

    futures::future::join_all(tasks).await.into_iter().flatten().collect()
}
