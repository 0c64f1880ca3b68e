//! Route 1: BM25 text recall over the inverted index (§4.3.1).

use std::sync::Arc;

use concierge_core::models::{Route, RouteHit};
use concierge_index::InvertedIndex;

/// One BM25 search per sub-query, fanned out onto blocking threads since the
/// index search is CPU-bound rayon work, not I/O.
pub async fn run(index: Arc<InvertedIndex>, queries: &[String], topk: usize) -> Vec<RouteHit> {
    let tasks = queries.iter().cloned().enumerate().map(|(query_idx, query)| {
        let index = Arc::clone(&index);
        tokio::task::spawn_blocking(move || {
            index
                .search(&query, topk)
                .into_iter()
                .enumerate()
                .map(|(i, (doc_id, _score))| RouteHit::new(doc_id, Route::Bm25, i + 1, query_idx))
                .collect::<Vec<_>>()
        })
    });

    let mut hits = Vec::new();
    for task in tasks {
        if let Ok(mut route_hits) = task.await {
            hits.append(&mut route_hits);
        }
    }
    hits
}
