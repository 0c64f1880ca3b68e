//! Route 4: HyDE-augmented recall (§4.3.4).
//!
//! Each sub-query generates 3 hypothetical review passages, embeds them, and
//! queries the comment store once per passage; hits are deduplicated within
//! the sub-query (keep the best rank per `comment_id`) before being handed to
//! fusion — a comment hit by two hypotheses of the same sub-query should not
//! get credit twice.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use concierge_core::models::{Route, RouteHit};
use concierge_core::traits::{CommentVectorStore, EmbeddingClient};
use concierge_query::HyDEGenerator;

use crate::timing::{elapsed_secs, HydeTiming};

pub struct HydeOutcome {
    pub hits: Vec<RouteHit>,
    pub timing: HydeTiming,
    /// The hypothetical passages actually generated, keyed by sub-query index.
    pub generated: HashMap<usize, Vec<String>>,
}

pub async fn run(
    generator: Arc<HyDEGenerator>,
    embedder: Arc<dyn EmbeddingClient>,
    store: Arc<dyn CommentVectorStore>,
    queries: &[String],
    topk: usize,
    filter: Option<&str>,
) -> HydeOutcome {
    let route_start = Instant::now();

    let tasks = queries.iter().cloned().enumerate().map(|(query_idx, query)| {
        let generator = Arc::clone(&generator);
        let embedder = Arc::clone(&embedder);
        let store = Arc::clone(&store);
        let filter = filter.map(str::to_string);
        async move {
            let gen_start = Instant::now();
            let hypotheses = generator.generate(&query).await;
            let generation_secs = elapsed_secs(gen_start);

            let ret_start = Instant::now();
            let embeddings = match embedder.embed_batch(&hypotheses).await {
                Ok(embeddings) => embeddings,
                Err(err) => {
                    tracing::warn!(route = "hyde", query_idx, error = %err, "embedding failed");
                    return (Vec::new(), generation_secs, elapsed_secs(ret_start), query_idx, hypotheses);
                }
            };

            let per_hypothesis = embeddings.iter().enumerate().map(|(hyde_idx, embedding)| {
                let store = Arc::clone(&store);
                let filter = filter.clone();
                async move {
                    match store.query(embedding, topk, filter.as_deref()).await {
                        Ok(hits) => hits
                            .into_iter()
                            .enumerate()
                            .map(|(i, hit)| {
                                RouteHit::new(hit.id, Route::Hyde, i + 1, query_idx).with_hyde_idx(hyde_idx)
                            })
                            .collect::<Vec<_>>(),
                        Err(err) => {
                            tracing::warn!(route = "hyde", query_idx, hyde_idx, error = %err, "route query failed");
                            Vec::new()
                        }
                    }
                }
            });
            let raw_hits: Vec<RouteHit> = futures::future::join_all(per_hypothesis)
                .await
                .into_iter()
                .flatten()
                .collect();

            let deduped = dedup_best_rank(raw_hits);
            let retrieval_secs = elapsed_secs(ret_start);
            (deduped, generation_secs, retrieval_secs, query_idx, hypotheses)
        }
    });

    let results = futures::future::join_all(tasks).await;

    let mut hits = Vec::new();
    let mut generation_times = Vec::new();
    let mut retrieval_times = Vec::new();
    let mut generated = HashMap::new();
    for (mut sub_hits, gen_secs, ret_secs, query_idx, hypotheses) in results {
        hits.append(&mut sub_hits);
        generation_times.push(gen_secs);
        retrieval_times.push(ret_secs);
        generated.insert(query_idx, hypotheses);
    }

    let timing = HydeTiming {
        total: elapsed_secs(route_start),
        generation: generation_times.into_iter().fold(0.0, f64::max),
        retrieval: retrieval_times.into_iter().fold(0.0, f64::max),
    };

    HydeOutcome { hits, timing, generated }
}

/// Keeps the lowest (best) rank per `comment_id` within one sub-query's hits.
fn dedup_best_rank(hits: Vec<RouteHit>) -> Vec<RouteHit> {
    let mut best: HashMap<String, RouteHit> = HashMap::new();
    for hit in hits {
        best.entry(hit.comment_id.clone())
            .and_modify(|existing| {
                if hit.rank < existing.rank {
                    *existing = hit.clone();
                }
            })
            .or_insert(hit);
    }
    best.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_lowest_rank_per_comment() {
        let hits = vec![
            RouteHit::new("c1", Route::Hyde, 5, 0).with_hyde_idx(0),
            RouteHit::new("c1", Route::Hyde, 2, 0).with_hyde_idx(1),
            RouteHit::new("c2", Route::Hyde, 1, 0).with_hyde_idx(0),
        ];
        let deduped = dedup_best_rank(hits);
        let c1 = deduped.iter().find(|h| h.comment_id == "c1").unwrap();
        assert_eq!(c1.rank, 2);
        assert_eq!(deduped.len(), 2);
    }
}
