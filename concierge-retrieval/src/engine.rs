//! Hybrid retrieval orchestrator (§4.3): fans the sub-queries out across up
//! to five routes concurrently, then fuses every comment-route hit with
//! weighted RRF.

use std::sync::Arc;
use std::time::Instant;

use concierge_core::config::RetrievalConfig;
use concierge_core::errors::RetrievalError;
use concierge_core::models::{Candidate, CandidateMetadata, CategorySummary, RouteRankEntry, SubQuery};
use concierge_core::traits::{CommentVectorStore, EmbeddingClient, ReverseQueryVectorStore, SummaryVectorStore};
use concierge_index::InvertedIndex;
use concierge_query::HyDEGenerator;

use crate::review_table::ReviewTable;
use crate::routes::{bm25, hyde, reverse, summary, vector};
use crate::rrf;
use crate::timing::{elapsed_secs, RetrievalTiming};

/// Every collaborator the hybrid retriever needs, grouped for convenient
/// construction; each is held behind an `Arc` so the retriever can be shared
/// across concurrent requests.
pub struct HybridRetriever {
    pub index: Arc<InvertedIndex>,
    pub comment_store: Arc<dyn CommentVectorStore>,
    pub reverse_store: Arc<dyn ReverseQueryVectorStore>,
    pub summary_store: Arc<dyn SummaryVectorStore>,
    pub embedder: Arc<dyn EmbeddingClient>,
    pub hyde_generator: Arc<HyDEGenerator>,
    pub reviews: Arc<ReviewTable>,
}

pub struct RetrievalOutcome {
    pub comments: Vec<Candidate>,
    pub summaries: Vec<CategorySummary>,
    pub timing: RetrievalTiming,
    pub hyde_generated: std::collections::HashMap<usize, Vec<String>>,
}

impl HybridRetriever {
    pub async fn retrieve(
        &self,
        sub_queries: &[SubQuery],
        room_filter: Option<String>,
        config: &RetrievalConfig,
    ) -> Result<RetrievalOutcome, RetrievalError> {
        if config.enabled_route_count() == 0 {
            return Err(RetrievalError::NoRoutesEnabled);
        }

        let retrieve_start = Instant::now();
        let queries: Vec<String> = sub_queries.iter().map(|q| q.text.clone()).collect();
        let weights: Vec<f64> = sub_queries.iter().map(|q| q.weight).collect();

        let needs_embeddings = config.enable_vector || config.enable_reverse || config.enable_summary;
        let (query_embeddings, embedding_secs) = if needs_embeddings {
            let start = Instant::now();
            let embeddings = self
                .embedder
                .embed_batch(&queries)
                .await
                .map_err(|e| RetrievalError::EmbeddingFailed { reason: e.to_string() })?;
            (embeddings, elapsed_secs(start))
        } else {
            (Vec::new(), 0.0)
        };

        let mut timing = crate::timing::RouteTimings::default();
        let mut all_hits = Vec::new();
        let mut hyde_generated = std::collections::HashMap::new();

        let bm25_fut = async {
            if !config.enable_bm25 {
                return None;
            }
            let start = Instant::now();
            let hits = bm25::run(Arc::clone(&self.index), &queries, config.route_topk).await;
            Some((hits, elapsed_secs(start)))
        };

        let vector_fut = async {
            if !config.enable_vector {
                return None;
            }
            let start = Instant::now();
            let hits = vector::run(
                Arc::clone(&self.comment_store),
                &query_embeddings,
                config.route_topk,
                room_filter.as_deref(),
            )
            .await;
            Some((hits, elapsed_secs(start)))
        };

        let reverse_fut = async {
            if !config.enable_reverse {
                return None;
            }
            let start = Instant::now();
            let hits = reverse::run(
                Arc::clone(&self.reverse_store),
                &query_embeddings,
                config.route_topk,
                room_filter.as_deref(),
            )
            .await;
            Some((hits, elapsed_secs(start)))
        };

        let hyde_fut = async {
            if !config.enable_hyde {
                return None;
            }
            Some(
                hyde::run(
                    Arc::clone(&self.hyde_generator),
                    Arc::clone(&self.embedder),
                    Arc::clone(&self.comment_store),
                    &queries,
                    config.route_topk,
                    room_filter.as_deref(),
                )
                .await,
            )
        };

        let summary_fut = async {
            if !config.enable_summary {
                return None;
            }
            let start = Instant::now();
            let summaries = summary::run(Arc::clone(&self.summary_store), &query_embeddings).await;
            Some((summaries, elapsed_secs(start)))
        };

        let (bm25_res, vector_res, reverse_res, hyde_res, summary_res) =
            tokio::join!(bm25_fut, vector_fut, reverse_fut, hyde_fut, summary_fut);

        if let Some((mut hits, secs)) = bm25_res {
            timing.bm25 = secs;
            all_hits.append(&mut hits);
        }
        if let Some((mut hits, secs)) = vector_res {
            timing.vector = secs + embedding_secs;
            all_hits.append(&mut hits);
        }
        if let Some((mut hits, secs)) = reverse_res {
            timing.reverse = secs + embedding_secs;
            all_hits.append(&mut hits);
        }
        if let Some(outcome) = hyde_res {
            timing.hyde = outcome.timing;
            all_hits.extend(outcome.hits);
            hyde_generated = outcome.generated;
        }
        let summaries = if let Some((summaries, secs)) = summary_res {
            timing.summary = secs + embedding_secs;
            summaries
        } else {
            Vec::new()
        };

        let rrf_start = Instant::now();
        let scores = rrf::fuse(&all_hits, &weights);
        let ranked = rrf::rank(&scores);
        timing.rrf_fusion = elapsed_secs(rrf_start);

        let mut route_ranks_by_id: std::collections::HashMap<String, concierge_core::models::RouteRanks> =
            std::collections::HashMap::new();
        for hit in &all_hits {
            route_ranks_by_id
                .entry(hit.comment_id.clone())
                .or_default()
                .entry(hit.route.as_str().to_string())
                .or_default()
                .push(RouteRankEntry {
                    rank: hit.rank,
                    query_idx: hit.query_idx,
                    hyde_idx: hit.hyde_idx,
                });
        }

        let mut comments = Vec::with_capacity(config.retrieval_topk.min(ranked.len()));
        for (comment_id, rrf_score, rrf_rank) in ranked.into_iter().take(config.retrieval_topk) {
            let Some(review) = self.reviews.get(&comment_id) else {
                tracing::warn!(comment_id, "RRF-fused comment_id missing from review table");
                continue;
            };
            comments.push(Candidate {
                comment_id: comment_id.clone(),
                comment: review.text.clone(),
                rrf_score,
                rrf_rank,
                route_ranks: route_ranks_by_id.remove(&comment_id).unwrap_or_default(),
                metadata: CandidateMetadata {
                    score: review.score,
                    publish_date: review.publish_date,
                    quality_score: review.quality_score,
                    review_count: review.review_count,
                    useful_count: review.useful_count,
                    room_type: review.room_type.clone(),
                    fuzzy_room_type: review.fuzzy_room_type.clone(),
                },
            });
        }

        Ok(RetrievalOutcome {
            comments,
            summaries,
            timing: RetrievalTiming {
                routes: timing,
                total: elapsed_secs(retrieve_start),
            },
            hyde_generated,
        })
    }
}
