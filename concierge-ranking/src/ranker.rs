//! Multi-factor ranker (§4.4): blends cross-encoder relevance with quality,
//! length, review/useful counts, and recency into one final score.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use concierge_core::config::RankingConfig;
use concierge_core::errors::RankingError;
use concierge_core::models::{Candidate, FeatureScores, RankedCandidate, TimeSensitivity};
use concierge_core::traits::RerankClient;
use concierge_decay::{days_ago, decay_rate, recency_score};

use crate::timing::{elapsed_secs, RankingTiming};

pub struct MultiFactorRanker {
    pub reranker: Arc<dyn RerankClient>,
}

impl MultiFactorRanker {
    pub fn new(reranker: Arc<dyn RerankClient>) -> Self {
        Self { reranker }
    }

    /// Ranks `candidates` for `query`, returning the top `topk` by blended
    /// final score. `rerank_rank` (§4.4) is computed independently, as the
    /// candidate's rank under relevance alone — it does not have to agree
    /// with `final_rank`, and callers use it to show how much the other
    /// factors moved a result.
    pub async fn rank(
        &self,
        query: &str,
        candidates: Vec<Candidate>,
        time_sensitivity: Option<TimeSensitivity>,
        topk: usize,
        config: &RankingConfig,
        today: NaiveDate,
    ) -> Result<(Vec<RankedCandidate>, RankingTiming), RankingError> {
        let ranking_start = Instant::now();

        if candidates.is_empty() {
            return Ok((Vec::new(), RankingTiming::default()));
        }

        let rerank_start = Instant::now();
        let documents: Vec<String> = candidates.iter().map(|c| c.comment.clone()).collect();
        let relevance_map = self
            .reranker
            .rerank(query, &documents, documents.len())
            .await?;
        let rerank_secs = elapsed_secs(rerank_start);

        let scoring_start = Instant::now();
        let decay = decay_rate(
            time_sensitivity,
            config.base_decay,
            config.implied_boost,
            config.clear_boost,
        );

        struct Scored {
            candidate: Candidate,
            relevance: f64,
            quality: f64,
            log_comment_len: f64,
            log_review_count: f64,
            log_useful_count: f64,
            recency: f64,
            final_score: f64,
        }

        let scored: Vec<Scored> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, candidate)| {
                let relevance = relevance_map.get(&i).copied().unwrap_or(0.0);
                let quality = candidate.metadata.quality_score / 10.0;
                let comment_len = candidate.comment.chars().count() as f64;
                let log_comment_len = (comment_len + 1.0).ln() / config.length_norm_divisor;
                let log_review_count = ((candidate.metadata.review_count as f64) + 1.0).ln()
                    / config.review_count_norm_divisor;
                let log_useful_count = ((candidate.metadata.useful_count as f64) + 1.0).ln()
                    / config.useful_count_norm_divisor;
                let days = days_ago(candidate.metadata.publish_date, today);
                let recency = recency_score(days, decay, config.half_life_days);

                let final_score = config.w_relevance * relevance
                    + config.w_quality * quality
                    + config.w_length * log_comment_len
                    + config.w_review * log_review_count
                    + config.w_useful * log_useful_count
                    + config.w_recency * recency;

                Scored {
                    candidate,
                    relevance,
                    quality,
                    log_comment_len,
                    log_review_count,
                    log_useful_count,
                    recency,
                    final_score,
                }
            })
            .collect();

        // rerank_rank: position under relevance alone, independent of the
        // final sort below.
        let mut relevance_order: Vec<usize> = (0..scored.len()).collect();
        relevance_order.sort_by(|&a, &b| {
            scored[b]
                .relevance
                .partial_cmp(&scored[a].relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut rerank_rank = vec![0usize; scored.len()];
        for (rank, &idx) in relevance_order.iter().enumerate() {
            rerank_rank[idx] = rank + 1;
        }

        // Ties broken by rerank score descending, then comment_id ascending (§4.4).
        let mut order: Vec<usize> = (0..scored.len()).collect();
        order.sort_by(|&a, &b| {
            scored[b]
                .final_score
                .partial_cmp(&scored[a].final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    scored[b]
                        .relevance
                        .partial_cmp(&scored[a].relevance)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| scored[a].candidate.comment_id.cmp(&scored[b].candidate.comment_id))
        });

        let ranked = order
            .into_iter()
            .take(topk)
            .enumerate()
            .map(|(rank, idx)| {
                let s = &scored[idx];
                RankedCandidate {
                    candidate: s.candidate.clone(),
                    rerank_score: s.relevance,
                    rerank_rank: rerank_rank[idx],
                    final_score: s.final_score,
                    final_rank: rank + 1,
                    feature_scores: FeatureScores {
                        relevance: s.relevance,
                        quality: s.quality,
                        log_comment_len: s.log_comment_len,
                        log_review_count: s.log_review_count,
                        log_useful_count: s.log_useful_count,
                        recency: s.recency,
                    },
                }
            })
            .collect();

        let scoring_secs = elapsed_secs(scoring_start);

        Ok((
            ranked,
            RankingTiming {
                total: elapsed_secs(ranking_start),
                rerank: rerank_secs,
                scoring: scoring_secs,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use concierge_core::models::CandidateMetadata;
    use std::collections::HashMap;

    struct StubReranker(HashMap<usize, f64>);

    #[async_trait]
    impl RerankClient for StubReranker {
        async fn rerank(
            &self,
            _query: &str,
            _documents: &[String],
            _top_n: usize,
        ) -> Result<HashMap<usize, f64>, RankingError> {
            Ok(self.0.clone())
        }
    }

    fn candidate(id: &str, quality: f64, review_count: u64, useful_count: u64, days_old: i64) -> Candidate {
        Candidate {
            comment_id: id.to_string(),
            comment: "早餐很好，种类齐全，服务热情。".to_string(),
            rrf_score: 0.01,
            rrf_rank: 1,
            route_ranks: Default::default(),
            metadata: CandidateMetadata {
                score: 4.5,
                publish_date: NaiveDate::from_ymd_opt(2026, 7, 30).unwrap() - chrono::Duration::days(days_old),
                quality_score: quality,
                review_count,
                useful_count,
                room_type: None,
                fuzzy_room_type: None,
            },
        }
    }

    #[tokio::test]
    async fn higher_relevance_and_fresher_candidate_ranks_first() {
        let mut relevance = HashMap::new();
        relevance.insert(0, 0.9);
        relevance.insert(1, 0.2);
        let ranker = MultiFactorRanker::new(Arc::new(StubReranker(relevance)));

        let candidates = vec![
            candidate("fresh", 9.0, 20, 10, 1),
            candidate("stale", 9.0, 20, 10, 400),
        ];

        let today = NaiveDate::from_ymd_opt(2026, 7, 30).unwrap();
        let (ranked, _timing) = ranker
            .rank("早餐怎么样", candidates, None, 10, &RankingConfig::default(), today)
            .await
            .unwrap();

        assert_eq!(ranked[0].candidate.comment_id, "fresh");
        assert_eq!(ranked[0].final_rank, 1);
    }

    #[tokio::test]
    async fn rerank_rank_is_independent_of_final_rank() {
        let mut relevance = HashMap::new();
        relevance.insert(0, 0.1);
        relevance.insert(1, 0.9);
        let ranker = MultiFactorRanker::new(Arc::new(StubReranker(relevance)));

        let candidates = vec![
            candidate("low_relevance_high_quality", 10.0, 1000, 1000, 0),
            candidate("high_relevance_low_quality", 0.1, 0, 0, 0),
        ];

        let today = NaiveDate::from_ymd_opt(2026, 7, 30).unwrap();
        let (ranked, _timing) = ranker
            .rank("早餐怎么样", candidates, None, 10, &RankingConfig::default(), today)
            .await
            .unwrap();

        let by_relevance_rank_one = ranked
            .iter()
            .find(|c| c.rerank_rank == 1)
            .expect("one candidate must hold rerank_rank 1");
        assert_eq!(by_relevance_rank_one.candidate.comment_id, "high_relevance_low_quality");
    }

    #[tokio::test]
    async fn empty_candidates_return_empty_ranking() {
        let ranker = MultiFactorRanker::new(Arc::new(StubReranker(HashMap::new())));
        let today = NaiveDate::from_ymd_opt(2026, 7, 30).unwrap();
        let (ranked, timing) = ranker
            .rank("早餐怎么样", Vec::new(), None, 10, &RankingConfig::default(), today)
            .await
            .unwrap();
        assert!(ranked.is_empty());
        assert_eq!(timing.total, 0.0);
    }
}
