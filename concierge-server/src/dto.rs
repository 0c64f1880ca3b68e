//! Request/response shapes for the HTTP surface (§6), including the
//! per-request `options` overlay and the frontend-facing comment view that
//! trims a [`RankedCandidate`] down to what a comment card needs.

use concierge_core::config::{RankingConfig, RetrievalConfig};
use concierge_core::models::{Candidate, CategorySummary, PreviousTurn, RankedCandidate, Review};
use concierge_retrieval::ReviewTable;
use serde::{Deserialize, Serialize};

/// `POST /api/v1/chat` request body (§6).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub options: ChatOptions,
}

/// Every recognized `options` key (§6), all optional so an absent key falls
/// back to the compiled-in default. Applying these never mutates the
/// singleton [`RetrievalConfig`]/[`RankingConfig`] — each request builds its
/// own overlaid copy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatOptions {
    pub route_topk: Option<usize>,
    pub retrieval_topk: Option<usize>,
    pub ranking_topk: Option<usize>,
    pub enable_expansion: Option<bool>,
    pub enable_bm25: Option<bool>,
    pub enable_vector: Option<bool>,
    pub enable_reverse: Option<bool>,
    pub enable_hyde: Option<bool>,
    pub enable_summary: Option<bool>,
    pub enable_ranking: Option<bool>,
    pub enable_generation: Option<bool>,
    pub w_relevance: Option<f64>,
    pub w_quality: Option<f64>,
    pub w_length: Option<f64>,
    pub w_review: Option<f64>,
    pub w_useful: Option<f64>,
    pub w_recency: Option<f64>,
    pub base_decay: Option<f64>,
    pub implied_boost: Option<f64>,
    pub clear_boost: Option<f64>,
    pub half_life_days: Option<i64>,
    /// The previous user/assistant turn, carried per-request by the caller;
    /// the server never persists conversation state (§9).
    pub history: Option<PreviousTurn>,
}

impl ChatOptions {
    pub fn enable_generation(&self) -> bool {
        self.enable_generation.unwrap_or(true)
    }

    pub fn enable_ranking(&self) -> bool {
        self.enable_ranking.unwrap_or(true)
    }

    pub fn enable_expansion(&self) -> bool {
        self.enable_expansion.unwrap_or(true)
    }

    /// Overlays the recognized retrieval-related keys onto `base`. `base`
    /// should already be [`RetrievalConfig::for_streaming`] or
    /// [`RetrievalConfig::default`] depending on which entry point is calling.
    pub fn overlay_retrieval(&self, base: RetrievalConfig) -> RetrievalConfig {
        RetrievalConfig {
            route_topk: self.route_topk.unwrap_or(base.route_topk),
            retrieval_topk: self.retrieval_topk.unwrap_or(base.retrieval_topk),
            ranking_topk: self.ranking_topk.unwrap_or(base.ranking_topk),
            enable_expansion: self.enable_expansion.unwrap_or(base.enable_expansion),
            enable_bm25: self.enable_bm25.unwrap_or(base.enable_bm25),
            enable_vector: self.enable_vector.unwrap_or(base.enable_vector),
            enable_reverse: self.enable_reverse.unwrap_or(base.enable_reverse),
            enable_hyde: self.enable_hyde.unwrap_or(base.enable_hyde),
            enable_summary: self.enable_summary.unwrap_or(base.enable_summary),
            enable_ranking: self.enable_ranking.unwrap_or(base.enable_ranking),
        }
    }

    pub fn overlay_ranking(&self, base: RankingConfig) -> RankingConfig {
        RankingConfig {
            w_relevance: self.w_relevance.unwrap_or(base.w_relevance),
            w_quality: self.w_quality.unwrap_or(base.w_quality),
            w_length: self.w_length.unwrap_or(base.w_length),
            w_review: self.w_review.unwrap_or(base.w_review),
            w_useful: self.w_useful.unwrap_or(base.w_useful),
            w_recency: self.w_recency.unwrap_or(base.w_recency),
            base_decay: self.base_decay.unwrap_or(base.base_decay),
            implied_boost: self.implied_boost.unwrap_or(base.implied_boost),
            clear_boost: self.clear_boost.unwrap_or(base.clear_boost),
            half_life_days: self.half_life_days.unwrap_or(base.half_life_days),
            ..base
        }
    }
}

/// The comment shape handed to callers, trimmed from [`RankedCandidate`] plus
/// a few presentation-only [`Review`] fields a card needs (star rating,
/// travel type, category breadcrumbs, images) that never feed retrieval or
/// ranking.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceComment {
    #[serde(rename = "_id")]
    pub id: String,
    pub comment: String,
    pub score: f64,
    pub star: i64,
    pub useful_count: u64,
    pub publish_date: String,
    pub room_type: Option<String>,
    pub fuzzy_room_type: Option<String>,
    pub travel_type: String,
    pub review_count: u64,
    pub quality_score: f64,
    pub category1: Option<String>,
    pub category2: Option<String>,
    pub category3: Option<String>,
    pub images: Vec<String>,
    pub relevance_score: Option<f64>,
    pub rank: Option<usize>,
}

impl ReferenceComment {
    /// Builds the view from a fused [`Candidate`] plus the review row it was
    /// looked up from; `rank`/`relevance_score` are only present once ranking
    /// has run.
    pub fn from_candidate(candidate: &Candidate, review: Option<&Review>, rank: Option<usize>, relevance_score: Option<f64>) -> Self {
        Self {
            id: candidate.comment_id.clone(),
            comment: candidate.comment.clone(),
            score: candidate.metadata.score,
            star: review.map(Review::display_star).unwrap_or(candidate.metadata.score as i64),
            useful_count: candidate.metadata.useful_count,
            publish_date: candidate.metadata.publish_date.to_string(),
            room_type: candidate.metadata.room_type.clone(),
            fuzzy_room_type: candidate.metadata.fuzzy_room_type.clone(),
            travel_type: review.map(|r| r.travel_type.clone()).unwrap_or_default(),
            review_count: candidate.metadata.review_count,
            quality_score: candidate.metadata.quality_score,
            category1: review.and_then(|r| r.category1.clone()),
            category2: review.and_then(|r| r.category2.clone()),
            category3: review.and_then(|r| r.category3.clone()),
            images: review.map(|r| r.images.clone()).unwrap_or_default(),
            relevance_score,
            rank,
        }
    }

    pub fn from_ranked(ranked: &RankedCandidate, review: Option<&Review>) -> Self {
        Self::from_candidate(
            &ranked.candidate,
            review,
            Some(ranked.final_rank),
            Some(ranked.final_score),
        )
    }
}

/// The summary shape handed to callers — category label plus the generated text.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceSummary {
    pub category: String,
    pub content: String,
}

impl From<&CategorySummary> for ReferenceSummary {
    fn from(s: &CategorySummary) -> Self {
        Self {
            category: s.category.clone(),
            content: s.summary.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct References {
    pub comments: Vec<ReferenceComment>,
    pub summaries: Vec<ReferenceSummary>,
}

/// Either branch the retriever/ranker can leave the orchestrator in: a fully
/// ranked list (`enable_ranking = true`, the default) or the bare fused
/// candidates when ranking was skipped (§4.6).
pub enum QueryComments {
    Ranked(Vec<RankedCandidate>),
    Unranked(Vec<Candidate>),
}

impl QueryComments {
    pub fn len(&self) -> usize {
        match self {
            QueryComments::Ranked(v) => v.len(),
            QueryComments::Unranked(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_references(&self, reviews: &ReviewTable) -> Vec<ReferenceComment> {
        match self {
            QueryComments::Ranked(ranked) => ranked
                .iter()
                .map(|c| ReferenceComment::from_ranked(c, reviews.get(&c.candidate.comment_id)))
                .collect(),
            QueryComments::Unranked(candidates) => candidates
                .iter()
                .map(|c| ReferenceComment::from_candidate(c, reviews.get(&c.comment_id), None, None))
                .collect(),
        }
    }
}

/// `GET /api/v1/health` response (§6).
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub rag_ready: bool,
}
