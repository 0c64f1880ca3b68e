use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use concierge_core::config::RetrievalConfig;
use concierge_core::errors::{GenerationError, RetrievalError};
use concierge_core::models::{Review, SubQuery};
use concierge_core::traits::{
    CommentVectorStore, EmbeddingClient, LlmClient, ReverseQueryVectorStore, SummaryHit, SummaryVectorStore,
    VectorHit,
};
use concierge_index::IndexBuilder;
use concierge_query::HyDEGenerator;
use concierge_retrieval::{HybridRetriever, ReviewTable};
use futures::stream::BoxStream;

struct StubEmbedder;

#[async_trait]
impl EmbeddingClient for StubEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        Ok(texts.iter().map(|_| vec![0.0_f32; 4]).collect())
    }
}

struct StubCommentStore;

#[async_trait]
impl CommentVectorStore for StubCommentStore {
    async fn query(&self, _vector: &[f32], _topk: usize, _filter: Option<&str>) -> Result<Vec<VectorHit>, RetrievalError> {
        Ok(vec![VectorHit { id: "c1".to_string() }, VectorHit { id: "c2".to_string() }])
    }
}

struct StubReverseStore;

#[async_trait]
impl ReverseQueryVectorStore for StubReverseStore {
    async fn query(&self, _vector: &[f32], _topk: usize, _filter: Option<&str>) -> Result<Vec<VectorHit>, RetrievalError> {
        Ok(vec![VectorHit { id: "c2".to_string() }])
    }
}

struct StubSummaryStore;

#[async_trait]
impl SummaryVectorStore for StubSummaryStore {
    async fn query(&self, embeddings: &[Vec<f32>], _n_results: usize) -> Result<Vec<Option<SummaryHit>>, RetrievalError> {
        Ok(embeddings
            .iter()
            .map(|_| {
                Some(SummaryHit {
                    category_id: "cat1".to_string(),
                    summary: "guests liked the breakfast".to_string(),
                    category: "breakfast".to_string(),
                    keywords: "breakfast,buffet".to_string(),
                    comment_count: 12,
                })
            })
            .collect())
    }
}

struct StubLlm;

#[async_trait]
impl LlmClient for StubLlm {
    async fn generate(&self, _prompt: &str, _t: f64, _j: bool) -> Result<String, GenerationError> {
        Ok(r#"{"positive": ["early check-in was smooth and easy.", "breakfast had lots of fresh fruit."], "negative": ["lobby was a bit noisy at times."]}"#.to_string())
    }
    async fn generate_stream(&self, _prompt: &str, _t: f64) -> Result<BoxStream<'static, Result<String, GenerationError>>, GenerationError> {
        unimplemented!()
    }
}

fn sample_review(comment_id: &str, text: &str) -> Review {
    Review {
        comment_id: comment_id.to_string(),
        text: text.to_string(),
        score: 4.5,
        publish_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        quality_score: 8.0,
        review_count: 10,
        useful_count: 3,
        room_type: None,
        fuzzy_room_type: None,
        star: None,
        travel_type: String::new(),
        category1: None,
        category2: None,
        category3: None,
        images: Vec::new(),
    }
}

#[tokio::test]
async fn hybrid_retrieve_fuses_routes_and_attaches_review_metadata() {
    let mut builder = IndexBuilder::with_default_stopwords(1.5, 0.75);
    builder.add_document("c1", "早餐 很好 种类 齐全");
    builder.add_document("c2", "早餐 一般 选择 不多");
    let index = builder.build();

    let reviews = ReviewTable::new([
        sample_review("c1", "早餐很好，种类齐全。"),
        sample_review("c2", "早餐一般，选择不多。"),
    ]);

    let retriever = HybridRetriever {
        index: Arc::new(index),
        comment_store: Arc::new(StubCommentStore),
        reverse_store: Arc::new(StubReverseStore),
        summary_store: Arc::new(StubSummaryStore),
        embedder: Arc::new(StubEmbedder),
        hyde_generator: Arc::new(HyDEGenerator::new(Arc::new(StubLlm))),
        reviews: Arc::new(reviews),
    };

    let sub_queries = vec![SubQuery::new("早餐怎么样", 1.0)];
    let outcome = retriever
        .retrieve(&sub_queries, None, &RetrievalConfig::default())
        .await
        .unwrap();

    assert!(!outcome.comments.is_empty());
    assert!(outcome.comments.iter().all(|c| !c.route_ranks.is_empty()));
    assert_eq!(outcome.summaries.len(), 1);
    assert_eq!(outcome.summaries[0].category, "breakfast");

    let ids: std::collections::HashSet<_> = outcome.comments.iter().map(|c| c.comment_id.clone()).collect();
    assert!(ids.contains("c1") && ids.contains("c2"));
}

#[tokio::test]
async fn no_routes_enabled_is_rejected() {
    let index = IndexBuilder::with_default_stopwords(1.5, 0.75).build();
    let retriever = HybridRetriever {
        index: Arc::new(index),
        comment_store: Arc::new(StubCommentStore),
        reverse_store: Arc::new(StubReverseStore),
        summary_store: Arc::new(StubSummaryStore),
        embedder: Arc::new(StubEmbedder),
        hyde_generator: Arc::new(HyDEGenerator::new(Arc::new(StubLlm))),
        reviews: Arc::new(ReviewTable::new(Vec::<Review>::new())),
    };

    let config = RetrievalConfig {
        enable_bm25: false,
        enable_vector: false,
        enable_reverse: false,
        enable_hyde: false,
        enable_summary: false,
        ..RetrievalConfig::default()
    };

    let sub_queries = vec![SubQuery::identity("test")];
    let result = retriever.retrieve(&sub_queries, None, &config).await;
    assert!(matches!(result, Err(RetrievalError::NoRoutesEnabled)));
}
