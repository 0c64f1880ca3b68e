//! Binary entry point: loads configuration, wires the external service
//! clients and in-process collaborators, and serves the HTTP surface (§6).

mod dto;
mod engine;
mod http;
mod services;
mod timing;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use concierge_core::config::RagConfig;
use concierge_core::models::Review;
use concierge_index::InvertedIndex;
use concierge_observability::QueryLog;
use concierge_query::{HyDEGenerator, IntentDetector, IntentExpander, IntentRecognizer};
use concierge_ranking::MultiFactorRanker;
use concierge_retrieval::{HybridRetriever, ReviewTable};
use tokio::sync::Mutex;

use engine::ConciergeEngine;
use services::{
    HttpCommentVectorStore, HttpEmbeddingClient, HttpLlmClient, HttpRerankClient, HttpReverseQueryVectorStore, HttpSummaryVectorStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    concierge_observability::init_tracing();

    let config_path = std::env::var("CONCIERGE_CONFIG").map(PathBuf::from).ok();
    let config = RagConfig::load(config_path.as_deref())?;
    config.require_services_configured()?;

    let index = InvertedIndex::load(Path::new(&config.index.blob_path))?;
    let reviews = load_reviews(Path::new(&config.index.reviews_path))?;
    tracing::info!(num_docs = index.num_docs(), num_reviews = reviews.len(), "index and review corpus loaded");

    // The original wires three distinct DashScope models (detection, expansion/HyDE,
    // generation); `ServicesConfig` carries a single LLM endpoint, so every
    // query-understanding stage and the generator share one client.
    let llm: Arc<dyn concierge_core::traits::LlmClient> = Arc::new(HttpLlmClient::new(config.services.llm.clone()));
    let embedder: Arc<dyn concierge_core::traits::EmbeddingClient> = Arc::new(HttpEmbeddingClient::new(config.services.embedding.clone()));
    let reranker: Arc<dyn concierge_core::traits::RerankClient> = Arc::new(HttpRerankClient::new(config.services.rerank.clone()));
    let comment_store: Arc<dyn concierge_core::traits::CommentVectorStore> =
        Arc::new(HttpCommentVectorStore::new(config.services.comment_vector_store.clone()));
    let reverse_store: Arc<dyn concierge_core::traits::ReverseQueryVectorStore> =
        Arc::new(HttpReverseQueryVectorStore::new(config.services.reverse_query_vector_store.clone()));
    let summary_store: Arc<dyn concierge_core::traits::SummaryVectorStore> =
        Arc::new(HttpSummaryVectorStore::new(config.services.summary_vector_store.clone()));

    let retriever = Arc::new(HybridRetriever {
        index: Arc::new(index),
        comment_store,
        reverse_store,
        summary_store,
        embedder,
        hyde_generator: Arc::new(HyDEGenerator::new(llm.clone())),
        reviews: Arc::new(reviews),
    });
    let ranker = Arc::new(MultiFactorRanker::new(reranker));
    let generator = Arc::new(concierge_generation::Generator::new(llm.clone()));

    let engine = Arc::new(ConciergeEngine {
        recognizer: IntentRecognizer::new(llm.clone()),
        detector: IntentDetector::new(llm.clone()),
        expander: IntentExpander::new(llm.clone()),
        retriever,
        ranker,
        generator,
        config,
        query_log: Mutex::new(QueryLog::new()),
    });

    let app = http::router(engine);

    let addr = std::env::var("CONCIERGE_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "concierge-server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Reads the newline-delimited JSON review corpus backing [`ReviewTable`].
/// Blank lines are skipped; a malformed line fails startup loudly rather
/// than serving with a silently incomplete corpus.
fn load_reviews(path: &Path) -> anyhow::Result<ReviewTable> {
    let raw = std::fs::read_to_string(path)?;
    let reviews = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<Review>(line).map_err(anyhow::Error::from))
        .collect::<anyhow::Result<Vec<Review>>>()?;
    Ok(ReviewTable::new(reviews))
}
