//! HTTP-backed implementations of the six external service traits
//! (`concierge_core::traits`), each grounded on the OpenAI-compatible REST
//! contract or the vendor REST contract its trait was modeled on.

pub mod embedding;
pub mod llm;
pub mod rerank;
pub mod summary_store;
pub mod vector_store;

pub use embedding::HttpEmbeddingClient;
pub use llm::HttpLlmClient;
pub use rerank::HttpRerankClient;
pub use summary_store::HttpSummaryVectorStore;
pub use vector_store::{HttpCommentVectorStore, HttpReverseQueryVectorStore};
