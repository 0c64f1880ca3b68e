mod embedding;
mod llm;
mod rerank;
mod vector_store;

pub use embedding::EmbeddingClient;
pub use llm::LlmClient;
pub use rerank::RerankClient;
pub use vector_store::{CommentVectorStore, ReverseQueryVectorStore, SummaryHit, SummaryVectorStore, VectorHit};
