use serde::{Deserialize, Serialize};

/// A category-level summary hit (§3). Retrieved but never fused with comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub keywords: String,
    pub summary: String,
    #[serde(default)]
    pub comment_count: u64,
    /// Indices, into the sub-query list, of every sub-query that recalled this category.
    pub retrieved_by_queries: Vec<usize>,
}
