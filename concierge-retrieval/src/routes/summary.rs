//! Route 5: category-summary recall (§4.3.5). Retrieved but never fused with
//! comments — summaries live alongside the final comment candidates, not
//! inside the RRF ranking.

use std::collections::HashMap;
use std::sync::Arc;

use concierge_core::models::CategorySummary;
use concierge_core::traits::SummaryVectorStore;

pub async fn run(store: Arc<dyn SummaryVectorStore>, query_embeddings: &[Vec<f32>]) -> Vec<CategorySummary> {
    let hits = match store.query(query_embeddings, 1).await {
        Ok(hits) => hits,
        Err(err) => {
            tracing::warn!(route = "summary", error = %err, "route query failed");
            return Vec::new();
        }
    };

    let mut by_category: HashMap<String, CategorySummary> = HashMap::new();
    for (query_idx, hit) in hits.into_iter().enumerate() {
        let Some(hit) = hit else { continue };
        by_category
            .entry(hit.category_id.clone())
            .and_modify(|s| s.retrieved_by_queries.push(query_idx))
            .or_insert_with(|| CategorySummary {
                category: hit.category,
                keywords: hit.keywords,
                summary: hit.summary,
                comment_count: hit.comment_count,
                retrieved_by_queries: vec![query_idx],
            });
    }

    by_category.into_values().collect()
}
