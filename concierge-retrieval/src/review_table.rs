//! In-memory review lookup, analogous to `df_comments.loc[doc_id]` (§4.3).

use std::collections::HashMap;

use concierge_core::models::Review;

/// Process-lifetime, read-only table of every review keyed by `comment_id`.
#[derive(Debug, Clone, Default)]
pub struct ReviewTable(HashMap<String, Review>);

impl ReviewTable {
    pub fn new(reviews: impl IntoIterator<Item = Review>) -> Self {
        Self(
            reviews
                .into_iter()
                .map(|r| (r.comment_id.clone(), r))
                .collect(),
        )
    }

    pub fn get(&self, comment_id: &str) -> Option<&Review> {
        self.0.get(comment_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
