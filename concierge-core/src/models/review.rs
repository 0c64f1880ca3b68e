use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An immutable user review, identified by a stable `comment_id`.
///
/// `star`, `travel_type`, `category1..3`, and `images` are presentation-only:
/// no retrieval, fusion, or ranking logic reads them. They exist so a caller
/// rendering a comment card has what it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub comment_id: String,
    pub text: String,
    /// 0.0 ..= 5.0
    pub score: f64,
    pub publish_date: NaiveDate,
    /// 0.0 ..= 10.0
    pub quality_score: f64,
    pub review_count: u64,
    pub useful_count: u64,
    /// One of the 15 exact room-type names, or `None`.
    pub room_type: Option<String>,
    /// One of the 4 coarse room-type names, or `None`.
    pub fuzzy_room_type: Option<String>,

    /// Integer star rating for display; falls back to `score` truncated when absent upstream.
    #[serde(default)]
    pub star: Option<i64>,
    #[serde(default)]
    pub travel_type: String,
    #[serde(default)]
    pub category1: Option<String>,
    #[serde(default)]
    pub category2: Option<String>,
    #[serde(default)]
    pub category3: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Review {
    /// The display star rating, defaulting to `score` truncated when not set explicitly.
    pub fn display_star(&self) -> i64 {
        self.star.unwrap_or(self.score as i64)
    }
}
