//! Time-sensitivity-aware exponential recency decay, shared by the ranker.

pub mod formula;

pub use formula::{days_ago, decay_rate, recency_score};
