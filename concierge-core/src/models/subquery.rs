use serde::{Deserialize, Serialize};

use crate::constants::EXPANSION_WEIGHT_QUANTUM;

/// A weighted rewritten query produced by the expander (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubQuery {
    #[serde(rename = "query")]
    pub text: String,
    pub weight: f64,
}

impl SubQuery {
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }

    /// The identity sub-query substituted when expansion is disabled or fails.
    pub fn identity(user_query: impl Into<String>) -> Self {
        Self::new(user_query, 1.0)
    }
}

/// Validates the expander-output invariants from §8: 1–3 sub-queries, weights
/// quantized to 0.2, and weights summing to 1.0 within 1e-9.
pub fn validate_sub_queries(sub_queries: &[SubQuery]) -> bool {
    if sub_queries.is_empty() || sub_queries.len() > 3 {
        return false;
    }
    let quantum_ok = sub_queries.iter().all(|q| {
        let steps = q.weight / EXPANSION_WEIGHT_QUANTUM;
        (steps - steps.round()).abs() < 1e-9 && q.weight > 0.0 && q.weight <= 1.0
    });
    if !quantum_ok {
        return false;
    }
    let sum: f64 = sub_queries.iter().map(|q| q.weight).sum();
    (sum - 1.0).abs() < 1e-9
}
