//! Weighted Reciprocal Rank Fusion (§4.3.6): `score(d) += weight[query_idx] / (k + rank)`.

use std::collections::HashMap;

use concierge_core::constants::RRF_K;
use concierge_core::models::RouteHit;

/// Fuse every route's hits into one RRF score per `comment_id`, weighted by
/// the originating sub-query's expansion weight.
///
/// Ties in the final ranking are broken by `comment_id` ascending (§4.3.6);
/// callers sort the returned map's entries themselves since `HashMap` has no
/// stable order.
pub fn fuse(hits: &[RouteHit], sub_query_weights: &[f64]) -> HashMap<String, f64> {
    let mut scores: HashMap<String, f64> = HashMap::new();
    for hit in hits {
        let weight = sub_query_weights.get(hit.query_idx).copied().unwrap_or(0.0);
        *scores.entry(hit.comment_id.clone()).or_insert(0.0) += weight / (RRF_K + hit.rank as f64);
    }
    scores
}

/// Sorts fused scores descending, breaking ties by `comment_id` ascending, and
/// returns the 1-based rank alongside each `comment_id`.
pub fn rank(scores: &HashMap<String, f64>) -> Vec<(String, f64, usize)> {
    let mut entries: Vec<(String, f64)> = scores.iter().map(|(id, s)| (id.clone(), *s)).collect();
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (id, score))| (id, score, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_core::models::Route;

    #[test]
    fn single_hit_scores_weight_over_k_plus_rank() {
        let hits = vec![RouteHit::new("c1", Route::Bm25, 1, 0)];
        let scores = fuse(&hits, &[1.0]);
        assert_eq!(scores["c1"], 1.0 / (RRF_K + 1.0));
    }

    #[test]
    fn contributions_from_multiple_routes_accumulate() {
        let hits = vec![
            RouteHit::new("c1", Route::Bm25, 1, 0),
            RouteHit::new("c1", Route::Vector, 3, 0),
        ];
        let scores = fuse(&hits, &[1.0]);
        let expected = 1.0 / (RRF_K + 1.0) + 1.0 / (RRF_K + 3.0);
        assert!((scores["c1"] - expected).abs() < 1e-12);
    }

    #[test]
    fn ties_break_on_comment_id_ascending() {
        let mut scores = HashMap::new();
        scores.insert("c2".to_string(), 0.5);
        scores.insert("c1".to_string(), 0.5);
        let ranked = rank(&scores);
        assert_eq!(ranked[0].0, "c1");
        assert_eq!(ranked[1].0, "c2");
    }

    #[test]
    fn sub_query_weight_scales_contribution() {
        let hits = vec![
            RouteHit::new("c1", Route::Bm25, 1, 0),
            RouteHit::new("c2", Route::Bm25, 1, 1),
        ];
        let scores = fuse(&hits, &[0.8, 0.2]);
        assert!(scores["c1"] > scores["c2"]);
    }
}
