use concierge_decay::recency_score;
use proptest::prelude::*;

proptest! {
    #[test]
    fn recency_strictly_decreases_as_publish_date_recedes(
        decay in 0.01f64..3.0,
        half_life in 1i64..720,
        earlier_days in 0i64..2000,
        gap in 1i64..500,
    ) {
        let later_days = earlier_days + gap;
        let earlier_score = recency_score(earlier_days, decay, half_life);
        let later_score = recency_score(later_days, decay, half_life);
        prop_assert!(later_score < earlier_score);
    }

    #[test]
    fn recency_score_stays_in_unit_interval(
        decay in 0.0f64..3.0,
        half_life in 1i64..720,
        days in 0i64..5000,
    ) {
        let score = recency_score(days, decay, half_life);
        prop_assert!(score > 0.0 && score <= 1.0);
    }
}
