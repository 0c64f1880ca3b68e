//! Time-sensitivity-aware exponential recency decay (§4.4).

use chrono::NaiveDate;

use concierge_core::models::TimeSensitivity;

/// The decay rate to use, given how time-sensitive the query was judged to be.
///
/// `base_decay` always applies; `implied` adds `implied_boost`; `clear` adds
/// both `implied_boost` and `clear_boost`. Decays are 0.5 / 1.0 / 1.5 at the
/// documented defaults.
pub fn decay_rate(
    time_sensitivity: Option<TimeSensitivity>,
    base_decay: f64,
    implied_boost: f64,
    clear_boost: f64,
) -> f64 {
    match time_sensitivity {
        Some(TimeSensitivity::Clear) => base_decay + implied_boost + clear_boost,
        Some(TimeSensitivity::Implied) => base_decay + implied_boost,
        Some(TimeSensitivity::None) | None => base_decay,
    }
}

/// Whole days between `publish_date` and `today`, floored at zero.
pub fn days_ago(publish_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - publish_date).num_days().max(0)
}

/// `exp(-decay * days_ago / half_life_days)`. Strictly decreasing in
/// `days_ago` for `decay > 0`; always in `(0, 1]`.
pub fn recency_score(days_ago: i64, decay: f64, half_life_days: i64) -> f64 {
    (-decay * days_ago as f64 / half_life_days as f64).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_rate_steps_match_spec_defaults() {
        assert_eq!(decay_rate(None, 0.5, 0.5, 0.5), 0.5);
        assert_eq!(decay_rate(Some(TimeSensitivity::None), 0.5, 0.5, 0.5), 0.5);
        assert_eq!(decay_rate(Some(TimeSensitivity::Implied), 0.5, 0.5, 0.5), 1.0);
        assert_eq!(decay_rate(Some(TimeSensitivity::Clear), 0.5, 0.5, 0.5), 1.5);
    }

    #[test]
    fn time_decay_steps_are_strictly_decreasing() {
        let days = 365;
        let half_life = 180;
        let none = recency_score(days, 0.5, half_life);
        let implied = recency_score(days, 1.0, half_life);
        let clear = recency_score(days, 1.5, half_life);
        assert!(none > implied);
        assert!(implied > clear);
    }

    #[test]
    fn recency_is_strictly_decreasing_in_days_ago() {
        let decay = 0.5;
        let half_life = 180;
        let mut previous = recency_score(0, decay, half_life);
        for days in (1..1000).step_by(30) {
            let current = recency_score(days, decay, half_life);
            assert!(current < previous);
            previous = current;
        }
    }

    #[test]
    fn days_ago_floors_at_zero_for_future_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let future = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert_eq!(days_ago(future, today), 0);
    }
}
