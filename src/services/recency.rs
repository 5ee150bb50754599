use super::weights::MILLIS_PER_DAY;

/// Linear recency decay shared by every time-stamped signal
///
/// Returns `1.0` for an event at `now`, falling linearly to `0.0` once the
/// event is `window_days` old and staying there. The result is always within
/// `[0, 1]`: timestamps in the future count as fully recent and a non-positive
/// window makes every event worthless.
pub fn recency_weight(event_timestamp: i64, now: i64, window_days: f64) -> f64 {
    if window_days <= 0.0 || !window_days.is_finite() {
        return 0.0;
    }

    let age_millis = now.saturating_sub(event_timestamp) as f64;
    let window_millis = window_days * MILLIS_PER_DAY;

    (1.0 - age_millis / window_millis).clamp(0.0, 1.0)
}
