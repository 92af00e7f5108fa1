//! Difficulty retargeting (§4.5).
//!
//! Every `retarget_interval` blocks, recompute difficulty from the ratio
//! of the target window to the actual elapsed window, clamped to
//! `[difficulty / 4, difficulty * 4]` to bound swings. A `None` interval
//! means difficulty never changes.

/// Clamp factor: difficulty may move at most 4x in either direction per
/// retarget (§4.5, tested by property 7 in §8).
const MAX_ADJUSTMENT_FACTOR: f64 = 4.0;

/// Compute the next difficulty given the current one and the observed
/// vs. target window durations for the interval just closed.
///
/// `target_window_seconds` is `retarget_interval * blocktime`;
/// `actual_window_seconds` is the wall-simulated time the interval took.
pub fn retarget(current_difficulty: f64, target_window_seconds: f64, actual_window_seconds: f64) -> f64 {
    debug_assert!(actual_window_seconds.is_finite() && actual_window_seconds >= 0.0);
    if actual_window_seconds <= 0.0 {
        // A degenerate (zero-duration) window would divide by zero;
        // treat it as maximally fast and clamp to the ceiling.
        return current_difficulty * MAX_ADJUSTMENT_FACTOR;
    }
    let ratio = target_window_seconds / actual_window_seconds;
    let unclamped = current_difficulty * ratio;
    unclamped.clamp(
        current_difficulty / MAX_ADJUSTMENT_FACTOR,
        current_difficulty * MAX_ADJUSTMENT_FACTOR,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faster_than_target_raises_difficulty() {
        // Target 600s window took only 300s: blocks came in twice as
        // fast as intended, so difficulty should roughly double.
        let next = retarget(1000.0, 600.0, 300.0);
        assert!((next - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn slower_than_target_lowers_difficulty() {
        let next = retarget(1000.0, 600.0, 1200.0);
        assert!((next - 500.0).abs() < 1e-9);
    }

    #[test]
    fn swings_are_clamped_to_four_x() {
        let next_up = retarget(1000.0, 600.0, 1.0); // would be huge
        assert!((next_up - 4000.0).abs() < 1e-6);

        let next_down = retarget(1000.0, 600.0, 100_000.0); // would be tiny
        assert!((next_down - 250.0).abs() < 1e-6);
    }

    #[test]
    fn on_target_leaves_difficulty_unchanged() {
        let next = retarget(1234.5, 600.0, 600.0);
        assert!((next - 1234.5).abs() < 1e-9);
    }
}
