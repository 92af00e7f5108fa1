//! Reward schedule (§4.5).
//!
//! `halvings = height / halving_interval` (integer division). Reward is
//! `initial_reward / 2^halvings`, zeroed once `max_halvings` is reached.
//! `max_halvings == None` denotes *unlimited* halvings, never zero — a
//! historical bug this implementation explicitly avoids reintroducing.

/// Compute the block reward at `height` under the configured schedule.
///
/// `halving_interval == None` or `max_halvings == Some(0)` both mean a
/// constant reward equal to `initial_reward`.
pub fn reward_at_height(
    height: u64,
    initial_reward: f64,
    halving_interval: Option<u64>,
    max_halvings: Option<u64>,
) -> f64 {
    let Some(interval) = halving_interval else {
        return initial_reward;
    };
    if interval == 0 {
        return initial_reward;
    }
    if max_halvings == Some(0) {
        return initial_reward;
    }

    let halvings = height / interval;
    if let Some(max) = max_halvings {
        if halvings >= max {
            return 0.0;
        }
    }
    initial_reward / 2f64.powi(halvings as i32)
}
