//! Adversary modules layered onto the core engine (§4.7).
//!
//! Modeled as a tagged `Attack` enum with a single `on_block` hook,
//! rather than a trait-object hierarchy, per the Design Note: the core
//! coordinator loop stays closed to modification and open to new
//! attacks.

pub mod doublespend;
pub mod eclipse;
pub mod selfish;

use rand::Rng;
use sim_types::AttackMetrics;

pub use doublespend::{DoubleSpend, DoubleSpendOutcome};
pub use eclipse::EclipseTracker;
pub use selfish::{Finder, SelfishAction, SelfishMining};

/// A block-production outcome, as seen by an attack strategy: which side
/// produced the block, and (for eclipse metrics) which nodes the
/// propagation BFS actually reached.
#[derive(Debug, Clone)]
pub struct BlockProduced {
    pub by_attacker: bool,
    pub reached_nodes: Vec<u64>,
}

/// What the coordinator should do in response to an attack's reaction to
/// a produced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    ReleasePrivateBlocks(u64),
    AdoptPublic,
    DoubleSpendResolved(DoubleSpendOutcome),
}

/// One active adversary strategy. Eclipse is topology-level (wired
/// through `sim_network::eclipse` at setup) and only accumulates metrics
/// here; selfish mining and double-spend additionally react to every
/// produced block.
pub enum Attack {
    Selfish(SelfishMining),
    DoubleSpend(DoubleSpend),
    Eclipse(EclipseTracker),
}

impl Attack {
    /// React to a produced block. Returns an action for the coordinator
    /// to apply (release withheld blocks, adopt the public tip, record a
    /// double-spend resolution); `None` when the attack absorbs the
    /// event without a coordinator-visible effect.
    pub fn on_block<R: Rng + ?Sized>(&mut self, event: &BlockProduced, rng: &mut R) -> Option<ScheduledAction> {
        match self {
            Attack::Selfish(state) => {
                let finder = if event.by_attacker { Finder::Attacker } else { Finder::Honest };
                state.step(finder, rng).map(|action| match action {
                    SelfishAction::ReleasePrivateBlocks(n) => ScheduledAction::ReleasePrivateBlocks(n),
                    SelfishAction::AdoptPublic => ScheduledAction::AdoptPublic,
                })
            }
            Attack::DoubleSpend(state) => {
                let outcome = if event.by_attacker {
                    state.on_private_block()
                } else {
                    state.on_honest_block()
                };
                outcome.map(ScheduledAction::DoubleSpendResolved)
            }
            Attack::Eclipse(tracker) => {
                if !event.by_attacker {
                    tracker.record_honest_block(&event.reached_nodes);
                }
                None
            }
        }
    }

    /// The structured, export-ready metrics block for whichever strategy
    /// is active (§6). `attacker_hashrate_share` is only meaningful for
    /// `Selfish`, where it is reported alongside the share the model
    /// actually achieved so the two can be compared (§8, S4).
    pub fn export_metrics(&self, attacker_hashrate_share: f64) -> AttackMetrics {
        match self {
            Attack::Selfish(state) => AttackMetrics::Selfish {
                attacker_blocks: state.attacker_blocks(),
                attacker_hashrate_share,
                attacker_block_share: state.attacker_share(),
            },
            Attack::DoubleSpend(state) => AttackMetrics::DoubleSpend {
                attempts: state.attempts(),
                successes: state.successes(),
                mean_depth_at_success: state.mean_depth_at_success(),
                mean_depth_at_failure: state.mean_depth_at_failure(),
            },
            Attack::Eclipse(tracker) => AttackMetrics::Eclipse {
                honest_blocks_seen_fraction: tracker.honest_blocks_seen_fraction(),
            },
        }
    }
}
