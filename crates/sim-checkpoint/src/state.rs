//! The checkpointable simulation state (§3, §4.8, §6).
//!
//! Sufficient to resume a run deterministically: the RNG state plus the
//! pending-event queue are both carried, so future sampling draws and
//! future deterministic events pick up exactly where the original run
//! left off.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use sim_scheduler::Event;
use sim_types::{Block, Config, MetricsAccumulator, Transaction, Wallet};

/// Bumped whenever the on-disk layout changes incompatibly. A mismatch
/// is refused at load time rather than risking silent drift (§7).
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub schema_version: u32,
    pub seed: u64,
    pub rng: StdRng,
    pub current_time: f64,
    pub chain: Vec<Block>,
    pub current_difficulty: f64,
    pub mempool: Vec<Transaction>,
    pub node_last_known_height: BTreeMap<u64, i64>,
    /// Per-wallet remaining-budget/next-emit state. Not named in §6's
    /// checkpoint field list, but without it a resumed run would
    /// re-arm every wallet to its full budget and over-emit — this
    /// closes that gap so property 9 (resumed chain matches the
    /// original's continuation) actually holds.
    pub wallets: Vec<Wallet>,
    pub metrics: MetricsAccumulator,
    pub pending_events: Vec<(f64, Event)>,
    pub config: Config,
}

impl SimulationState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        seed: u64,
        rng: StdRng,
        current_time: f64,
        chain: Vec<Block>,
        current_difficulty: f64,
        mempool: Vec<Transaction>,
        node_last_known_height: BTreeMap<u64, i64>,
        wallets: Vec<Wallet>,
        metrics: MetricsAccumulator,
        pending_events: Vec<(f64, Event)>,
        config: Config,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            rng,
            current_time,
            chain,
            current_difficulty,
            mempool,
            node_last_known_height,
            wallets,
            metrics,
            pending_events,
            config,
        }
    }
}
