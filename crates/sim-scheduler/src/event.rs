//! Event kinds carried by the scheduler (§4.1).

use serde::{Deserialize, Serialize};

/// A unit of work the coordinator runs to completion before the next
/// event is popped. The scheduler is agnostic to what each kind means;
/// dispatch lives in the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A producer attempts to publish a block.
    BlockCandidate { producer_id: u64 },
    /// A previously-produced block reaches a specific node.
    PropagationArrival {
        block_height: u64,
        node_id: u64,
        /// Hop count from the producer, for bandwidth metrics.
        hops: u64,
    },
    /// A wallet creates a transaction.
    TxEmit { wallet_id: u64 },
    /// An adversary strategy advances one step.
    AttackTick,
    /// Simulated end-of-run.
    Terminate,
}
