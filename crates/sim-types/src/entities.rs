//! # Core Domain Entities
//!
//! Symbolic records for the simulated chain. Blocks and transactions here
//! are not verifiable artifacts: there is no hashing, no signatures, no
//! Merkle trees. A `Block` carries exactly the fields the rest of the
//! simulator needs to reason about production, propagation and issuance.

use serde::{Deserialize, Serialize};

/// Which consensus discipline produced a block, and the producer's
/// informational proof-of-work-or-equivalent share at production time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProofWitness {
    /// Producer's share of total hashrate at the time of production.
    Hashrate(f64),
    /// Producer's share of total stake at the time of production.
    Stake(f64),
    /// Producer's share of total allocated space at the time of production.
    Space(f64),
}

/// An immutable, symbolic block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Height in the canonical chain. Dense and strictly increasing.
    pub height: u64,
    /// Id of the producer (miner/validator/farmer) that created this block.
    pub producer_id: u64,
    /// Height of the parent block (`height - 1` for the canonical chain).
    pub parent_height: u64,
    /// Simulated creation timestamp, in seconds.
    pub timestamp: f64,
    /// Number of transactions included.
    pub tx_count: usize,
    /// Reward paid to the producer, in coins.
    pub reward: f64,
    /// Difficulty in effect when this block was produced.
    pub difficulty: f64,
    /// Consensus-specific, purely informational proof witness.
    pub proof: ProofWitness,
}

/// A symbolic, opaque transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Monotonically increasing transaction id.
    pub id: u64,
    /// Id of the wallet that created the transaction.
    pub wallet_id: u64,
    /// Simulated creation timestamp, in seconds.
    pub timestamp: f64,
    /// Capacity-accounting size; the core assumes 1 unit per transaction.
    pub size: u32,
}

/// A node in the peer topology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Node id, also its index into the topology arena.
    pub id: u64,
    /// Ids of directly connected peers.
    pub adjacency: Vec<u64>,
    /// Height of the best block this node has observed so far.
    pub last_known_height: i64,
    /// Whether this node is an eclipse victim.
    pub eclipsed: bool,
    /// When eclipsed, the attacker-controlled peer set replacing `adjacency`
    /// for propagation purposes.
    pub forced_peers: Option<Vec<u64>>,
}

impl Node {
    /// Peers a propagation BFS should traverse from this node: the forced
    /// (attacker-controlled) set when eclipsed, else the honest adjacency.
    pub fn effective_peers(&self) -> &[u64] {
        match &self.forced_peers {
            Some(peers) if self.eclipsed => peers,
            _ => &self.adjacency,
        }
    }
}

/// A block producer: miner (PoW), validator (PoS) or farmer (PoSpace).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Producer {
    /// Producer id.
    pub id: u64,
    /// Capacity: hashrate, stake, or allocated space, always positive.
    pub capacity: f64,
    /// Whether this producer is adversary-controlled.
    pub is_adversary: bool,
}

/// A transaction-emitting wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// Wallet id.
    pub id: u64,
    /// Number of transactions this wallet has left to emit.
    pub remaining_budget: u32,
    /// Simulated time of this wallet's next emission.
    pub next_emit: f64,
}
