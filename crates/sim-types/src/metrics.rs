//! # Metrics Accumulator & Export Record
//!
//! The in-memory accumulator is updated once per produced block by the
//! coordinator. `MetricsExport` is the structured record (§6) serialized
//! to JSON by the CLI binary; formatting that JSON is an external concern,
//! but the record's shape lives here so checkpoint and export agree on it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Running totals updated as blocks are produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsAccumulator {
    pub blocks_produced: u64,
    pub transactions_included: u64,
    pub coins_issued: f64,
    /// Sum of inter-block times, for a running mean.
    pub block_time_sum: f64,
    /// Blocks produced per producer id, for share computation.
    pub blocks_by_producer: BTreeMap<u64, u64>,
    /// Difficulty value recorded at each retarget event, in order.
    pub difficulty_history: Vec<f64>,
    /// Propagation hops recorded per delivered block, for a running mean.
    pub propagation_hops_sum: u64,
    pub propagation_hops_count: u64,
    /// Nodes a block failed to reach (disconnected topology), non-fatal.
    pub propagation_losses: u64,
}

impl MetricsAccumulator {
    pub fn record_block(&mut self, producer_id: u64, tx_count: usize, reward: f64, inter_block_time: f64) {
        self.blocks_produced += 1;
        self.transactions_included += tx_count as u64;
        self.coins_issued += reward;
        self.block_time_sum += inter_block_time;
        *self.blocks_by_producer.entry(producer_id).or_insert(0) += 1;
    }

    pub fn record_retarget(&mut self, new_difficulty: f64) {
        self.difficulty_history.push(new_difficulty);
    }

    pub fn record_propagation(&mut self, hops: u64) {
        self.propagation_hops_sum += hops;
        self.propagation_hops_count += 1;
    }

    pub fn mean_block_time(&self) -> f64 {
        if self.blocks_produced == 0 {
            0.0
        } else {
            self.block_time_sum / self.blocks_produced as f64
        }
    }

    pub fn mean_propagation_hops(&self) -> f64 {
        if self.propagation_hops_count == 0 {
            0.0
        } else {
            self.propagation_hops_sum as f64 / self.propagation_hops_count as f64
        }
    }

    /// Each producer's share of accepted blocks.
    pub fn producer_shares(&self) -> BTreeMap<u64, f64> {
        let total = self.blocks_produced as f64;
        self.blocks_by_producer
            .iter()
            .map(|(id, count)| (*id, if total > 0.0 { *count as f64 / total } else { 0.0 }))
            .collect()
    }
}

/// Attack-specific metrics; the variant matches the configured attack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AttackMetrics {
    Selfish {
        attacker_blocks: u64,
        attacker_hashrate_share: f64,
        attacker_block_share: f64,
    },
    DoubleSpend {
        attempts: u64,
        successes: u64,
        mean_depth_at_success: f64,
        mean_depth_at_failure: f64,
    },
    Eclipse {
        /// Fraction of honest blocks directly observed, per victim node id.
        honest_blocks_seen_fraction: BTreeMap<u64, f64>,
    },
}

/// The full structured metrics-export record (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsExport {
    pub seed: u64,
    pub chain_label: String,
    pub duration_seconds: f64,
    pub blocks: u64,
    pub transactions: u64,
    pub coins_issued: f64,
    pub mean_block_time: f64,
    pub mean_propagation_hops: f64,
    pub producer_shares: BTreeMap<u64, f64>,
    pub difficulty_history: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack: Option<AttackMetrics>,
}
