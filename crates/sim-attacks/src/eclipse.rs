//! Eclipse (Heilman et al.) metrics tracking (§4.7).
//!
//! Topology manipulation itself — forcing a victim's adjacency to
//! attacker-controlled peers — lives in `sim-network::eclipse`, since it
//! is a property of the graph the propagation BFS walks. This module
//! only accumulates the resulting metric: the fraction of honest blocks
//! each victim actually observed directly.

use std::collections::BTreeMap;

/// Tracks, per victim node, how many honestly-produced blocks reached it
/// directly through the (possibly eclipsed) propagation graph.
#[derive(Debug, Clone)]
pub struct EclipseTracker {
    victims: Vec<u64>,
    seen: BTreeMap<u64, u64>,
    total_honest_blocks: u64,
}

impl EclipseTracker {
    pub fn new(victims: &[u64]) -> Self {
        Self {
            victims: victims.to_vec(),
            seen: victims.iter().map(|&v| (v, 0)).collect(),
            total_honest_blocks: 0,
        }
    }

    /// Record one honestly-produced block's propagation outcome: the set
    /// of node ids the BFS actually reached.
    pub fn record_honest_block(&mut self, reached: &[u64]) {
        self.total_honest_blocks += 1;
        for &victim in &self.victims {
            if reached.contains(&victim) {
                *self.seen.entry(victim).or_insert(0) += 1;
            }
        }
    }

    /// Fraction of honest blocks each victim directly observed.
    pub fn honest_blocks_seen_fraction(&self) -> BTreeMap<u64, f64> {
        self.seen
            .iter()
            .map(|(&id, &count)| {
                let fraction = if self.total_honest_blocks == 0 {
                    0.0
                } else {
                    count as f64 / self.total_honest_blocks as f64
                };
                (id, fraction)
            })
            .collect()
    }
}
