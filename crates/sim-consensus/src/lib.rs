//! # Consensus Strategies
//!
//! A uniform capability — `next_block(rng, producers, difficulty) ->
//! (producer_id, delay_seconds)` — implemented by a tagged `enum
//! Consensus` rather than a trait-object hierarchy, per the Design Note
//! on polymorphism across consensus types (§9).

pub mod sampling;

use rand::Rng;
use rand_distr::{Distribution, Exp};
use sim_types::{Producer, ProofWitness};

use sampling::weighted_pick;

/// Proof-of-Work configuration: delay is exponential with rate
/// `total_hashrate / difficulty`.
#[derive(Debug, Clone, Copy)]
pub struct PowConfig {
    pub blocktime: f64,
}

/// Proof-of-Stake configuration: delay is fixed to `blocktime`, with an
/// optional jitter fraction (0 = fully deterministic, the default).
#[derive(Debug, Clone, Copy)]
pub struct PosConfig {
    pub blocktime: f64,
    pub jitter: f64,
}

/// Proof-of-Space configuration: delay is exponential with rate
/// `total_space / target_blocktime` (Chia-style VDF abstraction).
#[derive(Debug, Clone, Copy)]
pub struct PoSpaceConfig {
    pub target_blocktime: f64,
}

/// The active consensus discipline. One `next_block` operation dispatches
/// across variants; no shared trait object is needed because the core
/// loop only ever holds one concrete `Consensus` value for a whole run.
#[derive(Debug, Clone, Copy)]
pub enum Consensus {
    Pow(PowConfig),
    Pos(PosConfig),
    PoSpace(PoSpaceConfig),
}

impl Consensus {
    /// Sample the next producer and inter-block delay. `difficulty` is
    /// read fresh every call so PoW retargeting takes effect immediately
    /// on the following sample (§4.5).
    pub fn next_block<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        producers: &[Producer],
        difficulty: f64,
    ) -> (u64, f64) {
        match self {
            Consensus::Pow(cfg) => {
                let total: f64 = producers.iter().map(|p| p.capacity).sum();
                let producer_id = weighted_pick(rng, producers);
                let rate = total / difficulty;
                let delay = sample_exponential(rng, rate);
                let _ = cfg.blocktime; // blocktime informs config defaults only
                (producer_id, delay)
            }
            Consensus::Pos(cfg) => {
                let producer_id = weighted_pick(rng, producers);
                let delay = if cfg.jitter <= 0.0 {
                    cfg.blocktime
                } else {
                    let spread = cfg.blocktime * cfg.jitter;
                    cfg.blocktime + rng.gen_range(-spread..=spread)
                };
                (producer_id, delay.max(0.0))
            }
            Consensus::PoSpace(cfg) => {
                let total: f64 = producers.iter().map(|p| p.capacity).sum();
                let producer_id = weighted_pick(rng, producers);
                let rate = total / cfg.target_blocktime;
                let delay = sample_exponential(rng, rate);
                (producer_id, delay)
            }
        }
    }

    /// The informational proof witness for a producer selected under this
    /// discipline, given its capacity share of the total.
    pub fn proof_witness(&self, share: f64) -> ProofWitness {
        match self {
            Consensus::Pow(_) => ProofWitness::Hashrate(share),
            Consensus::Pos(_) => ProofWitness::Stake(share),
            Consensus::PoSpace(_) => ProofWitness::Space(share),
        }
    }
}

fn sample_exponential<R: Rng + ?Sized>(rng: &mut R, rate: f64) -> f64 {
    // A zero or non-finite rate is a producer-selection underflow and is
    // validated away before the run starts (§7); guard defensively here
    // only against pathological near-zero rates from float rounding.
    let rate = rate.max(f64::MIN_POSITIVE);
    Exp::new(rate).expect("exponential rate must be positive").sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn producers(n: u64, capacity: f64) -> Vec<Producer> {
        (0..n)
            .map(|id| Producer {
                id,
                capacity,
                is_adversary: false,
            })
            .collect()
    }

    #[test]
    fn pos_without_jitter_is_deterministic() {
        let cfg = Consensus::Pos(PosConfig {
            blocktime: 12.0,
            jitter: 0.0,
        });
        let mut rng = StdRng::seed_from_u64(1);
        let ps = producers(3, 1.0);
        let (_, delay) = cfg.next_block(&mut rng, &ps, 1.0);
        assert_eq!(delay, 12.0);
    }

    #[test]
    fn pow_mean_delay_tracks_difficulty_over_hashrate() {
        let cfg = Consensus::Pow(PowConfig { blocktime: 600.0 });
        let ps = producers(4, 25.0); // total hashrate 100
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let sum: f64 = (0..n)
            .map(|_| cfg.next_block(&mut rng, &ps, 1000.0).1)
            .sum();
        let mean = sum / n as f64;
        // mean = difficulty / total_hashrate = 1000 / 100 = 10
        assert!((mean - 10.0).abs() / 10.0 < 0.05, "mean delay {mean}");
    }

    #[test]
    fn identical_seed_reproduces_identical_samples() {
        let cfg = Consensus::Pow(PowConfig { blocktime: 600.0 });
        let ps = producers(5, 20.0);
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a: Vec<(u64, f64)> = (0..50).map(|_| cfg.next_block(&mut rng_a, &ps, 100.0)).collect();
        let b: Vec<(u64, f64)> = (0..50).map(|_| cfg.next_block(&mut rng_b, &ps, 100.0)).collect();
        assert_eq!(a, b);
    }
}
