//! # Configuration Schema
//!
//! Mirrors the YAML configuration sections (§6): `network`, `consensus`,
//! `mining`, `economics`, `transactions`, `simulation`, `attack`. Loading
//! the YAML itself and merging CLI overrides are external-collaborator
//! concerns (the CLI binary); this crate only defines the shape and the
//! startup validation.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Consensus discipline selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsensusKind {
    Pow,
    Pos,
    PoSpace,
}

/// `network{}` section: peer topology shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub nodes: u64,
    pub neighbors: u64,
    /// Optional positive per-hop propagation delay in seconds. `None`
    /// (the default) means instantaneous delivery.
    #[serde(default)]
    pub propagation_delay: Option<f64>,
}

/// `consensus{}` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusSection {
    #[serde(rename = "type")]
    pub kind: ConsensusKind,
}

/// `mining{}` section: producer population and block-production knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiningConfig {
    pub miners: u64,
    /// Per-miner capacity: hashrate (PoW), stake (PoS), or space (PoSpace).
    pub capacity: f64,
    pub blocktime: f64,
    pub blocksize: u32,
    pub difficulty: f64,
    #[serde(default)]
    pub retarget_interval: Option<u64>,
}

/// `economics{}` section: issuance schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicsConfig {
    pub initial_reward: f64,
    #[serde(default)]
    pub halving_interval: Option<u64>,
    /// `None` denotes unlimited halvings, not zero (§4.5).
    #[serde(default)]
    pub max_halvings: Option<u64>,
}

/// `transactions{}` section: wallet population feeding the mempool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsConfig {
    pub wallets: u64,
    pub transactions_per_wallet: u32,
    pub interval: f64,
}

/// `simulation{}` section: run bounds and reporting cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub blocks: Option<u64>,
    #[serde(default)]
    pub years: Option<f64>,
    pub print_interval: u64,
    #[serde(default)]
    pub debug: bool,
    pub seed: u64,
}

/// Attack strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttackKind {
    Selfish,
    DoubleSpend,
    Eclipse,
}

/// `attack{}` section, present only when an adversarial scenario is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackConfig {
    pub kind: AttackKind,
    pub attacker_hashrate: f64,
    /// Selfish mining's γ (attacker's share of the honest race on a tie).
    /// Defaults to `attacker_hashrate` when unset (§9).
    #[serde(default)]
    pub gamma: Option<f64>,
    #[serde(default = "default_confirmations")]
    pub confirmations: u32,
    #[serde(default)]
    pub victim_nodes: u64,
}

fn default_confirmations() -> u32 {
    6
}

/// The full, validated simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub consensus: ConsensusSection,
    pub mining: MiningConfig,
    pub economics: EconomicsConfig,
    pub transactions: TransactionsConfig,
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub attack: Option<AttackConfig>,
}

impl Config {
    /// Startup validation per §6. Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mining.miners == 0 {
            return Err(ConfigError::NotPositive {
                field: "mining.miners",
                value: 0.0,
            });
        }
        if self.mining.capacity <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "mining.capacity",
                value: self.mining.capacity,
            });
        }
        if self.mining.blocktime <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "mining.blocktime",
                value: self.mining.blocktime,
            });
        }
        if self.mining.blocksize == 0 {
            return Err(ConfigError::NotPositive {
                field: "mining.blocksize",
                value: 0.0,
            });
        }
        if self.network.nodes == 0 {
            return Err(ConfigError::NotPositive {
                field: "network.nodes",
                value: 0.0,
            });
        }
        if self.network.neighbors >= self.network.nodes {
            return Err(ConfigError::NeighborsExceedNodes {
                neighbors: self.network.neighbors,
                nodes: self.network.nodes,
            });
        }
        if self.simulation.blocks.is_none() && self.simulation.years.is_none() {
            return Err(ConfigError::NoTerminationBound);
        }
        if let Some(attack) = &self.attack {
            if !(0.0..=1.0).contains(&attack.attacker_hashrate) {
                return Err(ConfigError::NotAFraction {
                    field: "attack.attacker_hashrate",
                    value: attack.attacker_hashrate,
                });
            }
            if attack.confirmations < 1 {
                return Err(ConfigError::ConfirmationsTooLow(attack.confirmations));
            }
            if attack.victim_nodes >= self.network.nodes {
                return Err(ConfigError::VictimsExceedNodes {
                    victims: attack.victim_nodes,
                    nodes: self.network.nodes,
                });
            }
        }
        Ok(())
    }
}
