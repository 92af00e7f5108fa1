//! # Simulation Types Crate
//!
//! Domain entities (`Block`, `Transaction`, `Node`, `Producer`, `Wallet`),
//! the configuration schema, the metrics accumulator/export record, and
//! error types shared across the simulator's crates.

pub mod config;
pub mod entities;
pub mod errors;
pub mod metrics;

pub use config::{
    AttackConfig, AttackKind, Config, ConsensusKind, ConsensusSection, EconomicsConfig,
    MiningConfig, NetworkConfig, SimulationConfig, TransactionsConfig,
};
pub use entities::{Block, Node, Producer, ProofWitness, Transaction, Wallet};
pub use errors::{CapacityUnderflow, CheckpointError, ConfigError};
pub use metrics::{AttackMetrics, MetricsAccumulator, MetricsExport};
