//! CLI surface (§6), implemented with `clap` derive macros. Values parsed
//! here override whatever the `--config` YAML file sets; `--chain`
//! supplies chain-shaped defaults beneath both (see `chain_presets`).

use clap::{Parser, ValueEnum};

/// Named chain presets, each supplying a set of economics/consensus
/// defaults a real network of that family would run under (§8, S1/S2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ChainPreset {
    Btc,
    Bch,
    Ltc,
    Doge,
    Eth2,
    Chia,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum AttackArg {
    Selfish,
    DoubleSpend,
    Eclipse,
}

/// Discrete-event blockchain network simulator.
#[derive(Debug, Parser)]
#[command(name = "chain-sim", version, about)]
pub struct Cli {
    /// Load a YAML configuration file; CLI flags override its values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Chain preset supplying economics/consensus defaults.
    #[arg(long, value_enum)]
    pub chain: Option<ChainPreset>,

    /// Terminate after this many blocks.
    #[arg(long)]
    pub blocks: Option<u64>,

    /// Terminate after this many simulated years.
    #[arg(long)]
    pub years: Option<f64>,

    /// Target mean seconds between blocks.
    #[arg(long)]
    pub blocktime: Option<f64>,

    /// Number of producers (miners/validators/farmers).
    #[arg(long)]
    pub miners: Option<u64>,

    /// Per-producer capacity (hashrate, stake, or space).
    #[arg(long)]
    pub hashrate: Option<f64>,

    /// Number of peer-topology nodes.
    #[arg(long)]
    pub nodes: Option<u64>,

    /// Target per-node peer degree.
    #[arg(long)]
    pub neighbors: Option<u64>,

    /// Maximum transactions per block.
    #[arg(long)]
    pub blocksize: Option<u32>,

    /// Number of transaction-emitting wallets.
    #[arg(long)]
    pub wallets: Option<u64>,

    /// Transactions emitted per wallet over the run.
    #[arg(long)]
    pub transactions_per_wallet: Option<u32>,

    /// Seconds between a wallet's transaction emissions.
    #[arg(long)]
    pub interval: Option<f64>,

    /// RNG seed; identical seed + config reproduces an identical run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit a summary record and checkpoint every this many blocks.
    #[arg(long)]
    pub print_interval: Option<u64>,

    /// Verbose (debug-level) logging.
    #[arg(long)]
    pub debug: bool,

    /// Adversarial scenario to layer onto the run.
    #[arg(long, value_enum)]
    pub attack: Option<AttackArg>,

    /// Attacker's share of total capacity, a fraction in [0, 1].
    #[arg(long)]
    pub attacker_hashrate: Option<f64>,

    /// Selfish mining's γ; defaults to `attacker_hashrate` when unset (§9).
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Confirmation depth the double-spend attack targets.
    #[arg(long)]
    pub confirmations: Option<u32>,

    /// Number of nodes the eclipse attack isolates.
    #[arg(long)]
    pub victim_nodes: Option<u64>,

    /// Write the final metrics record as JSON to this path.
    #[arg(long, value_name = "FILE")]
    pub export_metrics: Option<String>,

    /// Write a checkpoint to this path every `print_interval` blocks.
    #[arg(long, value_name = "FILE")]
    pub checkpoint: Option<String>,

    /// Resume a run from a previously written checkpoint.
    #[arg(long, value_name = "FILE")]
    pub resume: Option<String>,
}
