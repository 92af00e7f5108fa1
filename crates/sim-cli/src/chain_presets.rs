//! Chain presets (§8, scenarios S1/S2): `--chain` supplies the
//! economics/consensus defaults a real network of that family runs
//! under, underneath whatever a `--config` file or CLI flags override.

use sim_types::{
    AttackConfig, ConsensusKind, ConsensusSection, Config, EconomicsConfig, MiningConfig,
    NetworkConfig, SimulationConfig, TransactionsConfig,
};

use crate::cli::ChainPreset;

/// A full, valid baseline configuration for `preset`. Every field has a
/// concrete default so a bare `--chain X` run is immediately runnable;
/// `--config`/CLI flags layer on top of this.
pub fn base_config(preset: ChainPreset) -> Config {
    let (kind, blocktime, initial_reward, halving_interval, retarget_interval) = match preset {
        ChainPreset::Btc => (ConsensusKind::Pow, 600.0, 50.0, Some(210_000), Some(2016)),
        ChainPreset::Bch => (ConsensusKind::Pow, 600.0, 6.25, Some(210_000), Some(2016)),
        ChainPreset::Ltc => (ConsensusKind::Pow, 150.0, 50.0, Some(840_000), Some(2016)),
        // Dogecoin fixed its reward to a constant after block 600,000;
        // modeled here as no halving at all (§4.5's null-interval case).
        ChainPreset::Doge => (ConsensusKind::Pow, 60.0, 10_000.0, None, None),
        ChainPreset::Eth2 => (ConsensusKind::Pos, 12.0, 2.0, None, None),
        ChainPreset::Chia => (ConsensusKind::PoSpace, 18.75, 2.0, Some(1_046_400), None),
        ChainPreset::Custom => (ConsensusKind::Pow, 600.0, 50.0, Some(210_000), Some(2016)),
    };

    Config {
        network: NetworkConfig {
            nodes: 50,
            neighbors: 8,
            propagation_delay: None,
        },
        consensus: ConsensusSection { kind },
        mining: MiningConfig {
            miners: 10,
            capacity: 100.0,
            blocktime,
            blocksize: 2000,
            difficulty: 1.0,
            retarget_interval,
        },
        economics: EconomicsConfig {
            initial_reward,
            halving_interval,
            max_halvings: None,
        },
        transactions: TransactionsConfig {
            wallets: 200,
            transactions_per_wallet: 20,
            interval: 30.0,
        },
        simulation: SimulationConfig {
            blocks: Some(1000),
            years: None,
            print_interval: 100,
            debug: false,
            seed: 0,
        },
        attack: None::<AttackConfig>,
    }
}
