//! Shared config builders for the end-to-end scenario and invariant
//! tests under `tests/` — each test file is its own integration test
//! binary and only shares code through this library.

use sim_types::{
    AttackConfig, AttackKind, Config, ConsensusKind, ConsensusSection, EconomicsConfig,
    MiningConfig, NetworkConfig, SimulationConfig, TransactionsConfig,
};

/// A small, fast-to-run PoW configuration with no attack layered on,
/// overridable field by field by each test.
pub fn minimal_pow(seed: u64, blocks: u64) -> Config {
    Config {
        network: NetworkConfig {
            nodes: 20,
            neighbors: 4,
            propagation_delay: None,
        },
        consensus: ConsensusSection { kind: ConsensusKind::Pow },
        mining: MiningConfig {
            miners: 4,
            capacity: 25.0,
            blocktime: 10.0,
            blocksize: 50,
            difficulty: 1.0,
            retarget_interval: None,
        },
        economics: EconomicsConfig {
            initial_reward: 50.0,
            halving_interval: None,
            max_halvings: None,
        },
        transactions: TransactionsConfig {
            wallets: 20,
            transactions_per_wallet: 10,
            interval: 5.0,
        },
        simulation: SimulationConfig {
            blocks: Some(blocks),
            years: None,
            print_interval: 1_000_000,
            debug: false,
            seed,
        },
        attack: None,
    }
}

/// Bitcoin-shaped preset (S1): 10-minute blocks, 50-coin reward,
/// halving every 210,000 blocks.
pub fn btc_like(seed: u64, blocks: u64) -> Config {
    let mut config = minimal_pow(seed, blocks);
    config.mining.blocktime = 600.0;
    config.economics.initial_reward = 50.0;
    config.economics.halving_interval = Some(210_000);
    config
}

/// Dogecoin-shaped preset (S2): fixed 10,000-coin reward, no halving.
pub fn doge_like(seed: u64, blocks: u64) -> Config {
    let mut config = minimal_pow(seed, blocks);
    config.mining.blocktime = 60.0;
    config.economics.initial_reward = 10_000.0;
    config.economics.halving_interval = None;
    config
}

/// Equal-hashrate PoW with `miners` equal-capacity producers (S3).
pub fn equal_hashrate_pow(seed: u64, blocks: u64, miners: u64, blocktime: f64) -> Config {
    let mut config = minimal_pow(seed, blocks);
    config.mining.miners = miners;
    config.mining.capacity = 100.0 / miners as f64;
    config.mining.blocktime = blocktime;
    config
}

/// A PoW config with a selfish-mining attacker layered on (S4).
pub fn selfish_attack(seed: u64, blocks: u64, attacker_hashrate: f64) -> Config {
    let mut config = minimal_pow(seed, blocks);
    config.attack = Some(AttackConfig {
        kind: AttackKind::Selfish,
        attacker_hashrate,
        gamma: None,
        confirmations: 6,
        victim_nodes: 0,
    });
    config
}

/// A PoW config with a double-spend attacker layered on (S5).
pub fn double_spend_attack(seed: u64, blocks: u64, attacker_hashrate: f64, confirmations: u32) -> Config {
    let mut config = minimal_pow(seed, blocks);
    config.attack = Some(AttackConfig {
        kind: AttackKind::DoubleSpend,
        attacker_hashrate,
        gamma: None,
        confirmations,
        victim_nodes: 0,
    });
    config
}

/// A PoW config with an eclipse attack isolating `victim_nodes` (S6).
pub fn eclipse_attack(seed: u64, blocks: u64, victim_nodes: u64) -> Config {
    let mut config = minimal_pow(seed, blocks);
    config.network.nodes = 30;
    config.network.neighbors = 5;
    config.attack = Some(AttackConfig {
        kind: AttackKind::Eclipse,
        attacker_hashrate: 0.0,
        gamma: None,
        confirmations: 6,
        victim_nodes,
    });
    config
}
