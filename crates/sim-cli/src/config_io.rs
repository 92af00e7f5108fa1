//! Configuration composition (§6): a `--chain` preset supplies the
//! baseline, an optional `--config` YAML file replaces it wholesale, and
//! individual CLI flags then override whatever field they name. Loading
//! YAML and merging flags are deliberately thin — the simulation engine
//! never sees a `Cli` value, only the `Config` this module produces.

use std::fs;
use std::path::Path;

use sim_types::{AttackConfig, AttackKind, Config};

use crate::chain_presets::base_config;
use crate::cli::{AttackArg, Cli, ChainPreset};

/// Build the effective `Config` for a run: chain preset, optionally
/// replaced by a YAML file, then overridden field-by-field by whichever
/// CLI flags were actually supplied.
pub fn compose(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = base_config(cli.chain.unwrap_or(ChainPreset::Custom));

    if let Some(path) = &cli.config {
        config = load_yaml(Path::new(path))?;
    }

    apply_overrides(&mut config, cli);
    Ok(config)
}

fn load_yaml(path: &Path) -> anyhow::Result<Config> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;
    let config: Config = serde_yaml::from_str(&text)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(v) = cli.blocks {
        config.simulation.blocks = Some(v);
    }
    if let Some(v) = cli.years {
        config.simulation.years = Some(v);
    }
    if let Some(v) = cli.blocktime {
        config.mining.blocktime = v;
    }
    if let Some(v) = cli.miners {
        config.mining.miners = v;
    }
    if let Some(v) = cli.hashrate {
        config.mining.capacity = v;
    }
    if let Some(v) = cli.nodes {
        config.network.nodes = v;
    }
    if let Some(v) = cli.neighbors {
        config.network.neighbors = v;
    }
    if let Some(v) = cli.blocksize {
        config.mining.blocksize = v;
    }
    if let Some(v) = cli.wallets {
        config.transactions.wallets = v;
    }
    if let Some(v) = cli.transactions_per_wallet {
        config.transactions.transactions_per_wallet = v;
    }
    if let Some(v) = cli.interval {
        config.transactions.interval = v;
    }
    if let Some(v) = cli.seed {
        config.simulation.seed = v;
    }
    if let Some(v) = cli.print_interval {
        config.simulation.print_interval = v;
    }
    if cli.debug {
        config.simulation.debug = true;
    }

    if let Some(kind) = cli.attack {
        let kind = match kind {
            AttackArg::Selfish => AttackKind::Selfish,
            AttackArg::DoubleSpend => AttackKind::DoubleSpend,
            AttackArg::Eclipse => AttackKind::Eclipse,
        };
        let mut attack = config.attack.clone().unwrap_or(AttackConfig {
            kind,
            attacker_hashrate: 0.0,
            gamma: None,
            confirmations: 6,
            victim_nodes: 0,
        });
        attack.kind = kind;
        if let Some(v) = cli.attacker_hashrate {
            attack.attacker_hashrate = v;
        }
        if let Some(v) = cli.gamma {
            attack.gamma = Some(v);
        }
        if let Some(v) = cli.confirmations {
            attack.confirmations = v;
        }
        if let Some(v) = cli.victim_nodes {
            attack.victim_nodes = v;
        }
        config.attack = Some(attack);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["chain-sim"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn chain_preset_supplies_baseline() {
        let cli = parse(&["--chain", "doge", "--blocks", "50"]);
        let config = compose(&cli).unwrap();
        assert_eq!(config.economics.initial_reward, 10_000.0);
        assert_eq!(config.simulation.blocks, Some(50));
    }

    #[test]
    fn cli_flags_override_preset_defaults() {
        let cli = parse(&["--chain", "btc", "--blocktime", "30", "--miners", "7"]);
        let config = compose(&cli).unwrap();
        assert_eq!(config.mining.blocktime, 30.0);
        assert_eq!(config.mining.miners, 7);
    }

    #[test]
    fn attack_flags_compose_into_attack_section() {
        let cli = parse(&[
            "--attack",
            "selfish",
            "--attacker-hashrate",
            "0.4",
            "--gamma",
            "0.5",
        ]);
        let config = compose(&cli).unwrap();
        let attack = config.attack.expect("attack section present");
        assert_eq!(attack.attacker_hashrate, 0.4);
        assert_eq!(attack.gamma, Some(0.5));
    }
}
