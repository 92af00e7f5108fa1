//! Concrete scenarios (§8): one test per row of the scenario table, each
//! pinned to the seed and parameters the table names.

use sim_cli::Coordinator;
use sim_types::AttackMetrics;

#[test]
fn s1_btc_100_blocks_at_seed_42() {
    let config = chain_sim_tests::btc_like(42, 100);
    let mut coordinator = Coordinator::new(config);
    coordinator.run();

    let blocks = coordinator.blocks();
    assert_eq!(blocks.len(), 100);
    for block in blocks {
        assert_eq!(block.reward, 50.0);
    }
    let total: f64 = blocks.iter().map(|b| b.reward).sum();
    assert_eq!(total, 5000.0);
}

#[test]
fn s2_doge_50_blocks_fixed_reward_at_seed_1() {
    let config = chain_sim_tests::doge_like(1, 50);
    let mut coordinator = Coordinator::new(config);
    coordinator.run();

    let blocks = coordinator.blocks();
    assert_eq!(blocks.len(), 50);
    for block in blocks {
        assert_eq!(block.reward, 10_000.0);
    }
    let total: f64 = blocks.iter().map(|b| b.reward).sum();
    assert_eq!(total, 500_000.0);
}

#[test]
fn s3_equal_hashrate_four_miners_converge_near_one_quarter() {
    let config = chain_sim_tests::equal_hashrate_pow(7, 1000, 4, 10.0);
    let mut coordinator = Coordinator::new(config);
    coordinator.run();

    let export = coordinator.metrics_export("custom");
    for (&miner, &share) in &export.producer_shares {
        assert!(
            (0.225..=0.275).contains(&share),
            "miner {miner} share {share} outside expected band"
        );
    }
}

#[test]
fn s4_selfish_attacker_share_exceeds_its_hashrate_share() {
    let config = chain_sim_tests::selfish_attack(3, 2000, 0.33);
    let mut coordinator = Coordinator::new(config);
    coordinator.run();

    match coordinator.metrics_export("custom").attack.unwrap() {
        AttackMetrics::Selfish { attacker_block_share, .. } => {
            assert!(attacker_block_share > 0.33, "share {attacker_block_share}");
        }
        other => panic!("expected Selfish metrics, got {other:?}"),
    }
}

#[test]
fn s5_double_spend_majority_attacker_succeeds_over_nine_in_ten_trials() {
    let mut attempts = 0u64;
    let mut successes = 0u64;
    for seed in 1..20u64 {
        let config = chain_sim_tests::double_spend_attack(seed, 300, 0.6, 3);
        let mut coordinator = Coordinator::new(config);
        coordinator.run();
        if let Some(AttackMetrics::DoubleSpend { attempts: a, successes: s, .. }) =
            coordinator.metrics_export("custom").attack
        {
            attempts += a;
            successes += s;
        }
    }
    assert!(attempts > 0, "no double-spend attempts armed across trials");
    let rate = successes as f64 / attempts as f64;
    assert!(rate > 0.9, "success rate {rate} over {attempts} attempts");
}

#[test]
fn s6_eclipse_victims_receive_zero_honest_blocks_directly() {
    let config = chain_sim_tests::eclipse_attack(11, 100, 2);
    let mut coordinator = Coordinator::new(config);
    coordinator.run();

    match coordinator.metrics_export("custom").attack.unwrap() {
        AttackMetrics::Eclipse { honest_blocks_seen_fraction } => {
            for (&victim, &fraction) in &honest_blocks_seen_fraction {
                assert_eq!(fraction, 0.0, "victim {victim} observed an honest block directly");
            }
        }
        other => panic!("expected Eclipse metrics, got {other:?}"),
    }
}
