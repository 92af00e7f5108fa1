//! The top-level simulation loop (§4.6): owns the scheduler, consensus
//! strategy, peer topology, mempool, chain state and (optionally) an
//! attack module, and drives them through a run. Config composition,
//! initial-state construction and subsystem wiring stay separate steps
//! collapsed into one synchronous coordinator rather than async subsystem
//! actors, since there is exactly one thread and no wall-clock waits (§5).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;

use sim_attacks::{Attack, BlockProduced, DoubleSpend, EclipseTracker, SelfishMining};
use sim_chain::{ChainState, EconomicsSchedule, RetargetSchedule};
use sim_checkpoint::{load, save, SimulationState};
use sim_consensus::{Consensus, PosConfig, PoSpaceConfig, PowConfig};
use sim_mempool::Mempool;
use sim_network::{apply_eclipse, build_topology, propagate, HopDelay};
use sim_scheduler::{Event, Scheduler};
use sim_types::{
    AttackKind, CheckpointError, Config, ConsensusKind, MetricsAccumulator, MetricsExport, Node,
    Producer, Transaction, Wallet,
};

/// Average Gregorian year length in seconds; `--years` is expressed in
/// these, matching how every chain preset's `blocktime` is itself given
/// in seconds.
const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 3600.0;

/// The running simulation: every mutable subsystem the coordinator owns,
/// plus the bookkeeping needed to emit metrics and checkpoints (§4.6).
pub struct Coordinator {
    config: Config,
    rng: StdRng,
    scheduler: Scheduler,
    consensus: Consensus,
    chain: ChainState,
    mempool: Mempool,
    nodes: Vec<Node>,
    producers: Vec<Producer>,
    wallets: Vec<Wallet>,
    metrics: MetricsAccumulator,
    attack: Option<Attack>,
    hop_delay: HopDelay,
    next_tx_id: u64,
    last_block_time: f64,
    finished: bool,
    checkpoint_path: Option<PathBuf>,
}

impl Coordinator {
    /// Build a fresh coordinator from a validated `Config` (§6 validation
    /// is the caller's responsibility; this never re-checks it).
    pub fn new(config: Config) -> Self {
        let mut rng = StdRng::seed_from_u64(config.simulation.seed);
        let mut nodes = build_topology(config.network.nodes, config.network.neighbors, &mut rng);
        let producers = build_producers(&config);
        let wallets = build_wallets(&config);
        let consensus = build_consensus(&config);
        let chain = ChainState::new(
            config.mining.difficulty,
            economics_schedule(&config),
            retarget_schedule(&config),
            0.0,
        );
        let hop_delay = match config.network.propagation_delay {
            Some(mean) if mean > 0.0 => HopDelay::Exponential { mean },
            _ => HopDelay::Instant,
        };

        let attack = config.attack.as_ref().map(|attack_cfg| match attack_cfg.kind {
            AttackKind::Selfish => {
                let gamma = attack_cfg.gamma.unwrap_or(attack_cfg.attacker_hashrate);
                Attack::Selfish(SelfishMining::new(gamma))
            }
            AttackKind::DoubleSpend => Attack::DoubleSpend(DoubleSpend::new(attack_cfg.confirmations)),
            AttackKind::Eclipse => {
                let victims: Vec<u64> = (0..attack_cfg.victim_nodes).collect();
                // The attacker relays nothing to its victims in this
                // model: total isolation, matching S6's expectation of
                // zero directly-observed honest blocks.
                apply_eclipse(&mut nodes, &victims, &[]);
                Attack::Eclipse(EclipseTracker::new(&victims))
            }
        });

        let mut coordinator = Self {
            config,
            rng,
            scheduler: Scheduler::new(),
            consensus,
            chain,
            mempool: Mempool::new(),
            nodes,
            producers,
            wallets,
            metrics: MetricsAccumulator::default(),
            attack,
            hop_delay,
            next_tx_id: 0,
            last_block_time: 0.0,
            finished: false,
            checkpoint_path: None,
        };
        coordinator.seed_initial_events();
        coordinator
    }

    /// Rebuild a coordinator from a checkpoint (§4.8). Static structure
    /// (topology, producers, wallet shapes) is a pure function of the
    /// configuration snapshot and is rebuilt from it; dynamic state
    /// (chain, mempool, per-node tips, wallet budgets, the RNG and the
    /// pending-event queue) comes from the snapshot itself.
    pub fn from_checkpoint(state: SimulationState) -> Self {
        let config = state.config;
        let mut setup_rng = StdRng::seed_from_u64(config.simulation.seed);
        let mut nodes = build_topology(config.network.nodes, config.network.neighbors, &mut setup_rng);
        let producers = build_producers(&config);
        let consensus = build_consensus(&config);

        let attack = config.attack.as_ref().map(|attack_cfg| match attack_cfg.kind {
            AttackKind::Selfish => {
                let gamma = attack_cfg.gamma.unwrap_or(attack_cfg.attacker_hashrate);
                Attack::Selfish(SelfishMining::new(gamma))
            }
            AttackKind::DoubleSpend => Attack::DoubleSpend(DoubleSpend::new(attack_cfg.confirmations)),
            AttackKind::Eclipse => {
                let victims: Vec<u64> = (0..attack_cfg.victim_nodes).collect();
                apply_eclipse(&mut nodes, &victims, &[]);
                Attack::Eclipse(EclipseTracker::new(&victims))
            }
        });

        for node in &mut nodes {
            if let Some(&height) = state.node_last_known_height.get(&node.id) {
                node.last_known_height = height;
            }
        }

        let hop_delay = match config.network.propagation_delay {
            Some(mean) if mean > 0.0 => HopDelay::Exponential { mean },
            _ => HopDelay::Instant,
        };

        // `ChainState` has no direct restore path for its private
        // retarget bookkeeping, so rebuild it block by block. The window
        // since the last retarget is lost across a checkpoint boundary —
        // treated here as starting fresh at the restored tip's
        // timestamp, which only affects the very next retarget's window
        // measurement, not chain validity.
        let last_retarget_timestamp = state.chain.last().map(|b| b.timestamp).unwrap_or(0.0);
        let mut chain = ChainState::new(
            state.current_difficulty,
            economics_schedule(&config),
            retarget_schedule(&config),
            last_retarget_timestamp,
        );
        for block in state.chain {
            chain.append_restored(block);
        }

        let last_block_time = chain.blocks().last().map(|b| b.timestamp).unwrap_or(0.0);
        let next_tx_id = state.mempool.iter().map(|tx| tx.id + 1).max().unwrap_or(0);

        let mut coordinator = Self {
            config,
            rng: state.rng,
            scheduler: Scheduler::restore(state.current_time, state.pending_events),
            consensus,
            chain,
            mempool: Mempool::restore(state.mempool),
            nodes,
            producers,
            wallets: state.wallets,
            metrics: state.metrics,
            attack,
            hop_delay,
            next_tx_id,
            last_block_time,
            finished: false,
            checkpoint_path: None,
        };
        coordinator.ensure_block_candidate_pending();
        coordinator
    }

    /// A checkpoint taken after the run already hit its block bound has
    /// `run()`'s `scheduler.clear()` behind it, so no `BlockCandidate` is
    /// pending even though `from_checkpoint` restores the queue verbatim
    /// from the snapshot. Per §4.8 ("pending deterministic events must be
    /// re-derived from chain state and configuration" when only RNG state
    /// is available), re-derive the next block candidate from the
    /// restored RNG and difficulty whenever one isn't already pending and
    /// the run has more blocks left to produce — so resuming a checkpoint
    /// cut exactly at a print interval continues exactly like one cut
    /// mid-race.
    fn ensure_block_candidate_pending(&mut self) {
        if self.termination_reached() {
            return;
        }
        let has_pending_candidate = self
            .scheduler
            .snapshot()
            .iter()
            .any(|(_, event)| matches!(event, Event::BlockCandidate { .. }));
        if has_pending_candidate {
            return;
        }
        let (producer_id, delay) =
            self.consensus
                .next_block(&mut self.rng, &self.producers, self.chain.difficulty());
        let time = self.scheduler.now() + delay;
        self.scheduler.schedule(Event::BlockCandidate { producer_id }, time);
    }

    /// Load a coordinator from a checkpoint file, refusing a schema
    /// mismatch rather than guessing (§7).
    pub fn resume_from(path: &Path) -> Result<Self, CheckpointError> {
        Ok(Self::from_checkpoint(load(path)?))
    }

    /// Write a checkpoint every `print_interval` blocks, in addition to
    /// the summary log line (§4.6).
    pub fn set_checkpoint_path(&mut self, path: Option<PathBuf>) {
        self.checkpoint_path = path;
    }

    fn seed_initial_events(&mut self) {
        let (producer_id, delay) =
            self.consensus
                .next_block(&mut self.rng, &self.producers, self.chain.difficulty());
        self.scheduler.schedule(Event::BlockCandidate { producer_id }, delay);

        let wallet_count = self.wallets.len().max(1) as f64;
        let interval = self.config.transactions.interval;
        for wallet in &self.wallets {
            if wallet.remaining_budget == 0 {
                continue;
            }
            let stagger = wallet.id as f64 * (interval / wallet_count);
            self.scheduler.schedule(Event::TxEmit { wallet_id: wallet.id }, stagger);
        }

        if let Some(years) = self.config.simulation.years {
            self.scheduler.schedule(Event::Terminate, years * SECONDS_PER_YEAR);
        }

        if let Some(attack_cfg) = &self.config.attack {
            if attack_cfg.kind == AttackKind::DoubleSpend {
                // Let the network warm up a few blocks before the
                // attacker arms its private fork (§4.7's `arm_time`,
                // not itself exposed on the CLI — see DESIGN.md).
                let arm_time = self.config.mining.blocktime * 5.0;
                self.scheduler.schedule(Event::AttackTick, arm_time);
            }
        }
    }

    /// Run the scheduler to completion: either termination bound reached
    /// (normal completion, §7) or the event queue drains on its own.
    pub fn run(&mut self) {
        while let Some((time, event)) = self.scheduler.pop() {
            match event {
                Event::BlockCandidate { producer_id } => self.handle_block_candidate(producer_id, time),
                Event::PropagationArrival { block_height, node_id, hops } => {
                    self.handle_propagation_arrival(block_height, node_id, hops)
                }
                Event::TxEmit { wallet_id } => self.handle_tx_emit(wallet_id, time),
                Event::AttackTick => self.handle_attack_tick(),
                Event::Terminate => self.finished = true,
            }
            if self.finished || self.termination_reached() {
                self.finished = true;
                self.scheduler.clear();
                break;
            }
        }
    }

    fn termination_reached(&self) -> bool {
        matches!(self.config.simulation.blocks, Some(target) if self.chain.height() >= target)
    }

    fn handle_block_candidate(&mut self, producer_id: u64, time: f64) {
        let producer = self
            .producers
            .iter()
            .find(|p| p.id == producer_id)
            .cloned()
            .unwrap_or_else(|| panic!("scheduled block candidate for unknown producer {producer_id}"));

        let total_capacity: f64 = self.producers.iter().map(|p| p.capacity).sum();
        let share = producer.capacity / total_capacity;
        let proof = self.consensus.proof_witness(share);

        let prev_difficulty = self.chain.difficulty();
        let block = self.chain.produce_block(
            &mut self.mempool,
            self.config.mining.blocksize,
            producer_id,
            time,
            proof,
        );
        let inter_block_time = time - self.last_block_time;
        self.last_block_time = time;
        self.metrics
            .record_block(producer_id, block.tx_count, block.reward, inter_block_time);
        if (self.chain.difficulty() - prev_difficulty).abs() > f64::EPSILON {
            self.metrics.record_retarget(self.chain.difficulty());
        }

        let node_count = self.nodes.len() as u64;
        let origin_node = producer_id % node_count;
        let arrivals = propagate(&self.nodes, origin_node, self.hop_delay, &mut self.rng);
        for arrival in &arrivals {
            self.scheduler.schedule(
                Event::PropagationArrival {
                    block_height: block.height,
                    node_id: arrival.node_id,
                    hops: arrival.hops,
                },
                time + arrival.delay_from_origin,
            );
        }
        let reached: HashSet<u64> = arrivals.iter().map(|a| a.node_id).collect();
        self.metrics.propagation_losses += node_count - reached.len() as u64;

        if let Some(attack) = &mut self.attack {
            let reached_nodes: Vec<u64> = arrivals.iter().map(|a| a.node_id).collect();
            let event = BlockProduced {
                by_attacker: producer.is_adversary,
                reached_nodes,
            };
            if let Some(action) = attack.on_block(&event, &mut self.rng) {
                tracing::debug!(height = block.height, ?action, "attack reacted to block");
            }
        }

        if self.config.simulation.print_interval > 0
            && block.height % self.config.simulation.print_interval == 0
        {
            self.print_summary();
            if let Some(path) = self.checkpoint_path.clone() {
                if let Err(err) = self.save_checkpoint(&path) {
                    tracing::warn!(error = %err, path = %path.display(), "failed to write checkpoint");
                }
            }
        }

        if !self.termination_reached() {
            let (next_producer, delay) =
                self.consensus
                    .next_block(&mut self.rng, &self.producers, self.chain.difficulty());
            self.scheduler
                .schedule(Event::BlockCandidate { producer_id: next_producer }, time + delay);
        }
    }

    fn handle_propagation_arrival(&mut self, block_height: u64, node_id: u64, hops: u64) {
        let node = &mut self.nodes[node_id as usize];
        if block_height as i64 > node.last_known_height {
            node.last_known_height = block_height as i64;
            self.metrics.record_propagation(hops);
        }
    }

    fn handle_tx_emit(&mut self, wallet_id: u64, time: f64) {
        let interval = self.config.transactions.interval;
        let Some(wallet) = self.wallets.iter_mut().find(|w| w.id == wallet_id) else {
            return;
        };
        if wallet.remaining_budget == 0 {
            return;
        }
        let tx = Transaction {
            id: self.next_tx_id,
            wallet_id,
            timestamp: time,
            size: 1,
        };
        self.next_tx_id += 1;
        self.mempool.enqueue(tx);
        wallet.remaining_budget -= 1;
        if wallet.remaining_budget > 0 {
            let next_emit = time + interval;
            wallet.next_emit = next_emit;
            self.scheduler.schedule(Event::TxEmit { wallet_id }, next_emit);
        }
    }

    fn handle_attack_tick(&mut self) {
        if let Some(Attack::DoubleSpend(ds)) = &mut self.attack {
            ds.arm();
        }
    }

    fn print_summary(&self) {
        tracing::info!(
            height = self.chain.height(),
            difficulty = self.chain.difficulty(),
            mean_block_time = self.metrics.mean_block_time(),
            coins_issued = self.chain.total_issued(),
            "simulation progress"
        );
    }

    /// A checkpointable snapshot of the run's full state (§3, §4.8).
    pub fn snapshot(&self) -> SimulationState {
        let node_last_known_height = self.nodes.iter().map(|n| (n.id, n.last_known_height)).collect();
        SimulationState::new(
            self.config.simulation.seed,
            self.rng.clone(),
            self.scheduler.now(),
            self.chain.blocks().to_vec(),
            self.chain.difficulty(),
            self.mempool.snapshot(),
            node_last_known_height,
            self.wallets.clone(),
            self.metrics.clone(),
            self.scheduler.snapshot(),
            self.config.clone(),
        )
    }

    fn save_checkpoint(&self, path: &Path) -> Result<(), CheckpointError> {
        save(&self.snapshot(), path)
    }

    /// Write a checkpoint to `path` right now, outside the periodic
    /// print-interval hook (used for an explicit final checkpoint).
    pub fn checkpoint_now(&self, path: &Path) -> Result<(), CheckpointError> {
        self.save_checkpoint(path)
    }

    /// The structured metrics-export record (§6), assembled from the
    /// accumulator plus whatever attack is active.
    pub fn metrics_export(&self, chain_label: &str) -> MetricsExport {
        let attack = self.attack.as_ref().map(|attack| {
            let attacker_hashrate_share = self
                .config
                .attack
                .as_ref()
                .map(|cfg| cfg.attacker_hashrate)
                .unwrap_or(0.0);
            attack.export_metrics(attacker_hashrate_share)
        });
        MetricsExport {
            seed: self.config.simulation.seed,
            chain_label: chain_label.to_string(),
            duration_seconds: self.scheduler.now(),
            blocks: self.metrics.blocks_produced,
            transactions: self.metrics.transactions_included,
            coins_issued: self.chain.total_issued(),
            mean_block_time: self.metrics.mean_block_time(),
            mean_propagation_hops: self.metrics.mean_propagation_hops(),
            producer_shares: self.metrics.producer_shares(),
            difficulty_history: self.metrics.difficulty_history.clone(),
            attack,
        }
    }

    pub fn chain_height(&self) -> u64 {
        self.chain.height()
    }

    /// The canonical chain accepted so far, for external inspection
    /// (end-to-end scenario tests, tooling).
    pub fn blocks(&self) -> &[sim_types::Block] {
        self.chain.blocks()
    }
}

fn build_consensus(config: &Config) -> Consensus {
    match config.consensus.kind {
        ConsensusKind::Pow => Consensus::Pow(PowConfig {
            blocktime: config.mining.blocktime,
        }),
        ConsensusKind::Pos => Consensus::Pos(PosConfig {
            blocktime: config.mining.blocktime,
            jitter: 0.0,
        }),
        ConsensusKind::PoSpace => Consensus::PoSpace(PoSpaceConfig {
            target_blocktime: config.mining.blocktime,
        }),
    }
}

fn economics_schedule(config: &Config) -> EconomicsSchedule {
    EconomicsSchedule {
        initial_reward: config.economics.initial_reward,
        halving_interval: config.economics.halving_interval,
        max_halvings: config.economics.max_halvings,
    }
}

fn retarget_schedule(config: &Config) -> RetargetSchedule {
    RetargetSchedule {
        interval: config.mining.retarget_interval,
        target_blocktime: config.mining.blocktime,
    }
}

/// The honest miner population plus, if an attacker-style attack is
/// configured, one additional adversary producer whose capacity is
/// sized so its share of total capacity equals `attacker_hashrate`.
/// Eclipse does not add a producer: it is a network-position attack,
/// not a mining-power one.
fn build_producers(config: &Config) -> Vec<Producer> {
    let mut producers: Vec<Producer> = (0..config.mining.miners)
        .map(|id| Producer {
            id,
            capacity: config.mining.capacity,
            is_adversary: false,
        })
        .collect();

    if let Some(attack) = &config.attack {
        let needs_producer = matches!(attack.kind, AttackKind::Selfish | AttackKind::DoubleSpend);
        if needs_producer && attack.attacker_hashrate > 0.0 {
            let honest_total: f64 = producers.iter().map(|p| p.capacity).sum();
            let fraction = attack.attacker_hashrate.min(0.999_999);
            let attacker_capacity = honest_total * fraction / (1.0 - fraction);
            producers.push(Producer {
                id: config.mining.miners,
                capacity: attacker_capacity,
                is_adversary: true,
            });
        }
    }
    producers
}

fn build_wallets(config: &Config) -> Vec<Wallet> {
    (0..config.transactions.wallets)
        .map(|id| Wallet {
            id,
            remaining_budget: config.transactions.transactions_per_wallet,
            next_emit: 0.0,
        })
        .collect()
}
