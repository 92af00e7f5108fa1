//! Chain state: the canonical sequence of accepted blocks plus the
//! mutable economics state (current difficulty, retarget bookkeeping)
//! that governs the next block (§3, §4.5).

use sim_mempool::Mempool;
use sim_types::{Block, ProofWitness};

use crate::difficulty::retarget;
use crate::rewards::reward_at_height;

/// Economics parameters that do not change over a run (the schedule
/// itself, as opposed to the mutable `difficulty` it produces).
#[derive(Debug, Clone, Copy)]
pub struct EconomicsSchedule {
    pub initial_reward: f64,
    pub halving_interval: Option<u64>,
    pub max_halvings: Option<u64>,
}

/// Retargeting parameters.
#[derive(Debug, Clone, Copy)]
pub struct RetargetSchedule {
    pub interval: Option<u64>,
    pub target_blocktime: f64,
}

/// The canonical chain plus the economics state that governs it.
#[derive(Debug, Clone)]
pub struct ChainState {
    blocks: Vec<Block>,
    difficulty: f64,
    economics: EconomicsSchedule,
    retarget: RetargetSchedule,
    /// Simulated timestamp of the block that last triggered a retarget
    /// (or genesis time, before the first one).
    last_retarget_timestamp: f64,
}

impl ChainState {
    pub fn new(initial_difficulty: f64, economics: EconomicsSchedule, retarget: RetargetSchedule, genesis_time: f64) -> Self {
        Self {
            blocks: Vec::new(),
            difficulty: initial_difficulty,
            economics,
            retarget,
            last_retarget_timestamp: genesis_time,
        }
    }

    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub fn height(&self) -> u64 {
        self.blocks.len() as u64
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn total_issued(&self) -> f64 {
        self.blocks.iter().map(|b| b.reward).sum()
    }

    /// Drain up to `blocksize` transactions from `mempool` and append a
    /// new block at the next height, produced by `producer_id` at
    /// `timestamp` under `proof`. Returns the appended block.
    ///
    /// Invariant: heights are dense and strictly increasing — this is
    /// the sole append path, so the invariant holds by construction.
    pub fn produce_block(
        &mut self,
        mempool: &mut Mempool,
        blocksize: u32,
        producer_id: u64,
        timestamp: f64,
        proof: ProofWitness,
    ) -> Block {
        let height = self.height();
        let parent_height = height.saturating_sub(1);
        let txs = mempool.drain(blocksize as usize);
        let reward = reward_at_height(
            height,
            self.economics.initial_reward,
            self.economics.halving_interval,
            self.economics.max_halvings,
        );
        let block = Block {
            height,
            producer_id,
            parent_height,
            timestamp,
            tx_count: txs.len(),
            reward,
            difficulty: self.difficulty,
            proof,
        };
        self.blocks.push(block.clone());
        self.maybe_retarget();
        block
    }

    /// Append an already-constructed block without re-deriving its
    /// reward, used by checkpoint restore where the block's fields are
    /// themselves the source of truth.
    pub fn append_restored(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// If a retarget interval is configured and due, recompute
    /// difficulty from the elapsed window since the last retarget.
    fn maybe_retarget(&mut self) {
        let Some(interval) = self.retarget.interval else {
            return;
        };
        if interval == 0 || self.height() % interval != 0 {
            return;
        }
        let latest = self.blocks.last().expect("just produced a block");
        let actual_window = latest.timestamp - self.last_retarget_timestamp;
        let target_window = interval as f64 * self.retarget.target_blocktime;
        self.difficulty = retarget(self.difficulty, target_window, actual_window);
        self.last_retarget_timestamp = latest.timestamp;
    }
}
