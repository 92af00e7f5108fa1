//! # Mempool
//!
//! An insertion-ordered, FIFO transaction pool (§4.4). `enqueue` and the
//! front-of-queue half of `drain` are O(1); `VecDeque::drain` itself is
//! O(n) in the count removed, which is the whole point of batch removal
//! at block-assembly time.

use std::collections::VecDeque;

use sim_types::Transaction;

/// FIFO pool of pending transactions.
#[derive(Debug, Default, Clone)]
pub struct Mempool {
    queue: VecDeque<Transaction>,
}

impl Mempool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction to the tail. O(1).
    pub fn enqueue(&mut self, tx: Transaction) {
        self.queue.push_back(tx);
    }

    /// Remove up to `n` transactions from the head, in insertion order.
    /// Used at block-production time: the producer drains
    /// `min(mempool.size, blocksize)` transactions (§4.4). An empty
    /// mempool at block time is non-fatal — the block is simply produced
    /// with zero transactions (§7).
    pub fn drain(&mut self, n: usize) -> Vec<Transaction> {
        let take = n.min(self.queue.len());
        self.queue.drain(..take).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Snapshot of pending transactions, for checkpointing.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.queue.iter().copied().collect()
    }

    /// Restore a mempool from a checkpointed snapshot, preserving order.
    pub fn restore(transactions: Vec<Transaction>) -> Self {
        Self {
            queue: transactions.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: u64) -> Transaction {
        Transaction {
            id,
            wallet_id: 0,
            timestamp: id as f64,
            size: 1,
        }
    }

    #[test]
    fn enqueue_then_drain_is_fifo() {
        let mut pool = Mempool::new();
        pool.enqueue(tx(1));
        pool.enqueue(tx(2));
        pool.enqueue(tx(3));

        let drained = pool.drain(2);
        assert_eq!(drained.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn drain_more_than_available_returns_all() {
        let mut pool = Mempool::new();
        pool.enqueue(tx(1));
        let drained = pool.drain(10);
        assert_eq!(drained.len(), 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn drain_on_empty_pool_returns_empty_vec() {
        let mut pool = Mempool::new();
        assert!(pool.drain(5).is_empty());
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let mut pool = Mempool::new();
        pool.enqueue(tx(1));
        pool.enqueue(tx(2));
        let restored = Mempool::restore(pool.snapshot());
        assert_eq!(restored.len(), pool.len());
        assert_eq!(restored.snapshot(), pool.snapshot());
    }
}
