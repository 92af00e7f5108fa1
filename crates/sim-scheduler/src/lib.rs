//! # Event Scheduler
//!
//! A priority queue of `(time, sequence, Event)` entries (§4.1). `schedule`
//! is O(log n); `pop` returns the earliest entry and advances the clock.
//! Ties on identical timestamps are broken by insertion order, matching
//! §5's ordering guarantee.
//!
//! Floating-point timestamps make equality meaningless; ordering uses
//! `f64::total_cmp` over `(time, sequence)` lexicographically. A `NaN`
//! timestamp is a programming error, not a domain error, and is asserted
//! against rather than threaded through a `Result` (§7).

pub mod event;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

pub use event::Event;

/// A scheduled entry: time-ordered, with insertion sequence as tiebreak.
#[derive(Debug, Clone)]
struct ScheduledEvent {
    time: f64,
    sequence: u64,
    event: Event,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.sequence == other.sequence
    }
}
impl Eq for ScheduledEvent {}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap`, a max-heap, behaves as a min-heap on
        // (time, sequence).
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}
impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The simulation's time kernel: owns the current simulated clock and the
/// pending-event queue.
#[derive(Debug, Default)]
pub struct Scheduler {
    heap: BinaryHeap<ScheduledEvent>,
    next_sequence: u64,
    current_time: f64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time, advanced only by `pop`.
    pub fn now(&self) -> f64 {
        self.current_time
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Enqueue `event` to fire at `time`. O(log n).
    ///
    /// `time` must not be `NaN` and must not precede the current clock;
    /// both are internal invariant violations (§5, §7), not domain errors.
    pub fn schedule(&mut self, event: Event, time: f64) {
        assert!(!time.is_nan(), "scheduled event time must not be NaN");
        assert!(
            time >= self.current_time,
            "scheduled event time {time} precedes current simulated time {}",
            self.current_time
        );
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(ScheduledEvent {
            time,
            sequence,
            event,
        });
    }

    /// Pop the earliest pending event and advance the clock to its
    /// timestamp. Returns `None` when the queue is exhausted.
    pub fn pop(&mut self) -> Option<(f64, Event)> {
        let scheduled = self.heap.pop()?;
        debug_assert!(
            scheduled.time >= self.current_time,
            "scheduler popped an event with time < current simulated time"
        );
        self.current_time = scheduled.time;
        Some((scheduled.time, scheduled.event))
    }

    /// Drop all pending events past a termination point. Used once the
    /// coordinator's termination predicate fires (§5).
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// A snapshot of pending events for checkpointing: sufficient, paired
    /// with RNG state, to resume deterministically when the events are
    /// themselves deterministic (§4.8). Order is not significant; the
    /// heap is rebuilt from scratch on restore.
    pub fn snapshot(&self) -> Vec<(f64, Event)> {
        self.heap.iter().map(|e| (e.time, e.event.clone())).collect()
    }

    /// Restore a scheduler from a snapshot plus the clock it was taken at.
    pub fn restore(current_time: f64, pending: Vec<(f64, Event)>) -> Self {
        let mut scheduler = Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
            current_time,
        };
        // Preserve relative insertion order for stable tie-breaking.
        for (time, event) in pending {
            let sequence = scheduler.next_sequence;
            scheduler.next_sequence += 1;
            scheduler.heap.push(ScheduledEvent {
                time,
                sequence,
                event,
            });
        }
        scheduler
    }
}
