//! # Network Topology & Propagation
//!
//! Peer graph construction and BFS-based block propagation (§4.3).
//! Deliberately does not model bytes on a wire: propagation captures
//! "when does each node learn about this block," not byte-level
//! transport.

pub mod eclipse;
pub mod propagation;
pub mod topology;

pub use eclipse::{apply_eclipse, lift_eclipse};
pub use propagation::{propagate, Arrival, HopDelay};
pub use topology::build_topology;
