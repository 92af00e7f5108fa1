//! Deterministic checkpoint/resume (§4.8).
//!
//! A `SimulationState` is the sole unit of persistence: seed, RNG state,
//! current simulated time, chain, mempool, per-node tip heights, metrics,
//! the pending-event queue and the configuration snapshot that produced
//! them. Resuming re-threads the RNG and pending events exactly where
//! they left off, which is what makes `load(save(S)) == S` and
//! bit-identical continuation hold (§8, properties 8-9).

pub mod io;
pub mod state;

pub use io::{load, save};
pub use state::{SimulationState, SCHEMA_VERSION};
