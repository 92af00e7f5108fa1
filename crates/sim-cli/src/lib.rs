//! # Coordinator Binary — library surface
//!
//! Exposes the CLI schema, configuration composition, chain presets and
//! the run coordinator so integration tests can drive a simulation
//! without going through `main`'s process boundary.

pub mod chain_presets;
pub mod cli;
pub mod config_io;
pub mod coordinator;

pub use cli::{AttackArg, ChainPreset, Cli};
pub use config_io::compose;
pub use coordinator::Coordinator;
