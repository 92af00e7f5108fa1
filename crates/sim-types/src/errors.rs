//! # Error Types
//!
//! Typed errors for the simulator's domain conditions. Per the error
//! handling design, these are the only vocabulary for user-facing failure:
//! the core never panics on a domain condition, only on a genuine internal
//! invariant violation (handled by `assert!`/`debug_assert!`, not here).

use thiserror::Error;

/// Configuration validation failures, fatal at startup (exit code 1).
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A numeric field that must be strictly positive was not.
    #[error("invalid config: {field} must be > 0, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// A fraction field fell outside [0, 1].
    #[error("invalid config: {field} must be within [0, 1], got {value}")]
    NotAFraction { field: &'static str, value: f64 },

    /// `neighbors` must be strictly less than `nodes`.
    #[error("invalid config: neighbors ({neighbors}) must be < nodes ({nodes})")]
    NeighborsExceedNodes { neighbors: u64, nodes: u64 },

    /// `victim_nodes` must be strictly less than `nodes`.
    #[error("invalid config: victim_nodes ({victims}) must be < nodes ({nodes})")]
    VictimsExceedNodes { victims: u64, nodes: u64 },

    /// `confirmations` must be >= 1.
    #[error("invalid config: confirmations must be >= 1, got {0}")]
    ConfirmationsTooLow(u32),

    /// A required field was missing from the loaded configuration.
    #[error("invalid config: missing required field {0}")]
    MissingField(&'static str),

    /// No termination condition was configured.
    #[error("invalid config: at least one of simulation.blocks or simulation.years must be set")]
    NoTerminationBound,
}

/// Checkpoint load/resume failures, fatal (refuse to resume rather than
/// silently drift).
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The checkpoint's schema version does not match this build's.
    #[error("checkpoint schema mismatch: found version {found}, expected {expected}")]
    SchemaMismatch { found: u32, expected: u32 },

    /// The checkpoint file could not be read or written.
    #[error("checkpoint io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The checkpoint bytes could not be decoded.
    #[error("failed to decode checkpoint: {0}")]
    Decode(String),
}

/// Producer-selection underflow: every producer has zero capacity. Fatal,
/// indicates malformed config rather than a runtime condition.
#[derive(Debug, Clone, Error)]
#[error("producer selection underflow: total capacity is zero across {count} producers")]
pub struct CapacityUnderflow {
    pub count: usize,
}
