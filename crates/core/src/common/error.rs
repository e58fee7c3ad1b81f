//! Error definitions.
//!
//! The engine distinguishes two classes of failure:
//! 1. **Configuration errors:** table widths or cache geometry that cannot be built.
//! 2. **Trace errors:** I/O failures and malformed records in a branch trace.
//!
//! Invariant violations inside a built table are not represented here: they are
//! construction bugs and panic with a diagnostic naming the table.

use thiserror::Error;

/// Rejected predictor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A table index width exceeds what the engine will allocate.
    #[error("{table} uses {bits} index bits; at most {max} are supported")]
    TableTooLarge {
        /// Name of the offending table.
        table: &'static str,
        /// Requested index width.
        bits: usize,
        /// Largest accepted index width.
        max: usize,
    },

    /// The tagged-cache set index is wider than the index it is cut from.
    #[error("cache set index ({set_bits} bits) is wider than the cache history window ({history_bits} bits)")]
    CacheSetsExceedIndex {
        /// Requested set-index width.
        set_bits: usize,
        /// Width of the XOR-folded cache index.
        history_bits: usize,
    },

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure while reading a branch trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("trace read failed: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be decoded.
    #[error("malformed trace record at line {line}: {reason}")]
    Malformed {
        /// 1-based line number within the trace.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },
}

/// Top-level error for driving a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// Predictor configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace could not be read or decoded.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Opening an input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the driver.
pub type Result<T, E = Error> = std::result::Result<T, E>;
