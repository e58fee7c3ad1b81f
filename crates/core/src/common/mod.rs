//! Common types shared by every part of the simulator.
//!
//! 1. **Outcome:** the taken/not-taken direction every table trains on.
//! 2. **Error Handling:** configuration and trace error types.

/// Error types for configuration and trace handling.
pub mod error;

/// Branch outcome type.
pub mod outcome;

pub use error::{ConfigError, Error, Result, TraceError};
pub use outcome::Outcome;
