//! Branch direction predictor simulator library.
//!
//! This crate implements a trace-driven branch predictor engine with the following:
//! 1. **Predictors:** Static, gshare, tournament, and a local/tagged-cache hybrid scheme.
//! 2. **Structures:** Saturating counters, pattern tables, history registers, and tagged caches.
//! 3. **Trace:** Decoding of the text branch trace format.
//! 4. **Simulation:** Predict-then-train driver, configuration, and statistics.

/// Branch prediction schemes and the tables they are built from.
pub mod bru;
/// Common types (outcome, errors).
pub mod common;
/// Simulator configuration (defaults, scheme selection, table geometry).
pub mod config;
/// Trace-driven simulation driver.
pub mod sim;
/// Prediction statistics collection and reporting.
pub mod stats;
/// Branch trace decoding.
pub mod trace;

/// Static-dispatch wrapper over every scheme; construct with `BranchPredictorWrapper::new`.
pub use crate::bru::{BranchPredictor, BranchPredictorWrapper};
/// Branch direction.
pub use crate::common::Outcome;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Trace driver; construct with `Simulator::new`.
pub use crate::sim::{MalformedPolicy, Simulator};
/// Counts produced by a run.
pub use crate::stats::PredictionStats;
/// Decoded trace record and the reader producing them.
pub use crate::trace::{BranchRecord, TraceReader};
