//! Trace-driven simulation.
//!
//! Provides the driver that feeds decoded branch records through a predictor
//! and scores its predictions.

pub mod simulator;

pub use simulator::{MalformedPolicy, Simulator};
