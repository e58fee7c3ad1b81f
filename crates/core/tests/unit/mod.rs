//! # Unit Components
//!
//! This module organizes the tests for the predictor engine, the trace format,
//! the configuration layer, and the simulation driver.


/// Unit tests for configuration defaults, deserialization, and validation.
pub mod config;


/// Unit tests for statistics counting and report formatting.
pub mod stats;
