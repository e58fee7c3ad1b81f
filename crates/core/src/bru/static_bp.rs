//! Static Branch Predictor.
//!
//! Implements an "Always Taken" policy for conditional branches. It owns no
//! tables and ignores training, which makes it the baseline every other scheme
//! is compared against.

use super::BranchPredictor;
use crate::common::Outcome;

/// Static Branch Predictor structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    fn name(&self) -> &'static str {
        "Static"
    }

    /// Always predicts taken.
    fn predict(&self, _pc: u32) -> Outcome {
        Outcome::Taken
    }

    /// Does not maintain any direction history.
    fn update(&mut self, _pc: u32, _outcome: Outcome) {}

    fn storage_bits(&self) -> usize {
        0
    }
}
