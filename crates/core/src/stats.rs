//! Prediction statistics collection and reporting.
//!
//! This module tracks the metrics of a trace run. It provides:
//! 1. **Counts:** Conditional branches predicted, mispredictions, and skipped trace lines.
//! 2. **Rate:** Mispredictions per thousand conditional branches.
//! 3. **Report:** The three-line summary printed at the end of a run.

use std::fmt;

/// Statistics for one simulation run.
///
/// Only conditional branches are counted; unconditional records are trained
/// (as a no-op) but never predicted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PredictionStats {
    /// Number of conditional branches predicted.
    pub branches: u64,
    /// Number of those predictions that were wrong.
    pub mispredictions: u64,
    /// Number of malformed trace lines skipped.
    pub skipped: u64,
}

impl PredictionStats {
    /// Records one conditional prediction.
    #[inline(always)]
    pub fn record(&mut self, correct: bool) {
        self.branches += 1;
        if !correct {
            self.mispredictions += 1;
        }
    }

    /// Returns mispredictions per thousand branches.
    ///
    /// Returns `0.0` when no branches were predicted.
    pub fn misprediction_rate(&self) -> f64 {
        if self.branches == 0 {
            0.0
        } else {
            1000.0 * self.mispredictions as f64 / self.branches as f64
        }
    }
}

impl fmt::Display for PredictionStats {
    /// Formats the summary in the column layout of the lab harness.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Branches:        {:>10}", self.branches)?;
        writeln!(f, "Incorrect:       {:>10}", self.mispredictions)?;
        writeln!(f, "Misprediction Rate: {:>7.3}", self.misprediction_rate())
    }
}
