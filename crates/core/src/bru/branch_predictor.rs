//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every prediction scheme
//! implements. A scheme is built by its constructor (allocating and neutrally
//! biasing its tables), queried with [`BranchPredictor::predict`] before a
//! conditional branch resolves, trained with [`BranchPredictor::train`]
//! afterwards, and released when dropped.

use crate::common::Outcome;
use crate::trace::BranchRecord;

/// Trait for branch direction prediction schemes.
///
/// Callers must pair each `predict` with the `train` of the same record, in
/// that order, before moving on to the next record. Schemes index their
/// tables from the history as it stands when `predict` is called, and `train`
/// relies on that history being unchanged.
pub trait BranchPredictor {
    /// Returns the scheme name used in reports.
    fn name(&self) -> &'static str;

    /// Predicts the direction of the conditional branch at `pc`.
    ///
    /// Pure: does not modify predictor state.
    fn predict(&self, pc: u32) -> Outcome;

    /// Trains the predictor with the resolved outcome of the conditional
    /// branch at `pc`.
    ///
    /// Table updates use the same history the matching `predict` saw; history
    /// registers are shifted last.
    fn update(&mut self, pc: u32, outcome: Outcome);

    /// Returns the number of bits of predictor state.
    fn storage_bits(&self) -> usize;

    /// Trains the predictor with a decoded trace record.
    ///
    /// A no-op for non-conditional records. The target, call, return and
    /// direct fields are carried for the harness and ignored here.
    #[inline(always)]
    fn train(&mut self, record: &BranchRecord) {
        if record.conditional {
            self.update(record.pc, record.outcome);
        }
    }
}
