//! Local History Branch Predictor.
//!
//! Each PC slot keeps its own shift register of recent outcomes, and that
//! register indexes a table of 2-bit counters. This captures branches whose
//! behaviour repeats in their own history regardless of surrounding control
//! flow (loop exits, fixed-period patterns).
//!
//! The predictor is usable on its own and is also the local half of the
//! tournament scheme and the base of the hybrid scheme. Those schemes
//! interleave the table update and the history shift with their own state, so
//! both steps are exposed separately.

use tracing::debug;

use super::BranchPredictor;
use super::counter::SaturatingCounter;
use super::history::LocalHistoryTable;
use super::table::PatternTable;
use crate::common::Outcome;

/// Local history predictor structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalPredictor {
    /// Per-PC history registers.
    lht: LocalHistoryTable,
    /// Counters indexed by a local history value.
    pht: PatternTable<SaturatingCounter>,
}

impl LocalPredictor {
    /// Creates a predictor with `2^pc_bits` history registers of
    /// `history_bits` outcomes and `2^history_bits` counters.
    pub fn new(pc_bits: usize, history_bits: usize) -> Self {
        let lht = LocalHistoryTable::new(pc_bits, history_bits);
        let pht = PatternTable::new(
            "local table",
            history_bits,
            SaturatingCounter::WeaklyNotTaken,
        );
        debug!(
            pc_slots = lht.len(),
            counters = pht.len(),
            "local predictor initialized"
        );
        Self { lht, pht }
    }

    /// Returns the counter index for `pc`, its current local history.
    #[inline(always)]
    pub fn index(&self, pc: u32) -> usize {
        self.lht.history(pc) as usize
    }

    /// Trains the counter `pc`'s history selects, leaving the history as is.
    #[inline(always)]
    pub fn update_table(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.index(pc);
        self.pht.get_mut(idx).update(outcome);
    }

    /// Shifts `outcome` into `pc`'s history register.
    #[inline(always)]
    pub fn shift_history(&mut self, pc: u32, outcome: Outcome) {
        self.lht.push(pc, outcome);
    }

    /// Returns the counter table.
    pub const fn table(&self) -> &PatternTable<SaturatingCounter> {
        &self.pht
    }

    /// Returns the local history table.
    pub const fn histories(&self) -> &LocalHistoryTable {
        &self.lht
    }
}

impl BranchPredictor for LocalPredictor {
    fn name(&self) -> &'static str {
        "Local"
    }

    fn predict(&self, pc: u32) -> Outcome {
        self.pht.get(self.index(pc)).predict()
    }

    fn update(&mut self, pc: u32, outcome: Outcome) {
        self.update_table(pc, outcome);
        self.shift_history(pc, outcome);
    }

    fn storage_bits(&self) -> usize {
        self.pht.len() * 2 + self.lht.len() * self.lht.history_bits()
    }
}
