//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts without a table indexed by the full
//! (PC, history) cross-product.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `update()`: O(1)
//! - **Space Complexity:** O(2^N) where N is the history length (17 bits = 32KB of 2-bit counters)
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Many hot branches aliasing into the same counters

use tracing::debug;

use super::BranchPredictor;
use super::counter::SaturatingCounter;
use super::history::GlobalHistory;
use super::table::PatternTable;
use crate::common::Outcome;
use crate::config::GShareConfig;

/// GShare Predictor structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes.
    ghr: GlobalHistory,
    /// Pattern History Table of 2-bit saturating counters.
    pht: PatternTable<SaturatingCounter>,
    /// Number of history bits folded into the index.
    history_bits: usize,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor with `2^history_bits` counters.
    pub fn new(config: &GShareConfig) -> Self {
        let pht = PatternTable::new(
            "gshare table",
            config.history_bits,
            SaturatingCounter::WeaklyNotTaken,
        );
        debug!(
            history_bits = config.history_bits,
            entries = pht.len(),
            "gshare predictor initialized"
        );
        Self {
            ghr: GlobalHistory::new(),
            pht,
            history_bits: config.history_bits,
        }
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// XOR of the low PC bits and the low global history bits.
    #[inline(always)]
    pub fn index(&self, pc: u32) -> usize {
        let mask = self.pht.mask();
        (pc as usize & mask) ^ (self.ghr.low(self.history_bits) as usize & mask)
    }

    /// Returns the counter table.
    pub const fn table(&self) -> &PatternTable<SaturatingCounter> {
        &self.pht
    }

    /// Returns the global history register.
    pub const fn history(&self) -> GlobalHistory {
        self.ghr
    }
}

impl BranchPredictor for GSharePredictor {
    fn name(&self) -> &'static str {
        "Gshare"
    }

    /// Returns the direction of the counter at the hashed index.
    fn predict(&self, pc: u32) -> Outcome {
        self.pht.get(self.index(pc)).predict()
    }

    /// Updates the counter at the hashed index, then shifts the outcome into
    /// the Global History Register.
    fn update(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.index(pc);
        self.pht.get_mut(idx).update(outcome);
        self.ghr.push(outcome);
    }

    fn storage_bits(&self) -> usize {
        self.pht.len() * 2 + self.history_bits
    }
}
