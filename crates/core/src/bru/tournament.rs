//! Tournament Branch Predictor.
//!
//! A hybrid predictor that employs a meta-predictor (choice table) to select
//! between a Global predictor indexed purely by global history and a Local
//! predictor indexed by per-PC history. This allows the predictor to adapt to
//! branches that correlate with surrounding control flow as well as branches
//! that only follow their own pattern.
//!
//! Both components are always trained. The choice table is then trained only
//! when the freshly trained components still disagree, moving toward whichever
//! one now matches the outcome.

use tracing::debug;

use super::BranchPredictor;
use super::counter::{Choice, ChoiceCounter, SaturatingCounter};
use super::history::GlobalHistory;
use super::local::LocalPredictor;
use super::table::PatternTable;
use crate::common::Outcome;
use crate::config::TournamentConfig;

/// Tournament Predictor structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TournamentPredictor {
    /// Global History Register.
    ghr: GlobalHistory,
    /// Global Pattern History Table, indexed by global history.
    global_pht: PatternTable<SaturatingCounter>,
    /// Local component (history table plus its counters).
    local: LocalPredictor,
    /// Choice table, indexed by global history.
    /// Selects between Local (SL, WL) and Global (WG, SG).
    choice_pht: PatternTable<ChoiceCounter>,
}

impl TournamentPredictor {
    /// Creates a new Tournament Predictor based on the provided configuration.
    pub fn new(config: &TournamentConfig) -> Self {
        let predictor = Self {
            ghr: GlobalHistory::new(),
            global_pht: PatternTable::new(
                "tournament global table",
                config.global_bits,
                SaturatingCounter::WeaklyNotTaken,
            ),
            local: LocalPredictor::new(config.pc_bits, config.local_hist_bits),
            choice_pht: PatternTable::new(
                "tournament choice table",
                config.choice_bits,
                ChoiceCounter::WeaklyLocal,
            ),
        };
        debug!(
            global = predictor.global_pht.len(),
            choice = predictor.choice_pht.len(),
            storage_bits = predictor.storage_bits(),
            "tournament predictor initialized"
        );
        predictor
    }

    /// Retrieves the prediction from the Global component.
    #[inline(always)]
    fn global_prediction(&self) -> Outcome {
        self.global_pht.get(self.ghr.raw() as usize).predict()
    }

    /// Retrieves the choice entry for the current global history.
    #[inline(always)]
    fn choice(&self) -> Choice {
        self.choice_pht.get(self.ghr.raw() as usize).choice()
    }

    /// Returns the global counter table.
    pub const fn global_table(&self) -> &PatternTable<SaturatingCounter> {
        &self.global_pht
    }

    /// Returns the choice table.
    pub const fn choice_table(&self) -> &PatternTable<ChoiceCounter> {
        &self.choice_pht
    }

    /// Returns the local component.
    pub const fn local(&self) -> &LocalPredictor {
        &self.local
    }

    /// Returns the global history register.
    pub const fn history(&self) -> GlobalHistory {
        self.ghr
    }
}

impl BranchPredictor for TournamentPredictor {
    fn name(&self) -> &'static str {
        "Tournament"
    }

    /// Uses the choice entry for the current global history to pick the
    /// Global or Local prediction.
    fn predict(&self, pc: u32) -> Outcome {
        match self.choice() {
            Choice::Global => self.global_prediction(),
            Choice::Local => self.local.predict(pc),
        }
    }

    /// Trains both components, then the choice entry if the trained
    /// components now disagree, then shifts the global and local histories.
    fn update(&mut self, pc: u32, outcome: Outcome) {
        let g_idx = self.ghr.raw() as usize;

        self.global_pht.get_mut(g_idx).update(outcome);
        self.local.update_table(pc, outcome);

        // Both components are read back after training.
        let global_pred = self.global_prediction();
        let local_pred = self.local.predict(pc);
        if global_pred != local_pred {
            let winner = if global_pred == outcome {
                Choice::Global
            } else {
                Choice::Local
            };
            self.choice_pht.get_mut(g_idx).update(winner);
        }

        self.ghr.push(outcome);
        self.local.shift_history(pc, outcome);
    }

    fn storage_bits(&self) -> usize {
        (self.global_pht.len() + self.choice_pht.len()) * 2 + self.local.storage_bits()
    }
}
