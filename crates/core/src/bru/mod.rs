//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the direction prediction schemes and the structures
//! they are built from: saturating counters, power-of-two pattern tables,
//! global and local history registers, and the tagged override cache used by
//! the hybrid scheme.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait and common functionality.
pub mod branch_predictor;

/// Two-bit direction and choice counters.
pub mod counter;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Global and per-PC history registers.
pub mod history;

/// Local history base predictor with tagged override caches.
pub mod hybrid;

/// Per-PC local history predictor.
pub mod local;

/// Static branch predictor (always taken).
pub mod static_bp;

/// Dense power-of-two prediction tables.
pub mod table;

/// 2-way tagged cache with one LRU bit per set.
pub mod tagged_cache;

/// Tournament branch predictor (combines local and global predictors).
pub mod tournament;

use self::{
    gshare::GSharePredictor, hybrid::HybridPredictor, static_bp::StaticPredictor,
    tournament::TournamentPredictor,
};
use crate::common::{ConfigError, Outcome};
use crate::config::{PredictorConfig, PredictorKind};
use crate::trace::BranchRecord;

/// Enum wrapper for static dispatch of Branch Predictors.
/// This avoids vtable lookups in the per-record simulation loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BranchPredictorWrapper {
    /// Always taken.
    Static(StaticPredictor),
    /// PC XOR global history.
    GShare(GSharePredictor),
    /// Local/global tournament.
    Tournament(TournamentPredictor),
    /// Local base with tagged override caches.
    Custom(HybridPredictor),
}

impl BranchPredictorWrapper {
    /// Creates a new branch predictor wrapper based on configuration.
    ///
    /// Validates the selected scheme's geometry, then allocates and neutrally
    /// biases its tables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry fails
    /// [`PredictorConfig::validate`].
    pub fn new(config: &PredictorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(match config.kind {
            PredictorKind::Static => Self::Static(StaticPredictor::new()),
            PredictorKind::GShare => Self::GShare(GSharePredictor::new(&config.gshare)),
            PredictorKind::Tournament => {
                Self::Tournament(TournamentPredictor::new(&config.tournament))
            }
            PredictorKind::Custom => Self::Custom(HybridPredictor::new(&config.custom)),
        })
    }

    /// Returns the active scheme.
    pub const fn kind(&self) -> PredictorKind {
        match self {
            Self::Static(_) => PredictorKind::Static,
            Self::GShare(_) => PredictorKind::GShare,
            Self::Tournament(_) => PredictorKind::Tournament,
            Self::Custom(_) => PredictorKind::Custom,
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn name(&self) -> &'static str {
        match self {
            Self::Static(bp) => bp.name(),
            Self::GShare(bp) => bp.name(),
            Self::Tournament(bp) => bp.name(),
            Self::Custom(bp) => bp.name(),
        }
    }

    /// Predicts whether the conditional branch at the given PC will be taken.
    #[inline(always)]
    fn predict(&self, pc: u32) -> Outcome {
        match self {
            Self::Static(bp) => bp.predict(pc),
            Self::GShare(bp) => bp.predict(pc),
            Self::Tournament(bp) => bp.predict(pc),
            Self::Custom(bp) => bp.predict(pc),
        }
    }

    /// Updates the active scheme with the resolved outcome of a branch.
    #[inline(always)]
    fn update(&mut self, pc: u32, outcome: Outcome) {
        match self {
            Self::Static(bp) => bp.update(pc, outcome),
            Self::GShare(bp) => bp.update(pc, outcome),
            Self::Tournament(bp) => bp.update(pc, outcome),
            Self::Custom(bp) => bp.update(pc, outcome),
        }
    }

    #[inline(always)]
    fn storage_bits(&self) -> usize {
        match self {
            Self::Static(bp) => bp.storage_bits(),
            Self::GShare(bp) => bp.storage_bits(),
            Self::Tournament(bp) => bp.storage_bits(),
            Self::Custom(bp) => bp.storage_bits(),
        }
    }

    #[inline(always)]
    fn train(&mut self, record: &BranchRecord) {
        match self {
            Self::Static(bp) => bp.train(record),
            Self::GShare(bp) => bp.train(record),
            Self::Tournament(bp) => bp.train(record),
            Self::Custom(bp) => bp.train(record),
        }
    }
}
