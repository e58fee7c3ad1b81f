//! Simulator: owns the active predictor and the run statistics side-by-side.
//!
//! Each record is handled in the order the hardware would: the prediction for
//! a conditional branch is taken before its outcome is revealed, scored, and
//! only then is the predictor trained with the record.

use std::io;

use tracing::{debug, warn};

use crate::bru::{BranchPredictor, BranchPredictorWrapper};
use crate::common::{ConfigError, Outcome, Result, TraceError};
use crate::config::Config;
use crate::stats::PredictionStats;
use crate::trace::BranchRecord;

/// What to do with a malformed trace line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Log a warning, count the line as skipped and continue.
    #[default]
    Skip,
    /// Stop the run and return the error.
    Abort,
}

/// Top-level simulator: predictor state + statistics.
#[derive(Debug)]
pub struct Simulator<P = BranchPredictorWrapper> {
    /// Active prediction scheme.
    predictor: P,
    /// Counts accumulated so far.
    stats: PredictionStats,
}

impl Simulator<BranchPredictorWrapper> {
    /// Creates a new simulator running the scheme selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the scheme's geometry is rejected.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let predictor = BranchPredictorWrapper::new(&config.predictor)?;
        Ok(Self::with_predictor(predictor))
    }
}

impl<P: BranchPredictor> Simulator<P> {
    /// Creates a simulator around an already-built predictor.
    pub fn with_predictor(predictor: P) -> Self {
        debug!(
            scheme = predictor.name(),
            storage_bits = predictor.storage_bits(),
            "simulator ready"
        );
        Self {
            predictor,
            stats: PredictionStats::default(),
        }
    }

    /// Processes one record.
    ///
    /// Returns the prediction for a conditional branch and `None` otherwise.
    /// The predictor is trained with every record.
    pub fn step(&mut self, record: &BranchRecord) -> Option<Outcome> {
        let prediction = record.conditional.then(|| {
            let prediction = self.predictor.predict(record.pc);
            self.stats.record(prediction == record.outcome);
            prediction
        });
        self.predictor.train(record);
        prediction
    }

    /// Drives a whole trace through the predictor.
    ///
    /// Each record goes through [`Self::step`]. `on_predict` is then called
    /// with every conditional record and the prediction made for it.
    ///
    /// # Errors
    ///
    /// Returns the trace error for an I/O failure, or for a malformed line
    /// under [`MalformedPolicy::Abort`]. Returns the error of `on_predict` if
    /// it fails.
    pub fn run<I, F>(
        &mut self,
        records: I,
        policy: MalformedPolicy,
        mut on_predict: F,
    ) -> Result<PredictionStats>
    where
        I: IntoIterator<Item = Result<BranchRecord, TraceError>>,
        F: FnMut(&BranchRecord, Outcome) -> io::Result<()>,
    {
        for item in records {
            let record = match item {
                Ok(record) => record,
                Err(TraceError::Malformed { line, reason }) if policy == MalformedPolicy::Skip => {
                    warn!(line, %reason, "skipping malformed trace record");
                    self.stats.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if let Some(prediction) = self.step(&record) {
                on_predict(&record, prediction)?;
            }
        }
        Ok(self.stats)
    }

    /// Returns the statistics accumulated so far.
    pub const fn stats(&self) -> &PredictionStats {
        &self.stats
    }

    /// Returns the active predictor.
    pub const fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Releases the predictor's tables and returns the final statistics.
    pub fn shutdown(self) -> PredictionStats {
        debug!(
            scheme = self.predictor.name(),
            branches = self.stats.branches,
            mispredictions = self.stats.mispredictions,
            skipped = self.stats.skipped,
            "simulator shut down"
        );
        self.stats
    }
}
