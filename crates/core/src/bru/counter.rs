//! Two-bit saturating counters.
//!
//! Every table in the engine is built from one of two 4-state cells:
//! 1. [`SaturatingCounter`] tracks a branch direction.
//! 2. [`ChoiceCounter`] tracks which component of a tournament to trust.
//!
//! Both move exactly one step per update along a total order and saturate at
//! the two ends. Because the state is an enum, an out-of-range value cannot be
//! constructed.

use crate::common::Outcome;

/// Direction counter state, ordered `StronglyNotTaken < .. < StronglyTaken`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SaturatingCounter {
    /// Predict not-taken, strong.
    StronglyNotTaken,
    /// Predict not-taken, weak.
    #[default]
    WeaklyNotTaken,
    /// Predict taken, weak.
    WeaklyTaken,
    /// Predict taken, strong.
    StronglyTaken,
}

impl SaturatingCounter {
    /// All states in order, from strongly not-taken to strongly taken.
    pub const STATES: [Self; 4] = [
        Self::StronglyNotTaken,
        Self::WeaklyNotTaken,
        Self::WeaklyTaken,
        Self::StronglyTaken,
    ];

    /// Returns the weak state biased toward `outcome`.
    #[inline(always)]
    pub const fn weak(outcome: Outcome) -> Self {
        match outcome {
            Outcome::NotTaken => Self::WeaklyNotTaken,
            Outcome::Taken => Self::WeaklyTaken,
        }
    }

    /// Returns the predicted direction.
    #[inline(always)]
    pub const fn predict(self) -> Outcome {
        match self {
            Self::StronglyNotTaken | Self::WeaklyNotTaken => Outcome::NotTaken,
            Self::WeaklyTaken | Self::StronglyTaken => Outcome::Taken,
        }
    }

    /// Returns the state one step toward `outcome`'s extreme.
    #[inline(always)]
    #[must_use]
    pub const fn updated(self, outcome: Outcome) -> Self {
        match (self, outcome) {
            (Self::StronglyNotTaken | Self::WeaklyNotTaken, Outcome::NotTaken) => {
                Self::StronglyNotTaken
            }
            (Self::WeaklyTaken, Outcome::NotTaken) => Self::WeaklyNotTaken,
            (Self::StronglyTaken, Outcome::NotTaken) => Self::WeaklyTaken,
            (Self::StronglyNotTaken, Outcome::Taken) => Self::WeaklyNotTaken,
            (Self::WeaklyNotTaken, Outcome::Taken) => Self::WeaklyTaken,
            (Self::WeaklyTaken | Self::StronglyTaken, Outcome::Taken) => Self::StronglyTaken,
        }
    }

    /// Moves the counter one step toward `outcome`'s extreme.
    #[inline(always)]
    pub const fn update(&mut self, outcome: Outcome) {
        *self = self.updated(outcome);
    }
}

/// Which component a tournament choice entry favours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Choice {
    /// Trust the local-history prediction.
    Local,
    /// Trust the global-history prediction.
    Global,
}

/// Tournament meta-predictor state, ordered `StronglyLocal < .. < StronglyGlobal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ChoiceCounter {
    /// Choose local, strong.
    StronglyLocal,
    /// Choose local, weak.
    #[default]
    WeaklyLocal,
    /// Choose global, weak.
    WeaklyGlobal,
    /// Choose global, strong.
    StronglyGlobal,
}

impl ChoiceCounter {
    /// Returns the favoured component.
    #[inline(always)]
    pub const fn choice(self) -> Choice {
        match self {
            Self::StronglyLocal | Self::WeaklyLocal => Choice::Local,
            Self::WeaklyGlobal | Self::StronglyGlobal => Choice::Global,
        }
    }

    /// Returns the state one step toward `winner`.
    #[inline(always)]
    #[must_use]
    pub const fn updated(self, winner: Choice) -> Self {
        match (self, winner) {
            (Self::StronglyLocal | Self::WeaklyLocal, Choice::Local) => Self::StronglyLocal,
            (Self::WeaklyGlobal, Choice::Local) => Self::WeaklyLocal,
            (Self::StronglyGlobal, Choice::Local) => Self::WeaklyGlobal,
            (Self::StronglyLocal, Choice::Global) => Self::WeaklyLocal,
            (Self::WeaklyLocal, Choice::Global) => Self::WeaklyGlobal,
            (Self::WeaklyGlobal | Self::StronglyGlobal, Choice::Global) => Self::StronglyGlobal,
        }
    }

    /// Moves the counter one step toward `winner`.
    #[inline(always)]
    pub const fn update(&mut self, winner: Choice) {
        *self = self.updated(winner);
    }
}
