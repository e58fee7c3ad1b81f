//! Branch outcome type.
//!
//! A conditional branch resolves one of two ways. Every table in the engine
//! trains on an [`Outcome`], and every scheme returns one as its prediction.

use std::fmt;
use std::ops::Not;

/// Resolved (or predicted) direction of a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// The branch falls through.
    #[default]
    NotTaken,
    /// The branch jumps to its target.
    Taken,
}

impl Outcome {
    /// Returns the outcome as the single history bit shifted into a register.
    #[inline(always)]
    pub const fn bit(self) -> u64 {
        match self {
            Self::NotTaken => 0,
            Self::Taken => 1,
        }
    }

    /// Returns `true` for [`Outcome::Taken`].
    #[inline(always)]
    pub const fn is_taken(self) -> bool {
        matches!(self, Self::Taken)
    }
}

impl From<bool> for Outcome {
    fn from(taken: bool) -> Self {
        if taken { Self::Taken } else { Self::NotTaken }
    }
}

impl From<Outcome> for bool {
    fn from(outcome: Outcome) -> Self {
        outcome.is_taken()
    }
}

impl Not for Outcome {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::NotTaken => Self::Taken,
            Self::Taken => Self::NotTaken,
        }
    }
}

impl fmt::Display for Outcome {
    /// Formats the outcome the way the verbose trace driver prints it (`0`/`1`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bit())
    }
}
