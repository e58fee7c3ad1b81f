//! Branch history registers.
//!
//! 1. [`GlobalHistory`] records the most recent outcomes of all conditional branches.
//! 2. [`LocalHistoryTable`] records each PC slot's own recent outcomes.
//!
//! Registers are shifted left with the newest outcome in bit 0. Consumers read
//! the low `n` bits, so outcomes older than a table's index width fall out of
//! view without any explicit truncation of the register.

use super::table::PatternTable;
use crate::common::Outcome;

/// Returns a mask covering the low `bits` bits.
#[inline(always)]
pub const fn low_mask(bits: usize) -> u64 {
    if bits >= u64::BITS as usize {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Global History Register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GlobalHistory {
    bits: u64,
}

impl GlobalHistory {
    /// Creates an empty (all not-taken) history.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Shifts `outcome` in as the newest bit.
    #[inline(always)]
    pub const fn push(&mut self, outcome: Outcome) {
        self.bits = (self.bits << 1) | outcome.bit();
    }

    /// Returns the newest `bits` outcomes, newest in bit 0.
    #[inline(always)]
    pub const fn low(&self, bits: usize) -> u64 {
        self.bits & low_mask(bits)
    }

    /// Returns the raw register.
    pub const fn raw(&self) -> u64 {
        self.bits
    }
}

/// Per-PC local history registers.
///
/// Indexed by the low `pc_bits` of the PC. PCs sharing those bits share a
/// register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalHistoryTable {
    /// One history register per PC slot.
    registers: PatternTable<u32>,
    /// Number of outcomes each register keeps.
    history_bits: usize,
}

impl LocalHistoryTable {
    /// Allocates `2^pc_bits` registers of `history_bits` outcomes each.
    pub fn new(pc_bits: usize, history_bits: usize) -> Self {
        Self {
            registers: PatternTable::new("local history table", pc_bits, 0),
            history_bits,
        }
    }

    /// Returns the history register selected by `pc`.
    #[inline(always)]
    pub fn history(&self, pc: u32) -> u32 {
        self.registers.get(pc as usize)
    }

    /// Shifts `outcome` into the register selected by `pc`.
    #[inline(always)]
    pub fn push(&mut self, pc: u32, outcome: Outcome) {
        let mask = low_mask(self.history_bits) as u32;
        let reg = self.registers.get_mut(pc as usize);
        *reg = ((*reg << 1) | outcome.bit() as u32) & mask;
    }

    /// Returns the number of PC slots.
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    /// Returns `true` if there are no PC slots (never, once built).
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Returns the number of outcomes each register keeps.
    pub const fn history_bits(&self) -> usize {
        self.history_bits
    }

    /// Returns every register in slot order.
    pub fn as_slice(&self) -> &[u32] {
        self.registers.as_slice()
    }
}
