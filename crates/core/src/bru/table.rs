//! Flat power-of-two prediction tables.
//!
//! A [`PatternTable`] is a dense `Vec` addressed by an index that is masked to
//! the table width. Callers compute indices with XOR/shift arithmetic; the
//! table only guarantees the masked index lands inside the allocation.

/// Dense table of `2^bits` entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternTable<T> {
    /// Table entries.
    entries: Vec<T>,
    /// `entries.len() - 1`.
    mask: usize,
    /// Table name used in diagnostics.
    name: &'static str,
}

impl<T: Copy> PatternTable<T> {
    /// Allocates `2^bits` entries, all set to `init`.
    ///
    /// # Panics
    ///
    /// Panics if `2^bits` does not fit in `usize`. Configuration is validated
    /// before tables are built, so reaching this is a construction bug.
    pub fn new(name: &'static str, bits: usize, init: T) -> Self {
        let size = 1usize
            .checked_shl(bits as u32)
            .filter(|_| bits < usize::BITS as usize);
        let Some(size) = size else {
            panic!("{name}: {bits} index bits cannot be allocated");
        };
        Self {
            entries: vec![init; size],
            mask: size - 1,
            name,
        }
    }

    /// Returns the entry at `index & mask`.
    #[inline(always)]
    pub fn get(&self, index: usize) -> T {
        self.entries[index & self.mask]
    }

    /// Returns a mutable reference to the entry at `index & mask`.
    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        &mut self.entries[index & self.mask]
    }
}

impl<T> PatternTable<T> {
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries (never, once built).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the index mask (`len() - 1`).
    pub const fn mask(&self) -> usize {
        self.mask
    }

    /// Returns the table name used in diagnostics.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns all entries in index order.
    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }
}
