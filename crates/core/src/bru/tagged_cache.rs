//! Tagged Override Cache.
//!
//! A small 2-way set-associative cache of direction counters keyed by a
//! (PC, global history) hash. The hybrid scheme keeps one per direction to
//! remember the specific contexts in which its base predictor is wrong.
//!
//! The hash is split into a set index (low bits) and a tag (the remaining high
//! bits). Each set holds two ways and a single LRU bit naming the way that was
//! touched least recently.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `probe()`: O(1), two tag compares
//!   - `install()`: O(1)
//! - **Space Complexity:** O(S) where S is the number of sets
//! - **Hardware Cost:** Low - a single LRU bit per set

use tracing::trace;

use super::counter::SaturatingCounter;
use super::table::PatternTable;
use crate::common::Outcome;

/// Number of ways per set.
pub const WAYS: usize = 2;

/// An entry in a tagged cache set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaggedEntry {
    /// Indicates if this entry has ever been installed.
    pub valid: bool,
    /// The high hash bits this entry was installed for.
    pub tag: usize,
    /// Direction counter returned on a hit.
    pub counter: SaturatingCounter,
}

/// One set: two ways plus the LRU bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaggedSet {
    /// The ways of this set.
    pub ways: [TaggedEntry; WAYS],
    /// Index of the least recently used way.
    pub lru: usize,
}

impl TaggedSet {
    const fn empty(bias: SaturatingCounter) -> Self {
        let entry = TaggedEntry {
            valid: false,
            tag: 0,
            counter: bias,
        };
        Self {
            ways: [entry; WAYS],
            lru: 0,
        }
    }

    /// Marks `way` most recently used.
    #[inline(always)]
    fn touch(&mut self, way: usize) {
        self.lru = way ^ 1;
    }
}

/// What an install did to its set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Install {
    /// A way already predicting the outcome was retagged, keeping its counter.
    Reused {
        /// The retagged way.
        way: usize,
    },
    /// The LRU way was overwritten with a fresh weak counter.
    Evicted {
        /// The overwritten way.
        way: usize,
    },
}

/// 2-way tagged cache structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedCache {
    /// One entry per set.
    sets: PatternTable<TaggedSet>,
    /// Width of the set index.
    set_bits: usize,
}

impl TaggedCache {
    /// Creates a cache with `2^set_bits` sets of invalid ways.
    ///
    /// Empty ways carry `bias` as their counter. The hybrid scheme biases each
    /// cache toward the outcome it exists to supply.
    pub fn new(name: &'static str, set_bits: usize, bias: SaturatingCounter) -> Self {
        Self {
            sets: PatternTable::new(name, set_bits, TaggedSet::empty(bias)),
            set_bits,
        }
    }

    /// Splits a cache hash into `(set, tag)`.
    #[inline(always)]
    pub const fn split(&self, index: usize) -> (usize, usize) {
        (index & self.sets.mask(), index >> self.set_bits)
    }

    /// Returns the way whose tag matches `index`, if any.
    #[inline(always)]
    pub fn probe(&self, index: usize) -> Option<usize> {
        let (set, tag) = self.split(index);
        self.sets
            .get(set)
            .ways
            .iter()
            .position(|e| e.valid && e.tag == tag)
    }

    /// Returns the counter prediction on a hit, `None` on a miss.
    #[inline(always)]
    pub fn predict(&self, index: usize) -> Option<Outcome> {
        let (set, _) = self.split(index);
        self.probe(index)
            .map(|way| self.sets.get(set).ways[way].counter.predict())
    }

    /// Trains the counter of a way that hit and marks it most recently used.
    #[inline(always)]
    pub fn update(&mut self, index: usize, way: usize, outcome: Outcome) {
        let (set, _) = self.split(index);
        let set = self.sets.get_mut(set);
        set.ways[way].counter.update(outcome);
        set.touch(way);
    }

    /// Installs `index` after a base misprediction resolved as `outcome`.
    ///
    /// A way whose counter already predicts `outcome` is retagged in place; the
    /// LRU way is preferred when both qualify. Otherwise the LRU way is evicted
    /// and restarted at the weak state for `outcome`. Either way the installed
    /// way becomes most recently used.
    pub fn install(&mut self, index: usize, outcome: Outcome) -> Install {
        let (set_idx, tag) = self.split(index);
        let set = self.sets.get_mut(set_idx);
        let lru = set.lru;
        let reusable = [lru, lru ^ 1]
            .into_iter()
            .find(|&w| set.ways[w].counter.predict() == outcome);

        let result = if let Some(way) = reusable {
            let entry = &mut set.ways[way];
            entry.valid = true;
            entry.tag = tag;
            Install::Reused { way }
        } else {
            let old = set.ways[lru];
            set.ways[lru] = TaggedEntry {
                valid: true,
                tag,
                counter: SaturatingCounter::weak(outcome),
            };
            trace!(
                set = set_idx,
                way = lru,
                old_tag = old.valid.then_some(old.tag),
                new_tag = tag,
                "tagged cache evict"
            );
            Install::Evicted { way: lru }
        };

        let way = match result {
            Install::Reused { way } | Install::Evicted { way } => way,
        };
        set.touch(way);
        result
    }

    /// Returns the set at `set` (masked).
    pub fn set(&self, set: usize) -> TaggedSet {
        self.sets.get(set)
    }

    /// Returns the number of sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` if the cache has no sets (never, once built).
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Returns the width of the set index.
    pub const fn set_bits(&self) -> usize {
        self.set_bits
    }

    /// Returns every set in index order.
    pub fn as_slice(&self) -> &[TaggedSet] {
        self.sets.as_slice()
    }
}
