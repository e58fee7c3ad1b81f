//! Hybrid Tagged-Cache Branch Predictor (the "custom" scheme).
//!
//! A local history predictor supplies the base prediction. Two small tagged
//! caches keyed by PC XOR global history remember the contexts in which the
//! base is known to be wrong:
//! 1. **Taken-side cache:** consulted when the base predicts not-taken.
//! 2. **NotTaken-side cache:** consulted when the base predicts taken.
//!
//! A hit in the consulted cache overrides the base prediction; a miss leaves
//! it unchanged. Entries are only installed when the base mispredicts, so the
//! caches hold exceptions rather than a second copy of the common case.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `update()`: O(1)
//! - **Space Complexity:** O(2^L + 2^S) for L local history bits and S set bits
//! - **Best Case:** Branches that follow their own history with rare, recurring exceptions
//! - **Worst Case:** Exceptions spread over more contexts than the caches hold

use tracing::{debug, trace};

use super::BranchPredictor;
use super::counter::SaturatingCounter;
use super::history::{GlobalHistory, low_mask};
use super::local::LocalPredictor;
use super::tagged_cache::{TaggedCache, WAYS};
use crate::common::Outcome;
use crate::config::CustomConfig;

/// Bits per tagged cache way besides the tag: valid bit plus 2-bit counter.
const WAY_OVERHEAD_BITS: usize = 3;

/// Hybrid predictor structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HybridPredictor {
    /// Base local history predictor.
    base: LocalPredictor,
    /// Overrides for contexts the base predicts not-taken but resolve taken.
    taken_cache: TaggedCache,
    /// Overrides for contexts the base predicts taken but resolve not-taken.
    not_taken_cache: TaggedCache,
    /// Global History Register feeding the cache hash.
    ghr: GlobalHistory,
    /// Width of the cache hash.
    cache_history_bits: usize,
}

impl HybridPredictor {
    /// Creates a new Hybrid Predictor based on the provided configuration.
    ///
    /// # Panics
    ///
    /// Panics if `cache_set_bits` exceeds `cache_history_bits`;
    /// [`crate::config::PredictorConfig::validate`] rejects such a geometry.
    pub fn new(config: &CustomConfig) -> Self {
        assert!(
            config.cache_set_bits <= config.cache_history_bits,
            "tagged cache: {} set bits exceed the {}-bit cache index",
            config.cache_set_bits,
            config.cache_history_bits
        );
        let predictor = Self {
            base: LocalPredictor::new(config.pc_bits, config.local_hist_bits),
            taken_cache: TaggedCache::new(
                "taken-side tagged cache",
                config.cache_set_bits,
                SaturatingCounter::WeaklyTaken,
            ),
            not_taken_cache: TaggedCache::new(
                "not-taken-side tagged cache",
                config.cache_set_bits,
                SaturatingCounter::WeaklyNotTaken,
            ),
            ghr: GlobalHistory::new(),
            cache_history_bits: config.cache_history_bits,
        };
        debug!(
            sets = predictor.taken_cache.len(),
            cache_history_bits = config.cache_history_bits,
            storage_bits = predictor.storage_bits(),
            "hybrid predictor initialized"
        );
        predictor
    }

    /// Calculates the hash shared by both caches.
    #[inline(always)]
    pub const fn cache_index(&self, pc: u32) -> usize {
        let mask = low_mask(self.cache_history_bits);
        ((pc as u64 & mask) ^ self.ghr.low(self.cache_history_bits)) as usize
    }

    /// Returns the cache that can override `base`.
    #[inline(always)]
    const fn override_cache(&self, base: Outcome) -> &TaggedCache {
        match base {
            Outcome::Taken => &self.not_taken_cache,
            Outcome::NotTaken => &self.taken_cache,
        }
    }

    /// Returns the base local predictor.
    pub const fn base(&self) -> &LocalPredictor {
        &self.base
    }

    /// Returns the Taken-side cache.
    pub const fn taken_cache(&self) -> &TaggedCache {
        &self.taken_cache
    }

    /// Returns the NotTaken-side cache.
    pub const fn not_taken_cache(&self) -> &TaggedCache {
        &self.not_taken_cache
    }

    /// Returns the global history register.
    pub const fn history(&self) -> GlobalHistory {
        self.ghr
    }
}

impl BranchPredictor for HybridPredictor {
    fn name(&self) -> &'static str {
        "Custom"
    }

    /// Returns the override cache's counter on a tag hit, otherwise the base
    /// prediction.
    fn predict(&self, pc: u32) -> Outcome {
        let base = self.base.predict(pc);
        self.override_cache(base)
            .predict(self.cache_index(pc))
            .unwrap_or(base)
    }

    /// Trains the base counter, then the override cache that `predict`
    /// consulted, then shifts the global and local histories.
    fn update(&mut self, pc: u32, outcome: Outcome) {
        let base = self.base.predict(pc);
        let idx = self.cache_index(pc);

        self.base.update_table(pc, outcome);

        let (side, cache) = match base {
            Outcome::Taken => ("not-taken", &mut self.not_taken_cache),
            Outcome::NotTaken => ("taken", &mut self.taken_cache),
        };
        if let Some(way) = cache.probe(idx) {
            cache.update(idx, way, outcome);
        } else if base != outcome {
            let installed = cache.install(idx, outcome);
            trace!(pc, cache = side, index = idx, ?installed, "override installed");
        }

        self.ghr.push(outcome);
        self.base.shift_history(pc, outcome);
    }

    fn storage_bits(&self) -> usize {
        let tag_bits = self.cache_history_bits - self.taken_cache.set_bits();
        let cache_bits = |c: &TaggedCache| c.len() * (WAYS * (tag_bits + WAY_OVERHEAD_BITS) + 1);
        self.base.storage_bits()
            + cache_bits(&self.taken_cache)
            + cache_bits(&self.not_taken_cache)
            + self.cache_history_bits
    }
}
