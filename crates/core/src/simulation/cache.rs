//! Bounded cache of simulated frame sequences
//!
//! Seeded scenarios are deterministic, so a repeated request (several occupants
//! routing against the same fire, a UI scrubbing back and forth) can reuse the
//! frames from the first run. Unseeded scenarios are always run fresh.

use super::scenario::{FireScenario, ScenarioKey};
use crate::error::Result;
use crate::grid::HazardMask;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// Frame sequences shared between the cache and its callers.
pub type Frames = Arc<[HazardMask]>;

/// FIFO-evicting cache keyed by seeded scenario.
#[derive(Debug, Default)]
pub struct FrameCache {
    entries: FxHashMap<ScenarioKey, Frames>,
    order: VecDeque<ScenarioKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl FrameCache {
    /// Create a cache holding at most `capacity` scenarios. Zero disables caching.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Return cached frames for `scenario`, running it on a miss.
    ///
    /// # Errors
    ///
    /// Propagates the scenario's run error; failures are not cached.
    pub fn get_or_run(&mut self, scenario: &FireScenario) -> Result<Frames> {
        let Some(key) = scenario.key() else {
            return Ok(scenario.run()?.into());
        };

        if let Some(frames) = self.entries.get(&key) {
            self.hits += 1;
            debug!("Frame cache hit for {:?}", key);
            return Ok(Arc::clone(frames));
        }

        self.misses += 1;
        let frames: Frames = scenario.run()?.into();
        if self.capacity > 0 {
            if self.entries.len() >= self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                    debug!("Frame cache evicted {:?}", oldest);
                }
            }
            self.entries.insert(key, Arc::clone(&frames));
            self.order.push_back(key);
        }
        Ok(frames)
    }

    /// Number of cached scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    #[must_use]
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Coordinate, GridShape};

    fn scenario(seed: u64) -> FireScenario {
        FireScenario::new(Coordinate::new(2, 2), GridShape::new(5, 5))
            .with_steps(4)
            .with_seed(seed)
    }

    #[test]
    fn test_cache_hit_shares_frames() {
        let mut cache = FrameCache::new(4);
        let first = cache.get_or_run(&scenario(1)).unwrap();
        let second = cache.get_or_run(&scenario(1)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn test_cache_eviction_is_fifo() {
        let mut cache = FrameCache::new(2);
        cache.get_or_run(&scenario(1)).unwrap();
        cache.get_or_run(&scenario(2)).unwrap();
        cache.get_or_run(&scenario(3)).unwrap();
        assert_eq!(cache.len(), 2);
        // Seed 1 was evicted, so this is a miss
        cache.get_or_run(&scenario(1)).unwrap();
        assert_eq!(cache.stats(), (0, 4));
        // Seed 3 is still resident
        cache.get_or_run(&scenario(3)).unwrap();
        assert_eq!(cache.stats(), (1, 4));
    }

    #[test]
    fn test_unseeded_scenarios_not_cached() {
        let mut cache = FrameCache::new(4);
        let unseeded = FireScenario::new(Coordinate::new(0, 0), GridShape::new(3, 3)).with_steps(3);
        let frames = cache.get_or_run(&unseeded).unwrap();
        assert_eq!(frames.len(), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), (0, 0));
    }

    #[test]
    fn test_zero_capacity_and_errors_not_cached() {
        let mut cache = FrameCache::new(0);
        cache.get_or_run(&scenario(1)).unwrap();
        assert!(cache.is_empty());

        let mut cache = FrameCache::new(2);
        assert!(cache.get_or_run(&scenario(1).with_steps(0)).is_err());
        assert!(cache.is_empty());
    }
}
