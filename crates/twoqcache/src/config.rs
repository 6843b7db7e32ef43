//! Cache configuration and segment sizing

use crate::error::{Error, Result};

/// Total capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 10;

const IN_FRACTION: f32 = 0.2;
const OUT_FRACTION: f32 = 0.6;
const HOT_FRACTION: f32 = 0.2;

/// Construction parameters for a [`TwoQCache`](crate::TwoQCache)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Total number of entries the cache is sized for
    pub capacity: usize,
}

impl CacheConfig {
    /// Create a config with the given total capacity
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check the config can build a cache
    pub fn validate(&self) -> Result<()> {
        if self.capacity < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "capacity must be at least 1, got {}",
                self.capacity
            )));
        }
        Ok(())
    }

    /// Segment capacities derived from the total
    pub fn capacities(&self) -> Capacities {
        Capacities::from_total(self.capacity)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Per-segment capacities, fixed for the lifetime of a cache.
///
/// Each share is rounded half-up independently, so the three values may
/// sum to one more or one less than the configured total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacities {
    /// Probationary FIFO segment
    pub in_cap: usize,
    /// Demoted FIFO segment
    pub out_cap: usize,
    /// LRU working-set segment
    pub hot_cap: usize,
}

impl Capacities {
    /// Split a total capacity 20% / 60% / 20% across In / Out / Hot
    pub fn from_total(total: usize) -> Self {
        Self {
            in_cap: share(total, IN_FRACTION),
            out_cap: share(total, OUT_FRACTION),
            hot_cap: share(total, HOT_FRACTION),
        }
    }

    /// Sum of the three segment capacities
    pub fn total(&self) -> usize {
        self.in_cap
            .saturating_add(self.out_cap)
            .saturating_add(self.hot_cap)
    }
}

fn share(total: usize, fraction: f32) -> usize {
    (total as f32 * fraction).round() as usize
}
