//! Access and eviction counters

use std::fmt;

/// Counters accumulated by a [`RecencyCache`](super::RecencyCache).
///
/// Hits and misses are counted on the lookup path only; overwrites via
/// `put` touch neither counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStats {
    /// Lookups that found their key.
    pub hits: u64,
    /// Lookups that did not.
    pub misses: u64,
    /// Entries dropped to make room for an insert.
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} evictions={} hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.evictions,
            self.hit_rate()
        )
    }
}
