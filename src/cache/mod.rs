//! Recency-ordered memoization cache
//!
//! A bounded key→value store that evicts the least-recently-used entry
//! once capacity is exceeded. Lookup, recency promotion, and eviction are
//! all O(1): a hash index resolves keys to slots in an arena-backed
//! doubly linked recency list.
//!
//! Invalidation is not the cache's concern: entries are
//! only ever dropped by eviction or by an explicit [`RecencyCache::remove`]
//! from the owning engine (see [`crate::range`]).

mod lru;
mod stats;

pub use lru::{CacheError, Keys, RecencyCache};
pub use stats::CacheStats;
