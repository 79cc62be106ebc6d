//! # Self-organizing memoization structures
//!
//! Two independent designs for the same problem, avoiding recomputation
//! of expensive, repeatable results:
//!
//! 1. **Recency cache + range engine** ([`cache`], [`range`]): a bounded
//!    LRU store memoizes range sums over a mutable array; point updates
//!    invalidate exactly the cached sums they make stale.
//! 2. **Splay tree + recursive memo** ([`splay`], [`memo`]): an unbounded
//!    self-adjusting tree memoizes a recursive computation, keeping hot
//!    keys near the root instead of evicting.
//!
//! ## Usage Example
//!
//! ```
//! use mnemosyne::{range, RecencyCache};
//!
//! let mut values = vec![5, 3, 8, 1];
//! let mut cache = RecencyCache::new(64)?;
//!
//! assert_eq!(range::range_sum_cached(&values, 1, 4, &mut cache)?, 17);
//! range::update_cached(&mut values, 2, 10, &mut cache)?;
//! assert_eq!(range::range_sum_cached(&values, 1, 4, &mut cache)?, 24);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Every structure here is synchronous and single-owner: no internal
//! locking, no background work. Callers needing concurrent access must
//! serialize it around the whole instance.

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod cache;  // Bounded LRU store
pub mod range;  // Range-sum memoization and invalidation
pub mod splay;  // Self-adjusting binary search tree
pub mod memo;   // Recursive memo engine over the splay tree

// Re-exports for convenience
pub use cache::{CacheError, CacheStats, RecencyCache};
pub use memo::FibonacciMemo;
pub use range::{RangeError, RangeKey};
pub use splay::SplayTree;
