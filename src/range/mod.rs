//! Memoized range-sum queries over a mutable array
//!
//! Sums over 1-based inclusive intervals are memoized in a
//! [`RecencyCache`](crate::cache::RecencyCache) keyed by [`RangeKey`].
//! Point updates own the invalidation logic: every cached interval that
//! covers the updated index is removed, so a stale sum is never served.

mod query;

pub use query::{
    range_sum_cached, range_sum_uncached, update_cached, update_uncached, RangeError, RangeKey,
};
