//! Query and update operations plus the interval cache key
//!
//! Indices are 1-based and inclusive on both ends, matching the query
//! contract of the external drivers. Bounds are validated up front and
//! violations are signaled, never panicked on.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::cache::RecencyCache;

/// Inclusive 1-based interval identifying a cached range sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeKey {
    /// Left endpoint (inclusive).
    pub left: usize,
    /// Right endpoint (inclusive).
    pub right: usize,
}

impl RangeKey {
    /// Key spanning `[left, right]`.
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Whether `index` falls inside the interval.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.left <= index && index <= self.right
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.left, self.right)
    }
}

/// Errors signaled by range operations.
///
/// These are precondition violations, not recoverable runtime conditions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// Query bounds do not describe a valid 1-based subrange.
    #[error("invalid range [{left}, {right}] over {len} elements")]
    InvalidRange {
        /// Requested left endpoint.
        left: usize,
        /// Requested right endpoint.
        right: usize,
        /// Length of the queried array.
        len: usize,
    },
    /// Point-update index outside the array.
    #[error("index {index} outside array of {len} elements")]
    IndexOutOfBounds {
        /// Requested 1-based index.
        index: usize,
        /// Length of the updated array.
        len: usize,
    },
}

fn check_range(len: usize, left: usize, right: usize) -> Result<(), RangeError> {
    if left < 1 || right < left || right > len {
        return Err(RangeError::InvalidRange { left, right, len });
    }
    Ok(())
}

/// Sum of the elements at 1-based positions `left..=right`.
///
/// O(right − left + 1); requires `1 ≤ left ≤ right ≤ values.len()`.
pub fn range_sum_uncached(values: &[i64], left: usize, right: usize) -> Result<i64, RangeError> {
    check_range(values.len(), left, right)?;
    Ok(values[left - 1..right].iter().sum())
}

/// Memoized range sum.
///
/// A hit returns the stored sum without touching `values`; a miss
/// computes the sum, stores it under `(left, right)`, and returns it.
pub fn range_sum_cached(
    values: &[i64],
    left: usize,
    right: usize,
    cache: &mut RecencyCache<RangeKey, i64>,
) -> Result<i64, RangeError> {
    check_range(values.len(), left, right)?;
    let key = RangeKey::new(left, right);
    if let Some(&sum) = cache.get(&key) {
        return Ok(sum);
    }
    let sum = values[left - 1..right].iter().sum();
    cache.put(key, sum);
    Ok(sum)
}

/// Overwrite the element at 1-based `index` in place.
pub fn update_uncached(values: &mut [i64], index: usize, value: i64) -> Result<(), RangeError> {
    if index < 1 || index > values.len() {
        return Err(RangeError::IndexOutOfBounds {
            index,
            len: values.len(),
        });
    }
    values[index - 1] = value;
    Ok(())
}

/// Overwrite the element at `index`, then drop every cached sum made stale.
///
/// The sweep visits every cached key, O(cache size), and removes exactly
/// those intervals covering `index`. Surviving entries keep their recency
/// order. Updating the same index twice removes nothing on the second
/// sweep.
pub fn update_cached(
    values: &mut [i64],
    index: usize,
    value: i64,
    cache: &mut RecencyCache<RangeKey, i64>,
) -> Result<(), RangeError> {
    update_uncached(values, index, value)?;

    let stale: Vec<RangeKey> = cache.keys().filter(|key| key.contains(index)).copied().collect();
    for key in &stale {
        cache.remove(key);
    }
    if !stale.is_empty() {
        debug!(index, removed = stale.len(), "invalidated overlapping range sums");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_are_inclusive_on_both_ends() {
        let values = vec![5, 3, 8, 1];
        assert_eq!(range_sum_uncached(&values, 1, 4).unwrap(), 17);
        assert_eq!(range_sum_uncached(&values, 2, 3).unwrap(), 11);
        assert_eq!(range_sum_uncached(&values, 3, 3).unwrap(), 8);
    }

    #[test]
    fn invalid_bounds_are_signaled() {
        let values = vec![1, 2, 3];
        assert_eq!(
            range_sum_uncached(&values, 2, 1),
            Err(RangeError::InvalidRange {
                left: 2,
                right: 1,
                len: 3
            })
        );
        assert!(range_sum_uncached(&values, 0, 2).is_err());
        assert!(range_sum_uncached(&values, 1, 4).is_err());
        let mut values = values;
        assert_eq!(
            update_uncached(&mut values, 0, 9),
            Err(RangeError::IndexOutOfBounds { index: 0, len: 3 })
        );
        assert!(update_uncached(&mut values, 4, 9).is_err());
    }

    #[test]
    fn hit_skips_recomputation() {
        let mut values = vec![1, 2, 3, 4];
        let mut cache = RecencyCache::new(8).unwrap();
        assert_eq!(range_sum_cached(&values, 1, 2, &mut cache).unwrap(), 3);

        // Mutate behind the cache's back: the stored sum is served as-is,
        // invalidation is update_cached's job.
        values[0] = 100;
        assert_eq!(range_sum_cached(&values, 1, 2, &mut cache).unwrap(), 3);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn update_sweeps_only_covering_intervals() {
        let mut values = vec![1, 2, 3, 4, 5, 6];
        let mut cache = RecencyCache::new(8).unwrap();
        range_sum_cached(&values, 1, 2, &mut cache).unwrap();
        range_sum_cached(&values, 2, 5, &mut cache).unwrap();
        range_sum_cached(&values, 5, 6, &mut cache).unwrap();

        update_cached(&mut values, 4, 40, &mut cache).unwrap();

        assert!(cache.contains(&RangeKey::new(1, 2)));
        assert!(!cache.contains(&RangeKey::new(2, 5)));
        assert!(cache.contains(&RangeKey::new(5, 6)));
        assert_eq!(range_sum_cached(&values, 2, 5, &mut cache).unwrap(), 2 + 3 + 40 + 5);
    }
}
