//! Bounded LRU store: hash index + arena-backed intrusive recency list
//!
//! The recency list is threaded through a slot arena rather than
//! heap-allocated nodes; evicted slots are recycled through a free list,
//! so the arena never grows past the configured capacity.

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;
use tracing::trace;

use super::CacheStats;

/// Index into the slot arena.
type SlotIndex = usize;

/// Sentinel for an absent neighbor in the recency list.
const NIL: SlotIndex = usize::MAX;

/// Errors raised when configuring a cache.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must admit at least one entry.
    #[error("cache capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
}

/// One live entry: the key/value pair plus its recency-list links.
#[derive(Debug)]
struct Slot<K, V> {
    key: K,
    value: V,
    /// Neighbor toward the most-recently-used end.
    prev: SlotIndex,
    /// Neighbor toward the least-recently-used end.
    next: SlotIndex,
}

/// Bounded key→value store with least-recently-used eviction.
///
/// Both [`get`](Self::get) hits and [`put`](Self::put) promote the entry
/// to most-recently-used; inserting into a full cache evicts exactly the
/// entry whose last access is oldest. Entries that were never re-accessed
/// age out in strict insertion order.
///
/// # Examples
///
/// ```
/// use mnemosyne::RecencyCache;
///
/// let mut cache = RecencyCache::new(2)?;
/// cache.put("a", 1);
/// cache.put("b", 2);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// cache.put("c", 3); // evicts "b": "a" was read more recently
/// assert!(cache.contains(&"a"));
/// assert!(!cache.contains(&"b"));
/// # Ok::<(), mnemosyne::CacheError>(())
/// ```
#[derive(Debug)]
pub struct RecencyCache<K, V> {
    capacity: usize,
    /// Slot arena; vacant slots are `None` and listed in `free`.
    slots: Vec<Option<Slot<K, V>>>,
    free: Vec<SlotIndex>,
    /// Key → arena slot.
    index: HashMap<K, SlotIndex>,
    /// Most-recently-used entry.
    head: SlotIndex,
    /// Least-recently-used entry (eviction candidate).
    tail: SlotIndex,
    stats: CacheStats,
}

impl<K: Eq + Hash + Clone, V> RecencyCache<K, V> {
    /// Create a cache holding at most `capacity` entries.
    ///
    /// A capacity below 1 is a configuration error.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            capacity,
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: NIL,
            tail: NIL,
            stats: CacheStats::default(),
        })
    }

    /// Look up `key`, promoting it to most-recently-used on a hit.
    ///
    /// A miss leaves the recency order untouched.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key).copied() {
            Some(idx) => {
                self.move_to_front(idx);
                self.stats.hits += 1;
                self.slots[idx].as_ref().map(|slot| &slot.value)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Insert or overwrite the value for `key`, marking it most-recently-used.
    ///
    /// If the cache is full, the least-recently-used entry is evicted
    /// first, so cardinality never exceeds capacity.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&idx) = self.index.get(&key) {
            if let Some(slot) = self.slots[idx].as_mut() {
                slot.value = value;
            }
            self.move_to_front(idx);
            return;
        }

        if self.index.len() == self.capacity {
            self.evict_oldest();
        }

        let slot = Slot {
            key: key.clone(),
            value,
            prev: NIL,
            next: NIL,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(slot);
                idx
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };
        self.push_front(idx);
        self.index.insert(key, idx);
    }

    /// Remove `key` outright, returning its value.
    ///
    /// This is the invalidation entry point used by the range engine; the
    /// recency order of the surviving entries is unchanged.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.index.remove(key)?;
        self.unlink(idx);
        self.free.push(idx);
        self.slots[idx].take().map(|slot| slot.value)
    }

    /// Whether `key` is currently cached. Does not touch the recency order.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Access and eviction counters accumulated so far.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Iterate over cached keys from most- to least-recently-used.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            slots: &self.slots,
            cursor: self.head,
        }
    }

    /// Drop the entry at the least-recently-used end of the list.
    fn evict_oldest(&mut self) {
        let idx = self.tail;
        if idx == NIL {
            return;
        }
        self.unlink(idx);
        if let Some(slot) = self.slots[idx].take() {
            self.index.remove(&slot.key);
            self.free.push(idx);
            self.stats.evictions += 1;
            trace!(remaining = self.index.len(), "evicted least recently used entry");
        }
    }

    fn move_to_front(&mut self, idx: SlotIndex) {
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    /// Detach `idx` from the recency list without vacating its slot.
    fn unlink(&mut self, idx: SlotIndex) {
        let (prev, next) = match self.slots[idx].as_ref() {
            Some(slot) => (slot.prev, slot.next),
            None => return,
        };
        if prev == NIL {
            self.head = next;
        } else if let Some(slot) = self.slots[prev].as_mut() {
            slot.next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else if let Some(slot) = self.slots[next].as_mut() {
            slot.prev = prev;
        }
    }

    fn push_front(&mut self, idx: SlotIndex) {
        let old_head = self.head;
        if let Some(slot) = self.slots[idx].as_mut() {
            slot.prev = NIL;
            slot.next = old_head;
        }
        if old_head == NIL {
            self.tail = idx;
        } else if let Some(slot) = self.slots[old_head].as_mut() {
            slot.prev = idx;
        }
        self.head = idx;
    }
}

/// Iterator over cached keys, most-recently-used first.
///
/// Returned by [`RecencyCache::keys`]; walking it has no effect on the
/// recency order.
#[derive(Debug)]
pub struct Keys<'a, K, V> {
    slots: &'a [Option<Slot<K, V>>],
    cursor: SlotIndex,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let slot = self.slots[self.cursor].as_ref()?;
        self.cursor = slot.next;
        Some(&slot.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eviction_follows_recency_not_insertion() {
        let mut cache = RecencyCache::new(2).unwrap();
        cache.put(1, "x");
        cache.put(2, "y");
        assert_eq!(cache.get(&1), Some(&"x"));
        cache.put(3, "z");

        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
        assert!(cache.contains(&3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn keys_walk_from_most_recent() {
        let mut cache = RecencyCache::new(4).unwrap();
        cache.put('a', 1);
        cache.put('b', 2);
        cache.put('c', 3);
        assert_eq!(cache.get(&'a'), Some(&1));

        let order: Vec<char> = cache.keys().copied().collect();
        assert_eq!(order, vec!['a', 'c', 'b']);
    }

    #[test]
    fn evicted_slots_are_recycled() {
        let mut cache = RecencyCache::new(2).unwrap();
        for key in 0..16 {
            cache.put(key, key);
        }
        // Arena never outgrows capacity: every eviction frees a slot.
        assert!(cache.slots.len() <= 2);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 14);
    }

    #[test]
    fn remove_then_reinsert_uses_freed_slot() {
        let mut cache = RecencyCache::new(3).unwrap();
        cache.put(1, 10);
        cache.put(2, 20);
        assert_eq!(cache.remove(&1), Some(10));
        assert_eq!(cache.remove(&1), None);
        cache.put(3, 30);
        assert!(cache.slots.len() <= 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn zero_capacity_rejected() {
        let result = RecencyCache::<u32, u32>::new(0);
        assert_eq!(result.unwrap_err(), CacheError::InvalidCapacity(0));
    }
}
