//! Ordered Least Recently Used (LRU) Cache Implementation
//!
//! This module provides a bounded key-value cache that evicts the least recently
//! used entry when full, while keeping its entries sorted by key for ordered,
//! bidirectional traversal.
//!
//! # Algorithm
//!
//! Every entry is linked into two structures at once:
//!
//! - a red-black tree ordered by key, used by `find`, `insert` and ordered
//!   traversal;
//! - a circular recency list, least recently used first, used to pick the
//!   eviction victim.
//!
//! Both structures thread through the same arena slot, so an entry is never
//! copied between them. Each public operation searches the tree first, then
//! updates the entry's recency position, then (for an insert into a full cache)
//! evicts exactly one entry before admitting the new one.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - `find` / `insert` / `erase` / `remove`: O(log n)
//!   - `peek` / `contains_key`: O(log n), no recency update
//!   - `advance` / `retreat`: O(log n) worst case, O(1) amortized
//!   - Eviction: O(log n)
//!
//! - **Space Complexity**:
//!   - O(capacity). Freed slots are recycled by later inserts, so a full cache
//!     under churn does not allocate.
//!
//! # Recency Rules
//!
//! - `find` on a resident key and every `insert` (including one that finds the
//!   key already present) mark the entry most recently used.
//! - `find` on an absent key, `peek`, `contains_key`, iteration and cursor
//!   movement never change recency.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, wrap the cache
//! in a synchronization primitive such as `Mutex`; even `find` needs exclusive
//! access since it updates recency.

use crate::config::LruCacheConfig;
use crate::cursor::Cursor;
use crate::entry::{Nodes, NIL, SENTINEL};
use crate::error::CursorError;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use tracing::{debug, trace};

/// A bounded, key-ordered cache with least-recently-used eviction.
///
/// Lookups hand out [`Cursor`]s rather than references, mirroring a
/// bidirectional iterator: a cursor can be dereferenced, moved to the next or
/// previous key, or erased, always through the cache that issued it. Using a
/// cursor whose entry has since left the cache panics (or returns
/// [`CursorError::Stale`] from the `try_*` variants) instead of reading stale data.
///
/// # Examples
///
/// ```
/// use ordered_lru::LruCache;
///
/// let mut cache = LruCache::new(3);
/// cache.insert(1, "a");
/// cache.insert(2, "b");
/// cache.insert(3, "c");
///
/// // Touching 1 makes 2 the least recently used entry
/// let hit = cache.find(&1);
/// assert_eq!(cache.get(hit), (&1, &"a"));
///
/// let (_, inserted) = cache.insert(4, "d");
/// assert!(inserted);
/// assert!(cache.find(&2).is_end());
///
/// let keys: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
/// assert_eq!(keys, [1, 3, 4]);
/// ```
pub struct LruCache<K, V> {
    config: LruCacheConfig,
    nodes: Nodes<K, V>,
    len: usize,
    metrics: LruCacheMetrics,
}

impl<K, V> LruCache<K, V> {
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero yields a cache that never admits an entry.
    pub fn new(capacity: usize) -> Self {
        Self::init(LruCacheConfig { capacity })
    }

    /// Creates an empty cache from a configuration.
    pub fn init(config: LruCacheConfig) -> Self {
        LruCache {
            config,
            nodes: Nodes::with_capacity(config.capacity),
            len: 0,
            metrics: LruCacheMetrics::new(config.capacity as u64),
        }
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Typed snapshot of the cache's counters.
    #[inline]
    pub fn metrics_snapshot(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Cursor to the entry with the smallest key, or `end()` if the cache is empty.
    #[inline]
    pub fn begin(&self) -> Cursor {
        self.cursor_at(self.nodes.min())
    }

    /// Cursor one past the entry with the largest key. It never refers to an entry.
    #[inline]
    pub fn end(&self) -> Cursor {
        Cursor::end()
    }

    /// Returns true if `at` refers to a live entry of this cache or is `end()`.
    pub fn is_valid(&self, at: Cursor) -> bool {
        self.locate(at).is_ok()
    }

    /// Returns the key and value under `at`.
    ///
    /// Does not change recency.
    pub fn try_get(&self, at: Cursor) -> Result<(&K, &V), CursorError> {
        let idx = self.locate_entry(at)?;
        let (k, v) = self.nodes.kv(idx);
        Ok((k, v))
    }

    /// Returns the key and value under `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is `end()` or its entry is no longer in the cache.
    pub fn get(&self, at: Cursor) -> (&K, &V) {
        match self.try_get(at) {
            Ok(kv) => kv,
            Err(err) => panic!("invalid cursor access: {err}"),
        }
    }

    /// Returns the key and a mutable reference to the value under `at`.
    ///
    /// Does not change recency.
    pub fn try_get_mut(&mut self, at: Cursor) -> Result<(&K, &mut V), CursorError> {
        let idx = self.locate_entry(at)?;
        let (k, v) = self.nodes.kv_mut(idx);
        Ok((&*k, v))
    }

    /// Returns the key and a mutable reference to the value under `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is `end()` or its entry is no longer in the cache.
    pub fn get_mut(&mut self, at: Cursor) -> (&K, &mut V) {
        match self.try_get_mut(at) {
            Ok(kv) => kv,
            Err(err) => panic!("invalid cursor access: {err}"),
        }
    }

    /// Moves `at` to the entry with the next larger key, or to `end()` from the
    /// largest key.
    pub fn try_advance(&self, at: Cursor) -> Result<Cursor, CursorError> {
        let idx = self.locate_entry(at)?;
        Ok(self.cursor_at(self.nodes.successor(idx)))
    }

    /// Moves `at` to the entry with the next larger key, or to `end()` from the
    /// largest key.
    ///
    /// # Panics
    ///
    /// Panics if `at` is `end()` or its entry is no longer in the cache.
    pub fn advance(&self, at: Cursor) -> Cursor {
        match self.try_advance(at) {
            Ok(next) => next,
            Err(err) => panic!("invalid cursor increment: {err}"),
        }
    }

    /// Moves `at` to the entry with the next smaller key. From `end()` this is
    /// the entry with the largest key.
    pub fn try_retreat(&self, at: Cursor) -> Result<Cursor, CursorError> {
        let idx = self.locate(at)?;
        match self.nodes.predecessor(idx) {
            NIL => Err(CursorError::BeforeBegin),
            prev => Ok(self.cursor_at(prev)),
        }
    }

    /// Moves `at` to the entry with the next smaller key. From `end()` this is
    /// the entry with the largest key.
    ///
    /// # Panics
    ///
    /// Panics if `at` is `begin()`, `end()` of an empty cache, or refers to an
    /// entry that is no longer in the cache.
    pub fn retreat(&self, at: Cursor) -> Cursor {
        match self.try_retreat(at) {
            Ok(prev) => prev,
            Err(err) => panic!("invalid cursor decrement: {err}"),
        }
    }

    /// Removes the entry under `at` and returns its key and value.
    ///
    /// Every cursor to the entry becomes invalid. Other cursors are unaffected.
    pub fn try_erase(&mut self, at: Cursor) -> Result<(K, V), CursorError> {
        let idx = self.locate_entry(at)?;
        let kv = self.detach(idx);
        self.metrics.core.record_erasure();
        trace!(len = self.len, "erased entry");
        Ok(kv)
    }

    /// Removes the entry under `at` and returns its key and value.
    ///
    /// # Panics
    ///
    /// Panics if `at` is `end()` or its entry is no longer in the cache.
    pub fn erase(&mut self, at: Cursor) -> (K, V) {
        match self.try_erase(at) {
            Ok(kv) => kv,
            Err(err) => panic!("invalid cursor erase: {err}"),
        }
    }

    /// The entry that the next insertion of a new key into a full cache would evict.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.nodes.head().map(|idx| {
            let (k, v) = self.nodes.kv(idx);
            (k, v)
        })
    }

    /// The most recently used entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.nodes.tail().map(|idx| {
            let (k, v) = self.nodes.kv(idx);
            (k, v)
        })
    }

    /// Removes every entry. All cursors except `end()` become invalid.
    pub fn clear(&mut self) {
        self.nodes.release_all();
        self.len = 0;
        self.metrics.core.record_clear();
        debug!(capacity = self.config.capacity, "cleared cache");
    }

    /// Iterates over the entries in ascending key order.
    ///
    /// Does not change recency.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            front: self.nodes.min(),
            back: self.nodes.max(),
            remaining: self.len,
        }
    }

    /// Iterates over the entries from least to most recently used.
    pub fn recency_iter(&self) -> RecencyIter<'_, K, V> {
        RecencyIter {
            nodes: &self.nodes,
            next: self.nodes.head().unwrap_or(SENTINEL),
            remaining: self.len,
        }
    }

    fn cursor_at(&self, idx: usize) -> Cursor {
        Cursor::new(idx, self.nodes.generation(idx))
    }

    /// Resolves a cursor to its slot. `end()` resolves to the sentinel.
    fn locate(&self, at: Cursor) -> Result<usize, CursorError> {
        if self.nodes.is_current(at.index(), at.generation()) {
            Ok(at.index())
        } else {
            Err(CursorError::Stale)
        }
    }

    /// Resolves a cursor that must refer to a live entry.
    fn locate_entry(&self, at: Cursor) -> Result<usize, CursorError> {
        match self.locate(at)? {
            SENTINEL => Err(CursorError::End),
            idx => Ok(idx),
        }
    }

    /// Unlinks a live slot from both structures and frees it.
    fn detach(&mut self, idx: usize) -> (K, V) {
        self.nodes.remove(idx);
        self.nodes.unlink(idx);
        self.len -= 1;
        self.nodes.release(idx)
    }

    /// Evicts the least recently used entry, if any.
    fn evict(&mut self) -> Option<(K, V)> {
        let victim = self.nodes.head()?;
        let kv = self.detach(victim);
        self.metrics.core.record_eviction();
        debug!(
            len = self.len,
            capacity = self.config.capacity,
            "evicted least recently used entry"
        );
        Some(kv)
    }
}

impl<K: Ord, V> LruCache<K, V> {
    /// Looks up `key` and marks it most recently used.
    ///
    /// Returns a cursor to the entry, or `end()` if the key is absent. A miss
    /// does not change recency.
    pub fn find<Q>(&mut self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.nodes.search(key) {
            Some(idx) => {
                self.promote(idx);
                self.metrics.core.record_hit();
                self.cursor_at(idx)
            }
            None => {
                self.metrics.core.record_miss();
                self.end()
            }
        }
    }

    /// Inserts `key` with `value` unless the key is already present.
    ///
    /// - If the key is resident, its value is left untouched, the entry is marked
    ///   most recently used, and `(cursor_to_existing, false)` is returned.
    /// - Otherwise, if the cache is full, the least recently used entry is
    ///   evicted first (invalidating its cursors), and `(cursor_to_new, true)`
    ///   is returned.
    /// - A zero-capacity cache admits nothing and returns `(end(), false)`.
    pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool) {
        if let Some(idx) = self.nodes.search(&key) {
            self.promote(idx);
            self.metrics.core.record_duplicate();
            return (self.cursor_at(idx), false);
        }

        if self.config.capacity == 0 {
            debug!("zero-capacity cache rejected insert");
            return (self.end(), false);
        }

        if self.len == self.config.capacity {
            self.evict();
        }

        let idx = self.nodes.alloc(key, value);
        self.nodes.insert_unique(idx);
        self.nodes.link_at_tail(idx);
        self.len += 1;
        self.metrics.core.record_insertion();
        trace!(len = self.len, "inserted entry");
        (self.cursor_at(idx), true)
    }

    /// Removes `key` and returns its value. Does not touch the recency of other
    /// entries.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let idx = self.nodes.search(key)?;
        let (_, value) = self.detach(idx);
        self.metrics.core.record_erasure();
        trace!(len = self.len, "removed entry");
        Some(value)
    }

    /// Returns the value for `key` without changing recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.nodes.search(key).map(|idx| &self.nodes.kv(idx).1)
    }

    /// Returns true if `key` is resident, without changing recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.nodes.search(key).is_some()
    }

    fn promote(&mut self, idx: usize) {
        self.nodes.move_to_tail(idx);
        self.metrics.record_promotion();
        trace!("promoted entry to most recently used");
    }
}

impl<K, V> CacheMetrics for LruCache<K, V> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V> Default for LruCache<K, V> {
    fn default() -> Self {
        Self::init(LruCacheConfig::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of an [`LruCache`] in ascending key order.
///
/// Created by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front;
        self.front = self.nodes.successor(idx);
        self.remaining -= 1;
        let (k, v) = self.nodes.kv(idx);
        Some((k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back;
        self.back = self.nodes.predecessor(idx);
        self.remaining -= 1;
        let (k, v) = self.nodes.kv(idx);
        Some((k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Iterator over the entries of an [`LruCache`] from least to most recently used.
///
/// Created by [`LruCache::recency_iter`].
pub struct RecencyIter<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    next: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for RecencyIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.next;
        self.next = self.nodes.newer(idx);
        self.remaining -= 1;
        let (k, v) = self.nodes.kv(idx);
        Some((k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for RecencyIter<'_, K, V> {}

impl<K, V> FusedIterator for RecencyIter<'_, K, V> {}

impl<K, V> fmt::Debug for RecencyIter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyIter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
