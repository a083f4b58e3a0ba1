//! Cache Cursors
//!
//! A [`Cursor`] is a lightweight handle to one entry of an
//! [`LruCache`](crate::LruCache), or to the `end()` position one past the largest
//! key. Cursors do not borrow the cache: every operation on them goes through the
//! cache that issued them (`get`, `advance`, `retreat`, `erase`), which checks the
//! handle before using it.
//!
//! # Invalidation
//!
//! Each entry slot carries a generation number that changes whenever the entry
//! leaves the cache, whether by `erase`, `remove`, eviction or `clear`. A cursor
//! remembers the generation it was issued with, so a cursor to a departed entry
//! is detected as [`CursorError::Stale`](crate::CursorError::Stale) even after the
//! slot has been reused by a newer entry. The `end()` cursor never goes stale.
//!
//! # Examples
//!
//! ```
//! use ordered_lru::LruCache;
//!
//! let mut cache = LruCache::new(3);
//! cache.insert(2, "b");
//! cache.insert(1, "a");
//!
//! let mut at = cache.begin();
//! assert_eq!(cache.get(at), (&1, &"a"));
//! at = cache.advance(at);
//! assert_eq!(cache.get(at), (&2, &"b"));
//! at = cache.advance(at);
//! assert_eq!(at, cache.end());
//! ```

use crate::entry::{SENTINEL, SENTINEL_GENERATION};

/// Handle to an entry of an [`LruCache`](crate::LruCache), or to its end position.
///
/// Two cursors are equal when they refer to the same entry (or both to the end).
/// A cursor to an erased entry never equals a cursor to whatever entry later
/// reuses its storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    index: usize,
    generation: u64,
}

impl Cursor {
    #[inline]
    pub(crate) fn new(index: usize, generation: u64) -> Self {
        Cursor { index, generation }
    }

    #[inline]
    pub(crate) fn end() -> Self {
        Cursor::new(SENTINEL, SENTINEL_GENERATION)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.index
    }

    #[inline]
    pub(crate) fn generation(self) -> u64 {
        self.generation
    }

    /// Returns true if this cursor is positioned at `end()`.
    #[inline]
    pub fn is_end(self) -> bool {
        self.index == SENTINEL
    }
}
