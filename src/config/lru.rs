//! Configuration for the ordered LRU cache.
//!
//! # Sizing
//!
//! `capacity` is the maximum number of live entries. Each entry costs the size of
//! its key and value plus roughly 64 bytes of links and bookkeeping. Storage
//! grows as entries are admitted, with a small reservation up front, so a very
//! large capacity (even `usize::MAX`) costs nothing until it is used.
//!
//! A capacity of zero is accepted. Such a cache never admits anything: every
//! `insert` reports `inserted == false` and returns `end()`.
//!
//! # Examples
//!
//! ```
//! use ordered_lru::config::LruCacheConfig;
//! use ordered_lru::LruCache;
//!
//! let config = LruCacheConfig { capacity: 1000 };
//! let cache: LruCache<String, Vec<u8>> = LruCache::init(config);
//! assert_eq!(cache.capacity(), 1000);
//! ```

use core::fmt;

/// Configuration for an [`LruCache`](crate::LruCache).
///
/// # Fields
///
/// - `capacity`: Maximum number of entries held at once. Inserting a new key
///   into a full cache evicts the least recently used entry first.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
}

impl Default for LruCacheConfig {
    /// Three entries, the size the `repl` driver starts with.
    fn default() -> Self {
        LruCacheConfig { capacity: 3 }
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
