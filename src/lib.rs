#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Layout of an Entry
//!
//! ```text
//!                      key index (red-black tree)
//!                 ┌──────────────────────────────┐
//!                 │            [m]               │
//!                 │          /     \             │
//!                 │       [c]       [t]          │
//!                 └────────┬──────────┬──────────┘
//!                          │          │
//!   sentinel ⇄ [t] ⇄ [c] ⇄ [m] ⇄ sentinel        recency list (oldest first)
//! ```
//!
//! Every entry lives in one arena slot and carries both sets of links. The
//! sentinel slot anchors the recency list, holds the tree root in its left link,
//! and doubles as the `end()` position of ordered traversal.
//!
//! ## Quick Reference
//!
//! | Operation | Recency effect | Complexity |
//! |-----------|----------------|------------|
//! | [`LruCache::find`] | promotes on hit | O(log n) |
//! | [`LruCache::insert`] | promotes or admits, may evict one | O(log n) |
//! | [`LruCache::erase`] / [`LruCache::remove`] | none on other entries | O(log n) |
//! | [`LruCache::peek`] / [`LruCache::contains_key`] | none | O(log n) |
//! | [`LruCache::advance`] / [`LruCache::retreat`] | none | O(1) amortized |
//! | [`LruCache::iter`] | none | O(n) total |
//!
//! ## Cursors
//!
//! ```rust
//! use ordered_lru::{CursorError, LruCache};
//!
//! let mut cache = LruCache::new(2);
//! let (first, _) = cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.insert("c", 3); // "a" evicted
//!
//! assert!(!cache.is_valid(first));
//! assert_eq!(cache.try_get(first), Err(CursorError::Stale));
//!
//! let last = cache.retreat(cache.end());
//! assert_eq!(cache.get(last), (&"c", &3));
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: The cache engine and its iterators
//! - [`cursor`]: Generation-checked positions handed out by the cache
//! - [`error`]: Errors reported by the fallible cursor operations
//! - [`config`]: Configuration structure for the cache
//! - [`metrics`]: Counters for cache performance monitoring

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

/// Slot arena shared by the key index and the recency list.
///
/// Slots are addressed by index. Released slots go on a free list and get a new
/// generation, which is what lets cursors detect that their entry is gone.
mod entry;

/// Recency list threaded through the arena.
///
/// Circular and doubly linked, anchored at the sentinel, least recently used first.
mod list;

/// Red-black tree over the arena, ordered by key.
mod tree;

/// Cache configuration structures.
pub mod config;

/// Positions within a cache.
pub mod cursor;

/// Cursor errors.
pub mod error;

/// Ordered LRU cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used entry when
/// the capacity is reached, and iterates its entries in key order.
pub mod lru;

/// Cache metrics system.
///
/// Counters collected while the cache serves requests, reported through a
/// common trait.
pub mod metrics;

pub use config::LruCacheConfig;
pub use cursor::Cursor;
pub use error::CursorError;
pub use lru::{Iter, LruCache, RecencyIter};
pub use metrics::{CacheMetrics, CoreCacheMetrics, LruCacheMetrics};
