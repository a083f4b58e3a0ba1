//! Cache Configuration Module
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **No boilerplate**: No builder needed; `Default` covers the common case
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Ordered, least recently used |
//!
//! # Examples
//!
//! ```
//! use ordered_lru::config::LruCacheConfig;
//! use ordered_lru::LruCache;
//!
//! let config = LruCacheConfig { capacity: 1000 };
//! let cache: LruCache<u64, String> = LruCache::init(config);
//! assert!(cache.is_empty());
//! ```

pub mod lru;

pub use lru::LruCacheConfig;
