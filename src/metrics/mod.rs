//! Cache Metrics System
//!
//! Counters maintained by the cache as it serves requests, reported through the
//! [`CacheMetrics`] trait as a `BTreeMap` so the output has a deterministic key
//! order (stable logs, reproducible comparisons between runs).
//!
//! Only `find` counts as a request. `insert` records either an insertion or a
//! duplicate, `erase`/`remove` record an erasure, and capacity pressure records
//! an eviction.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters common to every cache operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Number of `find` calls.
    pub requests: u64,

    /// Number of `find` calls that located a resident key.
    pub cache_hits: u64,

    /// Number of entries admitted by `insert`.
    pub insertions: u64,

    /// Number of `insert` calls that found the key already resident.
    pub duplicate_inserts: u64,

    /// Number of entries removed to respect the capacity bound.
    pub evictions: u64,

    /// Number of entries removed explicitly through `erase` or `remove`.
    pub erasures: u64,

    /// Current number of live entries.
    pub len: u64,

    /// Configured capacity.
    pub capacity: u64,
}

impl CoreCacheMetrics {
    /// Creates zeroed counters for a cache of the given capacity.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Records a `find` that located its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a `find` that came back empty.
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records an admitted entry.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
        self.len += 1;
    }

    /// Records an `insert` of a key that was already resident.
    pub fn record_duplicate(&mut self) {
        self.duplicate_inserts += 1;
    }

    /// Records an entry evicted for capacity.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
        self.len -= 1;
    }

    /// Records an explicitly erased entry.
    pub fn record_erasure(&mut self) {
        self.erasures += 1;
        self.len -= 1;
    }

    /// Records that every entry was dropped by `clear`.
    pub fn record_clear(&mut self) {
        self.erasures += self.len;
        self.len = 0;
    }

    /// Number of `find` calls that missed.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of `find` calls that hit, or 0.0 before any request.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of `find` calls that missed, or 0.0 before any request.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// How full the cache is, between 0.0 and 1.0. A zero-capacity cache reports 0.0.
    pub fn cache_utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.len as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a `BTreeMap` for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert(
            "duplicate_inserts".to_string(),
            self.duplicate_inserts as f64,
        );
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("erasures".to_string(), self.erasures as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        metrics.insert("len".to_string(), self.len as f64);
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("cache_utilization".to_string(), self.cache_utilization());

        if self.insertions > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.insertions as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics reporting for cache implementations.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_and_misses() {
        let mut core = CoreCacheMetrics::new(4);
        core.record_hit();
        core.record_miss();
        core.record_miss();
        assert_eq!(core.requests, 3);
        assert_eq!(core.cache_misses(), 2);
        assert!((core.hit_rate() - 1.0 / 3.0).abs() < 1e-9);
        assert!((core.miss_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_len_tracking() {
        let mut core = CoreCacheMetrics::new(2);
        core.record_insertion();
        core.record_insertion();
        assert_eq!(core.cache_utilization(), 1.0);
        core.record_eviction();
        core.record_insertion();
        core.record_erasure();
        assert_eq!(core.len, 1);
        core.record_clear();
        assert_eq!(core.len, 0);
        assert_eq!(core.erasures, 2);
        assert_eq!(core.evictions, 1);
    }

    #[test]
    fn test_empty_rates() {
        let core = CoreCacheMetrics::new(0);
        assert_eq!(core.hit_rate(), 0.0);
        assert_eq!(core.miss_rate(), 0.0);
        assert_eq!(core.cache_utilization(), 0.0);
        assert!(!core.to_btreemap().contains_key("eviction_rate"));
    }

    #[test]
    fn test_btreemap_is_sorted() {
        let mut core = CoreCacheMetrics::new(1);
        core.record_insertion();
        let map = core.to_btreemap();
        let keys: alloc::vec::Vec<&String> = map.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(map.get("eviction_rate"), Some(&0.0));
    }
}
