//! LRU Cache Metrics
//!
//! Metrics specific to the ordered LRU cache.

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU metrics: the core counters plus recency bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Counters common to every cache operation.
    pub core: CoreCacheMetrics,

    /// Number of times a resident entry was moved to the most recently used
    /// position, by `find` or by a duplicate `insert`.
    pub promotions: u64,
}

impl LruCacheMetrics {
    /// Creates zeroed metrics for a cache of the given capacity.
    pub fn new(capacity: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(capacity),
            promotions: 0,
        }
    }

    /// Records a promotion to the most recently used position.
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Converts the metrics to a `BTreeMap` for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_metrics_include_promotions() {
        let mut metrics = LruCacheMetrics::new(3);
        metrics.record_promotion();
        metrics.core.record_hit();
        let map = metrics.metrics();
        assert_eq!(map.get("promotions"), Some(&1.0));
        assert_eq!(map.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.algorithm_name(), "LRU");
    }
}
