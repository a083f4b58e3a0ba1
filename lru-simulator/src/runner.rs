// Simulation runner: replays a request stream against the cache

use crate::models::SimulationResult;
use ordered_lru::LruCache;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, info};

/// Replays `requests` against a fresh cache of `capacity` entries.
///
/// Each request is a `find`; on a miss the key is inserted, as a read-through
/// cache in front of a backend would do.
pub fn run_simulation(capacity: usize, requests: &[u64]) -> SimulationResult {
    info!(capacity, requests = requests.len(), "starting simulation");

    let mut cache: LruCache<u64, u64> = LruCache::new(capacity);
    let mut hits = 0;
    let mut misses = 0;

    let start = Instant::now();
    for &key in requests {
        if cache.find(&key).is_end() {
            misses += 1;
            cache.insert(key, key);
        } else {
            hits += 1;
        }
    }
    let elapsed = start.elapsed();

    let metrics = cache.metrics_snapshot();
    debug!(
        promotions = metrics.promotions,
        insertions = metrics.core.insertions,
        "simulation counters"
    );

    let unique_keys = requests.iter().collect::<BTreeSet<_>>().len();
    let result = SimulationResult {
        capacity,
        requests: requests.len(),
        unique_keys,
        hits,
        misses,
        evictions: metrics.core.evictions,
        final_len: cache.len(),
        elapsed,
    };

    info!(
        hit_rate = result.hit_rate(),
        elapsed_secs = elapsed.as_secs_f64(),
        "simulation finished"
    );
    result
}
