// Data models for cache simulation

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Parameters of a synthetic workload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadConfig {
    /// Number of requests to generate
    pub requests: usize,
    /// Number of distinct keys, `0..keys`
    pub keys: u64,
    /// Percentage of keys that form the hot set
    pub hot_percent: u8,
    /// Percentage of requests that go to the hot set
    pub hot_traffic: u8,
    /// Seed for the random number generator
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            requests: 100_000,
            keys: 10_000,
            hot_percent: 20,
            hot_traffic: 80,
            seed: 42,
        }
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Cache capacity in number of entries
    pub capacity: usize,
    /// Workload to replay
    pub workload: WorkloadConfig,
    /// Export results to this CSV file
    pub output_csv: Option<PathBuf>,
}

/// Results of a simulation run
#[derive(Debug, Clone, Default)]
pub struct SimulationResult {
    /// Cache capacity used
    pub capacity: usize,
    /// Number of requests replayed
    pub requests: usize,
    /// Number of distinct keys requested at least once
    pub unique_keys: usize,
    /// Requests answered by `find`
    pub hits: usize,
    /// Requests that fell through to `insert`
    pub misses: usize,
    /// Entries evicted for capacity
    pub evictions: u64,
    /// Entries resident when the run finished
    pub final_len: usize,
    /// Wall-clock time spent in cache operations
    pub elapsed: Duration,
}

impl SimulationResult {
    /// Calculate hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Calculate throughput in requests per second
    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.requests as f64 / secs
        } else {
            0.0
        }
    }
}

/// CSV export row for simulation results
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    pub algorithm: String,
    pub capacity: usize,
    pub requests: usize,
    pub unique_keys: usize,
    pub hits: usize,
    pub misses: usize,
    pub hit_rate: f64,
    pub evictions: u64,
    pub final_len: usize,
    pub elapsed_ms: u128,
    pub ops_per_sec: f64,
}

impl CsvResultRow {
    pub fn new(algorithm: &str, result: &SimulationResult) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            capacity: result.capacity,
            requests: result.requests,
            unique_keys: result.unique_keys,
            hits: result.hits,
            misses: result.misses,
            hit_rate: result.hit_rate(),
            evictions: result.evictions,
            final_len: result.final_len,
            elapsed_ms: result.elapsed.as_millis(),
            ops_per_sec: result.ops_per_sec(),
        }
    }
}
