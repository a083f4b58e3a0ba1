// Reporting for simulation results

use crate::models::{CsvResultRow, SimulationResult};
use std::path::Path;

/// Print a summary report of the simulation results
pub fn print_summary(algorithm: &str, result: &SimulationResult) {
    println!("\nCache Simulation Summary");
    println!("========================");
    println!("Algorithm:      {}", algorithm);
    println!("Capacity:       {}", result.capacity);
    println!("Total requests: {}", result.requests);
    println!("Unique keys:    {}", result.unique_keys);
    println!();
    println!(
        "{:>10} {:>10} {:>8} {:>10} {:>10} {:>10} {:>12}",
        "Hits", "Misses", "HitRate", "Evictions", "Resident", "Duration", "Ops/sec"
    );
    println!("{}", "-".repeat(78));
    println!(
        "{:>10} {:>10} {:>7.2}% {:>10} {:>10} {:>9.3}s {:>12.0}",
        result.hits,
        result.misses,
        result.hit_rate(),
        result.evictions,
        result.final_len,
        result.elapsed.as_secs_f64(),
        result.ops_per_sec()
    );
}

/// Export results to a CSV file
pub fn export_csv(path: &Path, algorithm: &str, result: &SimulationResult) -> csv::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.serialize(CsvResultRow::new(algorithm, result))?;
    writer.flush()?;
    Ok(())
}
