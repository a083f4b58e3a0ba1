use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lru_simulator::generator::TrafficGenerator;
use lru_simulator::models::{SimulationConfig, WorkloadConfig};
use lru_simulator::{repl, runner, stats};
use ordered_lru::config::LruCacheConfig;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Ordered LRU cache driver and simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Read `key value` lines from stdin, insert each and print the cache
    Repl {
        /// Cache capacity (number of entries)
        #[arg(short, long, default_value_t = LruCacheConfig::default().capacity)]
        capacity: usize,
    },

    /// Replay a synthetic hot-set workload and report hit rates
    Simulate {
        /// Cache capacity (number of entries)
        #[arg(short, long, default_value = "1000")]
        capacity: usize,

        /// Number of requests to generate
        #[arg(long, default_value = "100000")]
        requests: usize,

        /// Number of distinct keys
        #[arg(long, default_value = "10000")]
        keys: u64,

        /// Percentage of keys that are hot (default: 20%)
        #[arg(long, default_value = "20")]
        hot_percent: u8,

        /// Percentage of traffic that goes to hot keys (default: 80%)
        #[arg(long, default_value = "80")]
        hot_traffic: u8,

        /// Random seed, for reproducible runs
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Repl { capacity } => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let inserted = repl::run(capacity, stdin.lock(), stdout.lock())?;
            info!(inserted, "input exhausted");
            Ok(())
        }

        Commands::Simulate {
            capacity,
            requests,
            keys,
            hot_percent,
            hot_traffic,
            seed,
            output_csv,
        } => run_simulator(SimulationConfig {
            capacity,
            workload: WorkloadConfig {
                requests,
                keys,
                hot_percent,
                hot_traffic,
                seed,
            },
            output_csv,
        }),
    }
}

fn run_simulator(config: SimulationConfig) -> Result<()> {
    let generator = TrafficGenerator::new(config.workload.clone())?;
    let stream = generator.generate();
    info!(
        requests = stream.len(),
        hot_keys = generator.hot_keys(),
        "generated workload"
    );

    let result = runner::run_simulation(config.capacity, &stream);
    stats::print_summary("LRU", &result);

    if let Some(path) = &config.output_csv {
        stats::export_csv(path, "LRU", &result)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nResults exported to {}", path.display());
    }

    Ok(())
}
