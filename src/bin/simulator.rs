//! Headless Difficulty Simulator
//!
//! Drives synthetic players through the difficulty engine and prints where
//! the multiplier and mastery tier settle.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulator -- --profile expert --runs 50
//!   cargo run --bin simulator -- --all-profiles --seed 42
//!   cargo run --bin simulator -- --config tuning.toml --csv series.csv

use adaptive_difficulty::core::DifficultyConfig;
use adaptive_difficulty::simulator::{compare_profiles, run_simulation, PlayerProfile, SimConfig, SimReport};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Headless difficulty simulator - synthetic players against the real engine
#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "Run synthetic players through the difficulty engine")]
struct Args {
    /// Number of runs with incrementing seeds
    #[arg(long, short = 'n', default_value_t = 100)]
    runs: u32,

    /// Ticks per run (36000 = 1 hour at 100ms ticks)
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,

    /// Game time per tick in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Player profile: novice, average, skilled, expert or improving
    #[arg(long, default_value = "average")]
    profile: PlayerProfile,

    /// Run every profile and print a comparison table (JSON and CSV cover every profile)
    #[arg(long)]
    all_profiles: bool,

    /// Difficulty config file (.toml or .json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a time-series CSV (one row per sample)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Ticks between CSV samples
    #[arg(long, default_value_t = 100)]
    sample_every: u64,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Engine debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let difficulty = match &args.config {
        Some(path) => match DifficultyConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => DifficultyConfig::default(),
    };

    let base = SimConfig {
        num_runs: args.runs,
        seed: args.seed,
        ticks_per_run: args.ticks,
        tick_ms: args.tick_ms,
        profile: args.profile,
        sample_every_ticks: if args.csv.is_some() { args.sample_every } else { 0 },
        difficulty,
        ..Default::default()
    };

    if args.all_profiles {
        return run_comparison(&base, &args);
    }

    let report = match run_simulation(&base) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        println!("{}", report.to_json());
    } else {
        print!("{}", report.to_text());
    }

    if let Some(path) = &args.csv {
        if let Err(e) = report.write_csv(path) {
            eprintln!("Failed to write {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        eprintln!("Time series written to {}", path.display());
    }

    ExitCode::SUCCESS
}

fn run_comparison(base: &SimConfig, args: &Args) -> ExitCode {
    let reports = match compare_profiles(base) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Simulation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        println!("{}", SimReport::comparison_json(&reports));
    } else {
        print!("{}", SimReport::comparison_text(&reports));
    }

    if let Some(path) = &args.csv {
        if let Err(e) = SimReport::write_comparison_csv(&reports, path) {
            eprintln!("Failed to write {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        eprintln!("Time series for every profile written to {}", path.display());
    }

    ExitCode::SUCCESS
}
