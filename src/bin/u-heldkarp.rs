//! # u-heldkarp CLI
//!
//! Solves a TSP instance exactly and prints the optimal tour.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::error;
use std::path::PathBuf;
use u_heldkarp::held_karp::Strategy;
use u_heldkarp::matrix::{samples, CostMatrix};
use u_heldkarp::{HeldKarpConfig, HeldKarpRunner, TourOutcome};

/// Exact TSP solver (Held-Karp)
#[derive(Parser)]
#[command(name = "u-heldkarp")]
#[command(about = "Exact minimum-cost tour via Held-Karp dynamic programming")]
#[command(long_about = "Reads a JSON cost matrix and prints the optimal tour:
  u-heldkarp                           # Solve the built-in seven-city sample
  u-heldkarp matrix.json               # Rows of numbers, null = no edge
  u-heldkarp matrix.json --zero-is-absent
  u-heldkarp matrix.json --start 3     # Start at location 3 (1-based)")]
#[command(version)]
struct Cli {
    /// JSON file holding the cost matrix; the seven-city sample if omitted
    matrix: Option<PathBuf>,

    /// Start location, 1-based
    #[arg(short, long, default_value_t = 1)]
    start: usize,

    /// Treat 0 as "no edge" (plain adjacency-matrix data)
    #[arg(long)]
    zero_is_absent: bool,

    /// State evaluation order
    #[arg(long, value_enum, default_value_t = StrategyArg::BottomUp)]
    strategy: StrategyArg,

    /// Evaluate popcount layers in parallel
    #[arg(long)]
    parallel: bool,

    /// Refuse instances larger than this
    #[arg(long, default_value_t = 20)]
    max_locations: usize,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Recursive,
    BottomUp,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Recursive => Strategy::Recursive,
            StrategyArg::BottomUp => Strategy::BottomUp,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let matrix = load_matrix(&cli)?;
    if cli.start == 0 {
        bail!("--start is 1-based");
    }

    let config = HeldKarpConfig::default()
        .with_strategy(cli.strategy.into())
        .with_parallel(cli.parallel)
        .with_max_locations(cli.max_locations);
    let result = HeldKarpRunner::run(&matrix, cli.start - 1, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match &result.outcome {
        TourOutcome::Tour(tour) => {
            let path: Vec<String> = tour.one_based().iter().map(|l| l.to_string()).collect();
            println!("Optimal Tour Path: {}", path.join(" "));
            println!("Optimal Tour Distance: {}", tour.cost());
        }
        TourOutcome::Unreachable => {
            println!("Optimal Tour Path: none");
            println!("Optimal Tour Distance: unreachable");
        }
    }
    Ok(())
}

fn load_matrix(cli: &Cli) -> Result<CostMatrix> {
    let Some(path) = &cli.matrix else {
        log::debug!("no matrix given, using the seven-city sample");
        return Ok(samples::seven_cities()?);
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let matrix = if cli.zero_is_absent {
        let rows: Vec<Vec<f64>> =
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        CostMatrix::from_zero_absent(&rows)?
    } else {
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
    };
    log::debug!("loaded {} locations from {}", matrix.len(), path.display());
    Ok(matrix)
}
