use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colander::harness::{self, CountingAllocator, HarnessConfig};
use colander::strategy::{is_even, records, Strategy};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator::new();

#[derive(Parser, Debug)]
#[command(name = "colander", about = "Compare lazy filtering strategies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Time each strategy against the same workload.
    Run {
        /// Records in the workload (numbered from 1).
        #[arg(long, default_value_t = 10_000)]
        elements: usize,
        /// Timed rounds per strategy.
        #[arg(long, default_value_t = 100)]
        rounds: u32,
        /// Untimed warmup rounds per strategy.
        #[arg(long, default_value_t = 3)]
        warmup: u32,
        /// Strategy to measure (repeatable; default: all).
        #[arg(long = "strategy")]
        strategies: Vec<Strategy>,
    },
    /// Count even records once with a single strategy.
    Count {
        /// Records in the workload (numbered from 1).
        #[arg(long, default_value_t = 10_000)]
        elements: usize,
        /// Strategy to use.
        #[arg(long, default_value = "manual")]
        strategy: Strategy,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            elements,
            rounds,
            warmup,
            strategies,
        } => run_benchmarks(elements, rounds, warmup, strategies)?,
        Commands::Count { elements, strategy } => run_count(elements, strategy)?,
    }

    Ok(())
}

fn run_benchmarks(elements: usize, rounds: u32, warmup: u32, strategies: Vec<Strategy>) -> Result<()> {
    let mut config = HarnessConfig::default()
        .with_elements(elements)
        .with_rounds(rounds)
        .with_warmup(warmup);
    // no --strategy flag means all of them
    if !strategies.is_empty() {
        config = config.with_strategies(strategies);
    }

    let reports = harness::run(&config, Some(&GLOBAL)).context("benchmark run failed")?;

    println!(
        "{} records, {} rounds per strategy",
        config.elements, config.rounds
    );
    println!("{}", "-".repeat(72));
    for report in &reports {
        println!("{}", report.report());
    }

    Ok(())
}

fn run_count(elements: usize, strategy: Strategy) -> Result<()> {
    HarnessConfig::default()
        .with_elements(elements)
        .validate()
        .context("invalid workload")?;

    let items = records(elements).context("invalid workload")?;
    let total = strategy
        .count(&items, is_even)
        .with_context(|| format!("{strategy} strategy failed"))?;

    println!("{strategy}\t{total} of {elements} records are even");
    Ok(())
}
