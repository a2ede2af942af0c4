use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use runbench::config::{self, BenchConfig};
use runbench::errors::BenchError;
use runbench::exec::ProcessLauncher;
use runbench::harness;
use runbench::report;
use runbench::stats;

#[derive(Parser)]
#[command(name = "runbench", version, about = "Benchmark an external language runner")]
struct Cli {
    /// Path to the runner executable
    #[arg(long, default_value = config::DEFAULT_RUNNER)]
    runner: PathBuf,

    /// Path to the source program to benchmark
    #[arg(long, default_value = config::DEFAULT_SOURCE)]
    source: PathBuf,

    /// Number of warmup runs (timings discarded)
    #[arg(long, default_value_t = 1)]
    warmup: usize,

    /// Number of timed runs. A hung runner is waited on indefinitely;
    /// there is no timeout.
    #[arg(long, default_value_t = 5)]
    runs: usize,

    /// Write full results as JSON to this path
    #[arg(long)]
    save: Option<PathBuf>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = BenchConfig::validate(cli.runner, cli.source, cli.warmup, cli.runs, cli.save)?;

    print!("{}", report::format_banner(&config));

    let mut launcher = ProcessLauncher;

    if config.warmup > 0 {
        println!("\nRunning {} warmup run(s)...", config.warmup);
        harness::run_warmups(&config, &mut launcher, |i, record| {
            println!("{}", report::format_warmup_line(i, record));
        })?;
    }

    println!("\nRunning {} timed run(s)...", config.runs);
    let records = harness::run_timed(&config, &mut launcher, |i, record| {
        println!("{}", report::format_run_line(i, record));
    })?;

    let summary = stats::summarize(&records);
    println!();
    print!("{}", report::format_summary(&summary));

    if let Some(save_path) = &config.save {
        // Best effort: a failed save must not discard the benchmark itself.
        match report::save_json(save_path, &config, &summary, &records) {
            Ok(()) => println!("\nResults saved to {}", save_path.display()),
            Err(err) => eprintln!("Warning: failed to save results: {err:#}"),
        }
    }

    // Zero valid samples is a failed benchmark, even though the report above
    // was still printed in full.
    if summary.timing.is_none() {
        return Err(BenchError::AllRunsFailed { runs: config.runs }.into());
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
