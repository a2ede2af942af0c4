use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::config::BenchConfig;
use crate::exec::RunRecord;
use crate::stats::BenchReport;

/// Max characters of stdout/stderr shown in a per-run progress line.
const PREVIEW_CHARS: usize = 100;

/// Max characters of per-run stdout kept in the saved JSON.
const SAVED_STDOUT_CHARS: usize = 500;

/// Max characters of per-run stderr kept in the saved JSON.
const SAVED_STDERR_CHARS: usize = 200;

/// Truncate at character boundaries, appending "..." if truncated.
pub fn truncate_output(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }

    let byte_limit = s
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    format!("{}...", &s[..byte_limit])
}

/// One-line preview of captured output: first line only, truncated.
fn preview(s: &str) -> String {
    truncate_output(s.lines().next().unwrap_or(""), PREVIEW_CHARS)
}

/// Configuration banner printed before any run executes.
pub fn format_banner(config: &BenchConfig) -> String {
    let mut out = String::new();
    out.push_str(
        &"Benchmark configuration:"
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string(),
    );
    out.push('\n');
    out.push_str(&format!("  Runner:      {}\n", config.runner.display()));
    out.push_str(&format!("  Source:      {}\n", config.source.display()));
    out.push_str(&format!("  Warmup runs: {}\n", config.warmup));
    out.push_str(&format!("  Timed runs:  {}\n", config.runs));
    out
}

/// Progress line for a warmup run. Warmup timings are discarded, but stderr
/// of a failing warmup is still worth showing.
pub fn format_warmup_line(index: usize, record: &RunRecord) -> String {
    let mut line = format!(
        "  warmup {}: {:.4}s (exit {})",
        index + 1,
        record.elapsed_secs(),
        record.exit_code
    );
    if !record.succeeded && !record.stderr.is_empty() {
        line.push_str(&format!("\n    stderr: {}", preview(&record.stderr)));
    }
    line
}

/// Progress line for a timed run, with short output previews.
pub fn format_run_line(index: usize, record: &RunRecord) -> String {
    let mut line = format!(
        "  run {}: {:.4}s (exit {})",
        index + 1,
        record.elapsed_secs(),
        record.exit_code
    );
    if !record.stdout.is_empty() {
        line.push_str(&format!("\n    stdout: {}", preview(&record.stdout)));
    }
    if !record.stderr.is_empty() {
        line.push_str(&format!("\n    stderr: {}", preview(&record.stderr)));
    }
    line
}

/// Final summary block. All durations are seconds at 4 decimal places.
pub fn format_summary(report: &BenchReport) -> String {
    let mut out = String::new();
    out.push_str(
        &"Results:"
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string(),
    );
    out.push('\n');

    match &report.timing {
        Some(timing) => {
            out.push_str(&format!(
                "  Samples: {} ({} failed)\n",
                report.sample_count, report.failure_count
            ));
            out.push_str(&format!("  Mean:    {:.4}s\n", timing.mean));
            out.push_str(&format!("  Stddev:  {:.4}s\n", timing.stddev));
            out.push_str(&format!("  Min:     {:.4}s (fastest)\n", timing.min));
            out.push_str(&format!("  Max:     {:.4}s (slowest)\n", timing.max));

            let sample = preview(&report.sample_output);
            if !sample.is_empty() {
                out.push_str(&format!("  Sample output: {}\n", sample));
            }
        }
        None => {
            let notice = format!(
                "  No valid timing samples: all {} runs failed\n",
                report.failure_count
            );
            out.push_str(
                &notice
                    .if_supports_color(Stream::Stdout, |s| s.red())
                    .to_string(),
            );
        }
    }

    out
}

#[derive(Serialize)]
struct SavedRun {
    run: usize,
    seconds: f64,
    exit_code: i32,
    stdout: String,
    stderr: String,
}

#[derive(Serialize)]
struct SavedReport<'a> {
    runner: &'a Path,
    source: &'a Path,
    warmup: usize,
    runs: usize,
    timestamp: DateTime<Utc>,
    /// Elapsed seconds of succeeded runs, in invocation order.
    timings: Vec<f64>,
    summary: &'a BenchReport,
    run_details: Vec<SavedRun>,
}

/// Writes the full benchmark results as pretty-printed JSON.
pub fn save_json(
    path: &Path,
    config: &BenchConfig,
    report: &BenchReport,
    records: &[RunRecord],
) -> Result<()> {
    let saved = SavedReport {
        runner: &config.runner,
        source: &config.source,
        warmup: config.warmup,
        runs: config.runs,
        timestamp: Utc::now(),
        timings: records
            .iter()
            .filter(|r| r.succeeded)
            .map(RunRecord::elapsed_secs)
            .collect(),
        summary: report,
        run_details: records
            .iter()
            .enumerate()
            .map(|(i, r)| SavedRun {
                run: i + 1,
                seconds: r.elapsed_secs(),
                exit_code: r.exit_code,
                stdout: truncate_output(&r.stdout, SAVED_STDOUT_CHARS),
                stderr: truncate_output(&r.stderr, SAVED_STDERR_CHARS),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&saved)?;
    fs::write(path, json).with_context(|| format!("writing results to {}", path.display()))?;
    Ok(())
}
