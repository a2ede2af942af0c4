use serde::Serialize;

use crate::exec::RunRecord;

/// Descriptive statistics over succeeded runs, in seconds.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimingStats {
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

/// Aggregate over all timed runs. `timing` is `None` exactly when no run
/// succeeded; in that case `failure_count` equals the total run count.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub sample_count: usize,
    pub failure_count: usize,
    pub timing: Option<TimingStats>,
    pub sample_output: String,
}

/// Summarizes timed runs into a report.
///
/// Only succeeded runs contribute to the statistics. The standard deviation
/// is the sample standard deviation (divide by n-1), defined as 0 for a
/// single sample. `sample_output` is the stdout of the first succeeded run
/// in invocation order, or empty if every run failed.
pub fn summarize(records: &[RunRecord]) -> BenchReport {
    let timings: Vec<f64> = records
        .iter()
        .filter(|r| r.succeeded)
        .map(RunRecord::elapsed_secs)
        .collect();

    let sample_output = records
        .iter()
        .find(|r| r.succeeded)
        .map(|r| r.stdout.clone())
        .unwrap_or_default();

    let failure_count = records.len() - timings.len();

    let timing = if timings.is_empty() {
        None
    } else {
        let mean = timings.iter().sum::<f64>() / timings.len() as f64;

        let stddev = if timings.len() < 2 {
            0.0
        } else {
            let variance = timings.iter().map(|t| (t - mean).powi(2)).sum::<f64>()
                / (timings.len() - 1) as f64;
            variance.sqrt()
        };

        let min = timings
            .iter()
            .cloned()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or(0.0);
        let max = timings
            .iter()
            .cloned()
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or(0.0);

        Some(TimingStats {
            mean,
            stddev,
            min,
            max,
        })
    };

    BenchReport {
        sample_count: timings.len(),
        failure_count,
        timing,
        sample_output,
    }
}
