use std::path::PathBuf;

use anyhow::Result;

use crate::errors::BenchError;

/// Bundled stand-in runner used when `--runner` is not given.
pub const DEFAULT_RUNNER: &str = "fixtures/example-runner.sh";

/// Sample program used when `--source` is not given.
pub const DEFAULT_SOURCE: &str = "fixtures/hello.t";

/// Validated benchmark configuration. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub runner: PathBuf,
    pub source: PathBuf,
    pub warmup: usize,
    pub runs: usize,
    pub save: Option<PathBuf>,
}

impl BenchConfig {
    /// Validates paths and counts, failing before any subprocess is spawned.
    ///
    /// The runner and source must both exist as regular files, and at least
    /// one timed run is required. `warmup` may be zero.
    pub fn validate(
        runner: PathBuf,
        source: PathBuf,
        warmup: usize,
        runs: usize,
        save: Option<PathBuf>,
    ) -> Result<Self> {
        if !runner.is_file() {
            return Err(BenchError::RunnerNotFound { path: runner }.into());
        }

        if !source.is_file() {
            return Err(BenchError::SourceNotFound { path: source }.into());
        }

        if runs == 0 {
            return Err(BenchError::InvalidRunCount { runs }.into());
        }

        Ok(BenchConfig {
            runner,
            source,
            warmup,
            runs,
            save,
        })
    }
}
