use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    #[error("Runner executable not found at {path}")]
    RunnerNotFound { path: PathBuf },

    #[error("Source file not found at {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Timed run count must be at least 1 (got {runs})")]
    InvalidRunCount { runs: usize },

    #[error("Failed to launch runner {runner}: {source}")]
    LaunchFailed {
        runner: PathBuf,
        source: std::io::Error,
    },

    #[error("All {runs} timed runs failed; no valid timing samples were collected")]
    AllRunsFailed { runs: usize },
}
