use std::io;
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};

/// Exit code recorded when the child was killed by a signal and has none.
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// Outcome of a single runner invocation. Constructed once, never mutated.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub elapsed: Duration,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub succeeded: bool,
}

impl RunRecord {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Process-invocation seam: launch the runner against a source file, wait for
/// it to exit, and capture its output and exit code. Tests substitute a mock
/// implementation so no real process is spawned.
///
/// A non-zero exit from a launched process is not an error here; only a
/// failure to start the process at all surfaces as `io::Error`.
pub trait Launcher {
    fn launch(&mut self, runner: &Path, source: &Path) -> io::Result<RunRecord>;
}

/// Real launcher: spawns `runner <source>` and blocks until it exits.
///
/// The clock starts immediately before spawn and stops once the child has
/// terminated, so the measurement brackets process execution only, not
/// harness-side handling of the captured output.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, runner: &Path, source: &Path) -> io::Result<RunRecord> {
        let start = Instant::now();
        let output = Command::new(runner).arg(source).output()?;
        let elapsed = start.elapsed();

        let exit_code = output.status.code().unwrap_or(SIGNAL_EXIT_CODE);

        Ok(RunRecord {
            elapsed,
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            succeeded: exit_code == 0,
        })
    }
}
