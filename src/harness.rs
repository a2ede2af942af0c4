use anyhow::Result;

use crate::config::BenchConfig;
use crate::errors::BenchError;
use crate::exec::{Launcher, RunRecord};

/// Runs the warmup invocations, discarding all results.
///
/// A spawn failure is fatal: a runner that cannot start at all is a setup
/// problem, not a measurement outcome. A non-zero exit from a launched
/// warmup run is not fatal; the record is passed to `progress` (so its
/// stderr can be surfaced) and otherwise discarded.
pub fn run_warmups(
    config: &BenchConfig,
    launcher: &mut impl Launcher,
    mut progress: impl FnMut(usize, &RunRecord),
) -> Result<()> {
    for i in 0..config.warmup {
        let record = launch_one(config, launcher)?;
        progress(i, &record);
    }
    Ok(())
}

/// Runs the timed invocations strictly sequentially, returning records in
/// invocation order. Each child fully terminates before the next spawns.
///
/// Ordering is preserved for reproducible sample-output selection; the
/// statistics themselves are order-independent. Runs that exit non-zero are
/// recorded and the sequence continues; only a spawn failure aborts.
pub fn run_timed(
    config: &BenchConfig,
    launcher: &mut impl Launcher,
    mut progress: impl FnMut(usize, &RunRecord),
) -> Result<Vec<RunRecord>> {
    let mut records = Vec::with_capacity(config.runs);

    for i in 0..config.runs {
        let record = launch_one(config, launcher)?;
        progress(i, &record);
        records.push(record);
    }

    Ok(records)
}

fn launch_one(config: &BenchConfig, launcher: &mut impl Launcher) -> Result<RunRecord> {
    launcher
        .launch(&config.runner, &config.source)
        .map_err(|source| {
            BenchError::LaunchFailed {
                runner: config.runner.clone(),
                source,
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    /// Scripted launcher: plays back a fixed plan of outcomes and counts
    /// invocations. Panics if invoked more times than planned.
    struct MockLauncher {
        plan: Vec<Result<RunRecord, io::ErrorKind>>,
        calls: usize,
    }

    impl MockLauncher {
        fn new(plan: Vec<Result<RunRecord, io::ErrorKind>>) -> Self {
            MockLauncher { plan, calls: 0 }
        }
    }

    impl Launcher for MockLauncher {
        fn launch(&mut self, _runner: &Path, _source: &Path) -> io::Result<RunRecord> {
            let outcome = self
                .plan
                .get(self.calls)
                .cloned()
                .expect("launcher invoked more times than planned");
            self.calls += 1;
            outcome.map_err(io::Error::from)
        }
    }

    fn ok(secs: f64, stdout: &str) -> Result<RunRecord, io::ErrorKind> {
        Ok(RunRecord {
            elapsed: Duration::from_secs_f64(secs),
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
            succeeded: true,
        })
    }

    fn failed(exit_code: i32) -> Result<RunRecord, io::ErrorKind> {
        Ok(RunRecord {
            elapsed: Duration::from_secs_f64(0.01),
            exit_code,
            stdout: String::new(),
            stderr: "runner error".to_string(),
            succeeded: false,
        })
    }

    fn test_config(warmup: usize, runs: usize) -> BenchConfig {
        BenchConfig {
            runner: PathBuf::from("mock-runner"),
            source: PathBuf::from("mock-source.t"),
            warmup,
            runs,
            save: None,
        }
    }

    #[test]
    fn warmup_plus_timed_invocation_counts() {
        let config = test_config(2, 3);
        let mut launcher = MockLauncher::new(vec![
            ok(0.1, "w"),
            ok(0.1, "w"),
            ok(0.1, "a"),
            ok(0.2, "b"),
            ok(0.3, "c"),
        ]);

        run_warmups(&config, &mut launcher, |_, _| {}).unwrap();
        assert_eq!(launcher.calls, 2);

        let records = run_timed(&config, &mut launcher, |_, _| {}).unwrap();
        assert_eq!(launcher.calls, 5);
        assert_eq!(records.len(), 3);

        let report = stats::summarize(&records);
        assert_eq!(report.sample_count, 3);
        assert_eq!(report.failure_count, 0);
    }

    #[test]
    fn timed_records_preserve_invocation_order() {
        let config = test_config(0, 3);
        let mut launcher = MockLauncher::new(vec![ok(0.3, "first"), ok(0.1, "second"), ok(0.2, "third")]);

        let records = run_timed(&config, &mut launcher, |_, _| {}).unwrap();
        let outputs: Vec<&str> = records.iter().map(|r| r.stdout.as_str()).collect();
        assert_eq!(outputs, ["first", "second", "third"]);
    }

    #[test]
    fn progress_callback_sees_every_run() {
        let config = test_config(0, 4);
        let mut launcher =
            MockLauncher::new(vec![ok(0.1, "a"), failed(1), ok(0.1, "b"), failed(2)]);

        let mut seen = Vec::new();
        run_timed(&config, &mut launcher, |i, r| seen.push((i, r.succeeded))).unwrap();
        assert_eq!(seen, [(0, true), (1, false), (2, true), (3, false)]);
    }

    #[test]
    fn nonzero_warmup_exit_is_not_fatal() {
        let config = test_config(2, 1);
        let mut launcher = MockLauncher::new(vec![failed(1), failed(1), ok(0.1, "x")]);

        run_warmups(&config, &mut launcher, |_, _| {}).unwrap();
        let records = run_timed(&config, &mut launcher, |_, _| {}).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(launcher.calls, 3);
    }

    #[test]
    fn warmup_spawn_failure_is_fatal() {
        let config = test_config(1, 2);
        let mut launcher = MockLauncher::new(vec![Err(io::ErrorKind::NotFound)]);

        let err = run_warmups(&config, &mut launcher, |_, _| {}).unwrap_err();
        assert!(err.to_string().contains("Failed to launch runner"));
        assert_eq!(launcher.calls, 1);
    }

    #[test]
    fn timed_spawn_failure_aborts_remaining_runs() {
        let config = test_config(0, 4);
        let mut launcher = MockLauncher::new(vec![
            ok(0.1, "a"),
            Err(io::ErrorKind::PermissionDenied),
            ok(0.1, "never reached"),
            ok(0.1, "never reached"),
        ]);

        let result = run_timed(&config, &mut launcher, |_, _| {});
        assert!(result.is_err());
        assert_eq!(launcher.calls, 2);
    }

    #[test]
    fn mixed_results_feed_summary() {
        let config = test_config(0, 4);
        let mut launcher =
            MockLauncher::new(vec![failed(1), ok(0.2, "good one"), failed(1), ok(0.4, "later")]);

        let records = run_timed(&config, &mut launcher, |_, _| {}).unwrap();
        let report = stats::summarize(&records);
        assert_eq!(report.sample_count, 2);
        assert_eq!(report.failure_count, 2);
        assert_eq!(report.sample_output, "good one");
    }
}
