use std::{
    io::{self, Write},
    panic::{self, AssertUnwindSafe},
    time::Duration,
};

use colored::Colorize;
use libcbench::{BenchmarkRegistry, HarnessError, RunResult, RunSpec};

use super::tuner::Tuner;
use crate::config::Profile;

/// Results of every selected run, in registration order.
#[derive(Debug, Default)]
pub struct Outcome {
    pub results: Vec<RunResult>,
    pub failures: Vec<(String, HarnessError)>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}

/// Run `spec` once, turning a panic inside the routine into a fault for its
/// label.
pub fn run_guarded(spec: &RunSpec, iterations: u64) -> libcbench::Result<RunResult> {
    match panic::catch_unwind(AssertUnwindSafe(|| spec.run(iterations))) {
        Ok(result) => result,
        Err(payload) => Err(HarnessError::UncontrolledFault {
            label: spec.label(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

#[derive(Debug)]
pub struct BenchRunner<'a> {
    profile: &'a Profile,
    tuner: Tuner,
    quiet: bool,
}

impl<'a> BenchRunner<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self {
            profile,
            tuner: Tuner::new(
                Duration::from_millis(profile.min_time_ms),
                profile.max_iterations,
            ),
            quiet: false,
        }
    }

    /// Suppress per-run progress output.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Warm up, pick an iteration count, and return the final run.
    pub fn run_one(&self, spec: &RunSpec) -> libcbench::Result<RunResult> {
        if self.profile.warmup {
            run_guarded(spec, 1)?;
        }
        if let Some(iterations) = self.profile.iterations {
            return run_guarded(spec, iterations);
        }
        let mut iters = 1;
        loop {
            let result = run_guarded(spec, iters)?;
            match self.tuner.next_iterations(iters, result.elapsed()) {
                Some(next) => {
                    log::debug!(
                        "{}: {} iterations took {:?}, retrying with {}",
                        spec.label(),
                        iters,
                        result.elapsed(),
                        next
                    );
                    iters = next;
                }
                None => return Ok(result),
            }
        }
    }

    fn progress(&self, label: &str, width: usize, ok: bool) -> anyhow::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mark = if ok { "✔".green() } else { "✘".red() };
        let padded = format!("{:width$}", label, width = width);
        eprintln!("{} {}", padded.blue().bold(), mark);
        io::stderr().flush()?;
        Ok(())
    }

    /// Run every selected case/argument. Failures are recorded and skipped.
    pub fn run(&self, registry: &BenchmarkRegistry) -> anyhow::Result<Outcome> {
        let specs = registry
            .runs()
            .filter(|spec| self.profile.selects(&spec.label()))
            .collect::<Vec<_>>();
        if specs.is_empty() {
            anyhow::bail!("No benchmark matches the filter {:?}", self.profile.filter);
        }
        let width = specs.iter().map(|s| s.label().len()).max().unwrap_or(0) + 3;
        let mut outcome = Outcome::default();
        for spec in &specs {
            let label = spec.label();
            match self.run_one(spec) {
                Ok(result) => {
                    self.progress(&label, width, true)?;
                    outcome.results.push(result);
                }
                Err(e) => {
                    self.progress(&label, width, false)?;
                    log::error!("{}: {}", label, e);
                    outcome.failures.push((label, e));
                }
            }
        }
        Ok(outcome)
    }
}
