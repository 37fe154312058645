use std::hint::black_box;
use std::time::Duration;

use crate::{
    error::{HarnessError, Result},
    result::RunResult,
    stats::SampleAccumulator,
    sweep::ArgumentValue,
    throughput::ThroughputReporter,
    timer::Timer,
};

/// Per-run state handed to a run routine.
///
/// A routine does its setup untimed, then brackets only the operation under
/// test with [`State::start_timing`] and one of the stop calls, and finally
/// releases its buffers. Results of the measured calls go through
/// [`State::observe`] so the optimizer cannot drop them.
///
/// # Example
///
/// ```rust
/// use libcbench::{BenchmarkCase, State};
///
/// fn fill(state: &mut State, nbytes: usize) -> libcbench::Result<()> {
///     let mut buf = vec![0u8; nbytes];
///     for _ in 0..state.iterations() {
///         state.start_timing()?;
///         buf.fill(0x55);
///         state.stop_timing_with_sample()?;
///     }
///     state.observe(&buf);
///     state.set_bytes_processed(state.iterations() * nbytes as u64)
/// }
///
/// let sweep = libcbench::ArgumentSweep::builder().add(64).build().unwrap();
/// let case = BenchmarkCase::with_arg("fill", sweep, fill).unwrap();
/// let result = case.run(case.arguments().next().unwrap(), 10).unwrap();
/// assert_eq!(result.count(), 10);
/// ```
#[derive(Debug)]
pub struct State {
    iterations: u64,
    timer: Timer,
    samples: SampleAccumulator,
    multiplier: Option<u64>,
    throughput: ThroughputReporter,
}

impl State {
    pub(crate) fn new(iterations: u64) -> Self {
        Self {
            iterations,
            timer: Timer::new(),
            samples: SampleAccumulator::new(),
            multiplier: None,
            throughput: ThroughputReporter::default(),
        }
    }

    /// Number of iterations this run must perform.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Enter the measured region.
    pub fn start_timing(&mut self) -> Result<()> {
        self.timer.start()
    }

    /// Leave the measured region, keeping the time in the running total.
    ///
    /// Runs timed only this way are reported as one batch spread evenly over
    /// all iterations.
    pub fn stop_timing(&mut self) -> Result<()> {
        self.timer.stop()
    }

    /// Leave the measured region and record the interval as one sample.
    pub fn stop_timing_with_sample(&mut self) -> Result<()> {
        self.stop_timing_with_sample_scaled(1)
    }

    /// Like [`State::stop_timing_with_sample`] for a region that performed `n`
    /// operations. The final statistics are divided by `n`.
    pub fn stop_timing_with_sample_scaled(&mut self, n: u64) -> Result<()> {
        if n == 0 {
            return Err(HarnessError::precondition("sample multiplier must be at least 1"));
        }
        match self.multiplier {
            Some(m) if m != n => {
                return Err(HarnessError::precondition(format!(
                    "sample multiplier changed from {m} to {n} within one run"
                )))
            }
            _ => self.multiplier = Some(n),
        }
        let sample = self.timer.stop_and_take()?;
        self.samples.add_sample(sample);
        Ok(())
    }

    /// Time `f` as one sample.
    pub fn time<R>(&mut self, f: impl FnOnce() -> R) -> Result<R> {
        self.start_timing()?;
        let r = f();
        self.stop_timing_with_sample()?;
        Ok(r)
    }

    /// Sink for results of the measured calls.
    pub fn observe<T>(&self, value: T) {
        black_box(value);
    }

    /// Declare the bytes moved across all iterations. Allowed once per run.
    pub fn set_bytes_processed(&mut self, total_bytes: u64) -> Result<()> {
        self.throughput.set_bytes_processed(total_bytes)
    }

    pub(crate) fn finish(
        mut self,
        name: &str,
        argument: Option<ArgumentValue>,
    ) -> Result<RunResult> {
        if self.timer.is_running() {
            return Err(HarnessError::precondition(
                "timer still running when the routine returned",
            ));
        }
        if self.samples.is_empty() {
            if self.timer.intervals() > 0 {
                self.samples.add_batch(self.timer.take(), self.iterations);
            }
        } else if self.timer.intervals() > self.samples.count() {
            return Err(HarnessError::precondition(
                "run mixes per-iteration samples with batched timing",
            ));
        }
        let mut stats = self.samples.finalize()?;
        // Timed wall time, before any per-operation scaling.
        let elapsed = Duration::from_secs_f64(stats.mean_ns * stats.count as f64 / 1e9);
        if let Some(n) = self.multiplier.filter(|n| *n > 1) {
            stats = stats.scaled_down(n);
        }
        if stats.count != self.iterations {
            log::warn!(
                "{}: {} samples recorded for {} iterations",
                crate::result::label(name, argument),
                stats.count,
                self.iterations
            );
        }
        Ok(RunResult {
            name: name.to_owned(),
            argument,
            stats,
            iterations: self.iterations,
            bytes_processed: self.throughput.bytes_processed(),
            elapsed,
        })
    }
}
