use std::time::Duration;

use serde::Serialize;

use crate::{stats::Statistics, sweep::ArgumentValue, throughput};

/// `name` or `name/arg`.
pub fn label(name: &str, argument: Option<ArgumentValue>) -> String {
    match argument {
        Some(arg) => format!("{name}/{arg}"),
        None => name.to_owned(),
    }
}

/// The outcome of one run of one case. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub(crate) name: String,
    pub(crate) argument: Option<ArgumentValue>,
    #[serde(flatten)]
    pub(crate) stats: Statistics,
    pub(crate) iterations: u64,
    pub(crate) bytes_processed: Option<u64>,
    #[serde(skip)]
    pub(crate) elapsed: Duration,
}

impl RunResult {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn argument(&self) -> Option<ArgumentValue> {
        self.argument
    }

    pub fn label(&self) -> String {
        label(&self.name, self.argument)
    }

    pub fn statistics(&self) -> Statistics {
        self.stats
    }

    /// Mean time per operation, in nanoseconds.
    pub fn mean_ns(&self) -> f64 {
        self.stats.mean_ns
    }

    pub fn stddev_ns(&self) -> f64 {
        self.stats.stddev_ns
    }

    pub fn mean(&self) -> Duration {
        self.stats.mean()
    }

    /// Number of samples the statistics cover.
    pub fn count(&self) -> u64 {
        self.stats.count
    }

    /// The iteration count the run was invoked with.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn bytes_processed(&self) -> Option<u64> {
        self.bytes_processed
    }

    /// Per-operation mean times sample count. For runs stopped with a sample
    /// multiplier this is the timed wall time divided by the multiplier.
    pub fn measured_time(&self) -> Duration {
        Duration::from_secs_f64(self.stats.mean_ns * self.stats.count as f64 / 1e9)
    }

    /// Wall time spent inside timed regions.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn bytes_per_second(&self) -> Option<f64> {
        throughput::derive(self)
    }
}
