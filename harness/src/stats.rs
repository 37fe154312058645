//! Streaming mean and standard deviation over timing samples.
//!
//! Samples are folded in with Welford's update so nothing is retained and the
//! variance does not suffer the cancellation of a naive sum of squares.
//! The reported deviation is the sample standard deviation (divides by N-1);
//! a single sample reports zero.

use std::time::Duration;

use serde::Serialize;

use crate::error::{HarnessError, Result};

#[derive(Debug, Default, Clone)]
pub struct SampleAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
}

/// Finalized statistics, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub mean_ns: f64,
    pub stddev_ns: f64,
    pub count: u64,
}

impl Statistics {
    pub fn mean(&self) -> Duration {
        Duration::from_secs_f64(self.mean_ns / 1e9)
    }

    pub fn stddev(&self) -> Duration {
        Duration::from_secs_f64(self.stddev_ns / 1e9)
    }

    /// Divide every sample by `n`, turning per-batch numbers into per-operation ones.
    pub(crate) fn scaled_down(self, n: u64) -> Self {
        let n = n as f64;
        Self {
            mean_ns: self.mean_ns / n,
            stddev_ns: self.stddev_ns / n,
            count: self.count,
        }
    }
}

impl SampleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, sample: Duration) {
        self.add_nanos(sample.as_nanos() as f64);
    }

    pub(crate) fn add_nanos(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Fold in `n` samples that are only known by their sum, treating them as
    /// identical. Equivalent to `n` calls of `add_sample(total / n)`.
    pub fn add_batch(&mut self, total: Duration, n: u64) {
        if n == 0 {
            return;
        }
        let batch_mean = total.as_nanos() as f64 / n as f64;
        let combined = self.count + n;
        let delta = batch_mean - self.mean;
        self.mean += delta * n as f64 / combined as f64;
        self.m2 += delta * delta * self.count as f64 * n as f64 / combined as f64;
        self.count = combined;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn finalize(&self) -> Result<Statistics> {
        if self.count == 0 {
            return Err(HarnessError::InsufficientData);
        }
        let variance = if self.count > 1 {
            (self.m2 / (self.count - 1) as f64).max(0.0)
        } else {
            0.0
        };
        Ok(Statistics {
            mean_ns: self.mean,
            stddev_ns: variance.sqrt(),
            count: self.count,
        })
    }
}
