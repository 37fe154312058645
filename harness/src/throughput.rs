use crate::{
    error::{HarnessError, Result},
    result::RunResult,
};

/// Collects the optional bytes-processed total of one run.
#[derive(Debug, Default)]
pub struct ThroughputReporter {
    total_bytes: Option<u64>,
}

impl ThroughputReporter {
    /// Record the bytes moved across all iterations. Allowed once per run.
    pub fn set_bytes_processed(&mut self, total_bytes: u64) -> Result<()> {
        if let Some(prev) = self.total_bytes {
            return Err(HarnessError::precondition(format!(
                "bytes processed set twice ({prev} then {total_bytes})"
            )));
        }
        self.total_bytes = Some(total_bytes);
        Ok(())
    }

    pub fn bytes_processed(&self) -> Option<u64> {
        self.total_bytes
    }
}

/// Bytes per second over the measured time of `result`.
///
/// `None` when the run declared no bytes, or when no time was measured.
pub fn derive(result: &RunResult) -> Option<f64> {
    let total_bytes = result.bytes_processed()?;
    let seconds = result.mean_ns() * result.count() as f64 / 1e9;
    if seconds > 0.0 {
        Some(total_bytes as f64 / seconds)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Statistics;

    fn result(mean_ns: f64, count: u64, bytes: Option<u64>) -> RunResult {
        RunResult {
            name: "copy".to_owned(),
            argument: None,
            stats: Statistics {
                mean_ns,
                stddev_ns: 0.0,
                count,
            },
            iterations: count,
            bytes_processed: bytes,
            elapsed: std::time::Duration::from_secs_f64(mean_ns * count as f64 / 1e9),
        }
    }

    #[test]
    fn setting_bytes_twice_is_a_usage_error() {
        let mut reporter = ThroughputReporter::default();
        reporter.set_bytes_processed(10).unwrap();
        assert!(matches!(
            reporter.set_bytes_processed(10),
            Err(HarnessError::PreconditionViolation(_))
        ));
        assert_eq!(reporter.bytes_processed(), Some(10));
    }

    #[test]
    fn bytes_per_second_is_per_iteration_bytes_over_mean() {
        // 1000 iterations of 1 KiB at 1us each
        let r = result(1_000.0, 1000, Some(1000 * 1024));
        let rate = derive(&r).unwrap();
        assert!((rate - 1.024e9).abs() / 1.024e9 < 1e-9);
    }

    #[test]
    fn throughput_is_unavailable_without_bytes() {
        assert_eq!(derive(&result(1_000.0, 10, None)), None);
    }

    #[test]
    fn zero_time_has_no_rate() {
        assert_eq!(derive(&result(0.0, 10, Some(100))), None);
    }
}
