use std::time::{Duration, Instant};

use crate::error::{HarnessError, Result};

/// A pausable stopwatch over the monotonic clock.
///
/// At most one interval is open at a time. Closed intervals are folded into a
/// running total until they are taken out as a sample.
#[derive(Debug, Default)]
pub struct Timer {
    start: Option<Instant>,
    total: Duration,
    intervals: u64,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin or resume accumulation.
    pub fn start(&mut self) -> Result<()> {
        if self.start.is_some() {
            return Err(HarnessError::precondition(
                "timer started twice without a stop in between",
            ));
        }
        self.start = Some(Instant::now());
        Ok(())
    }

    /// Pause accumulation, folding the open interval into the running total.
    pub fn stop(&mut self) -> Result<()> {
        let now = Instant::now();
        let Some(start) = self.start.take() else {
            return Err(HarnessError::precondition("timer stopped without a start"));
        };
        self.total += now.duration_since(start);
        self.intervals += 1;
        Ok(())
    }

    /// Stop, then hand back the accumulated total and reset it to zero.
    pub fn stop_and_take(&mut self) -> Result<Duration> {
        self.stop()?;
        Ok(self.take())
    }

    pub(crate) fn take(&mut self) -> Duration {
        std::mem::take(&mut self.total)
    }

    pub fn is_running(&self) -> bool {
        self.start.is_some()
    }

    /// Time folded in since the last take.
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Number of closed intervals over the timer's lifetime.
    pub fn intervals(&self) -> u64 {
        self.intervals
    }
}
