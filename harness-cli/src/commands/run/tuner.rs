use std::time::Duration;

/// Grows the iteration count of a run until its measured time reaches
/// `min_time`.
#[derive(Debug, Clone, Copy)]
pub struct Tuner {
    pub min_time: Duration,
    pub max_iterations: u64,
}

/// Smallest value in the 1, 2, 3, 5 x 10^k series that is `>= n`.
pub fn round_up_nice(n: u64) -> u64 {
    let mut base = 1u64;
    while base <= n / 10 {
        base *= 10;
    }
    [1, 2, 3, 5, 10]
        .iter()
        .map(|m| base.saturating_mul(*m))
        .find(|v| *v >= n)
        .unwrap_or(u64::MAX)
}

impl Tuner {
    pub fn new(min_time: Duration, max_iterations: u64) -> Self {
        Self {
            min_time,
            max_iterations: max_iterations.max(1),
        }
    }

    /// The iteration count for the next attempt, or `None` once a run of
    /// `iters` iterations taking `elapsed` is final.
    pub fn next_iterations(&self, iters: u64, elapsed: Duration) -> Option<u64> {
        if elapsed >= self.min_time || iters >= self.max_iterations {
            return None;
        }
        let iters = iters.max(1);
        let upper = iters.saturating_mul(10);
        let predicted = if elapsed.is_zero() {
            upper
        } else {
            (iters as f64 * self.min_time.as_secs_f64() * 1.4 / elapsed.as_secs_f64()) as u64
        };
        let next = predicted.clamp(iters + 1, upper);
        Some(round_up_nice(next).min(self.max_iterations))
    }
}
