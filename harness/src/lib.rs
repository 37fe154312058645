//! Timing core for microbenchmarks of C library primitives.
//!
//! Cases are registered in a [`BenchmarkRegistry`] owned by the driver. Each
//! run hands the case routine a [`State`]; the routine times only the
//! operation under test and the harness folds the samples into a
//! [`RunResult`] with mean, standard deviation and optional throughput.

mod bencher;
mod case;
mod error;
mod registry;
mod result;
pub mod stats;
mod sweep;
pub mod throughput;
pub mod timer;

pub use bencher::State;
pub use case::{BenchmarkCase, Routine};
pub use error::{HarnessError, Result};
pub use libcbench_macros::bench;
pub use registry::{BenchmarkRegistry, RunSpec};
pub use result::{label, RunResult};
pub use stats::{SampleAccumulator, Statistics};
pub use std::hint::black_box;
pub use sweep::{Argument, ArgumentKind, ArgumentSweep, ArgumentSweepBuilder, ArgumentValue};
pub use throughput::ThroughputReporter;
pub use timer::Timer;
