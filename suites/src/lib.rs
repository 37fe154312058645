//! Benchmark cases for the C library's allocator, math and string routines.

use libcbench::{BenchmarkRegistry, Result};

pub mod malloc;
pub mod math;
pub mod string;

pub(crate) const KB: i64 = 1024;
pub(crate) const MB: i64 = 1024 * KB;

/// Register every suite, in malloc, math, string order.
pub fn register_all(registry: &mut BenchmarkRegistry) -> Result<()> {
    let before = registry.len();
    malloc::register(registry)?;
    math::register(registry)?;
    string::register(registry)?;
    log::debug!("registered {} suite cases", registry.len() - before);
    Ok(())
}

/// A registry holding every suite.
pub fn registry() -> Result<BenchmarkRegistry> {
    let mut registry = BenchmarkRegistry::new();
    register_all(&mut registry)?;
    Ok(registry)
}
