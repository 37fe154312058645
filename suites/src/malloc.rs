use libcbench::{bench, black_box, ArgumentSweep, BenchmarkRegistry, Result, State};

use crate::{KB, MB};

/// Blocks allocated per outer iteration by `malloc_multi`.
const N_ELEMENTS: usize = 10;

/// 512 bytes up to 256 MiB.
pub fn common_sizes() -> Result<ArgumentSweep> {
    ArgumentSweep::builder()
        .add(512)
        .range(KB, 512 * KB, 2)
        .range(MB, 256 * MB, 2)
        .build()
}

#[bench(args = common_sizes)]
fn malloc_single(state: &mut State, chunk_size: usize) -> Result<()> {
    for _ in 0..state.iterations() {
        state.start_timing()?;
        let buf = black_box(unsafe { libc::malloc(chunk_size) });
        unsafe { libc::free(buf) };
        state.stop_timing_with_sample()?;
    }
    Ok(())
}

#[bench(args = common_sizes)]
fn malloc_realloc(state: &mut State, chunk_size: usize) -> Result<()> {
    for _ in 0..state.iterations() {
        state.start_timing()?;
        let buf = unsafe { libc::malloc(chunk_size) };
        let buf = black_box(unsafe { libc::realloc(buf, chunk_size * 2) });
        unsafe { libc::free(buf) };
        state.stop_timing_with_sample()?;
    }
    Ok(())
}

#[bench(args = common_sizes)]
fn malloc_multi(state: &mut State, chunk_size: usize) -> Result<()> {
    let mut bufs = [std::ptr::null_mut::<libc::c_void>(); N_ELEMENTS];
    for _ in 0..state.iterations() {
        state.start_timing()?;
        for buf in bufs.iter_mut() {
            *buf = black_box(unsafe { libc::malloc(chunk_size) });
        }
        for buf in bufs.iter() {
            unsafe { libc::free(*buf) };
        }
        state.stop_timing_with_sample_scaled(N_ELEMENTS as u64)?;
    }
    Ok(())
}

pub fn register(registry: &mut BenchmarkRegistry) -> Result<()> {
    registry.add(malloc_single()?)?;
    registry.add(malloc_realloc()?)?;
    registry.add(malloc_multi()?)?;
    Ok(())
}
