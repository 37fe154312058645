//! String and memory primitives over buffers of increasing size.
//!
//! `memcmp` through `strlen` time each call separately. The search and
//! compare routines below them time the whole loop as one region, which the
//! harness reports per iteration. Buffer pointers pass through `black_box`
//! on every call so the calls stay inside the loop.

use libc::{c_char, c_int, c_void};
use libcbench::{bench, black_box, ArgumentSweep, BenchmarkRegistry, Result, State};

use crate::KB;

/// 8 bytes up to 64 KiB.
pub fn common_sizes() -> Result<ArgumentSweep> {
    ArgumentSweep::builder()
        .add(8)
        .add(64)
        .add(512)
        .add(KB)
        .range(8 * KB, 64 * KB, 2)
        .build()
}

/// `nbytes` of `'x'` with a trailing NUL, so the string length is `nbytes - 1`.
fn c_string(nbytes: usize) -> Vec<u8> {
    let mut s = vec![b'x'; nbytes];
    if let Some(last) = s.last_mut() {
        *last = 0;
    }
    s
}

fn set_bytes(state: &mut State, nbytes: usize) -> Result<()> {
    let total = state.iterations() * nbytes as u64;
    state.set_bytes_processed(total)
}

#[bench(args = common_sizes)]
fn string_memcmp(state: &mut State, nbytes: usize) -> Result<()> {
    let src = vec![b'x'; nbytes];
    let dst = vec![b'x'; nbytes];
    for _ in 0..state.iterations() {
        state.start_timing()?;
        let c = unsafe {
            libc::memcmp(
                black_box(dst.as_ptr()) as *const c_void,
                black_box(src.as_ptr()) as *const c_void,
                nbytes,
            )
        };
        state.observe(c);
        state.stop_timing_with_sample()?;
    }
    set_bytes(state, nbytes)
}

#[bench(args = common_sizes)]
fn string_memcpy(state: &mut State, nbytes: usize) -> Result<()> {
    let src = vec![b'x'; nbytes];
    let mut dst = vec![0u8; nbytes];
    for _ in 0..state.iterations() {
        state.start_timing()?;
        unsafe {
            libc::memcpy(
                black_box(dst.as_mut_ptr()) as *mut c_void,
                black_box(src.as_ptr()) as *const c_void,
                nbytes,
            )
        };
        state.stop_timing_with_sample()?;
    }
    state.observe(&dst);
    set_bytes(state, nbytes)
}

#[bench(args = common_sizes)]
fn string_memmove(state: &mut State, nbytes: usize) -> Result<()> {
    let mut buf = vec![b'x'; nbytes + 64];
    let base = buf.as_mut_ptr();
    for _ in 0..state.iterations() {
        state.start_timing()?;
        // Worst-case overlap.
        let base = black_box(base);
        unsafe { libc::memmove(base as *mut c_void, base.add(1) as *const c_void, nbytes) };
        state.stop_timing_with_sample()?;
    }
    state.observe(&buf);
    set_bytes(state, nbytes)
}

#[bench(args = common_sizes)]
fn string_memset(state: &mut State, nbytes: usize) -> Result<()> {
    let mut dst = vec![0u8; nbytes];
    for _ in 0..state.iterations() {
        state.start_timing()?;
        unsafe { libc::memset(black_box(dst.as_mut_ptr()) as *mut c_void, 0, nbytes) };
        state.stop_timing_with_sample()?;
    }
    state.observe(&dst);
    set_bytes(state, nbytes)
}

#[bench(args = common_sizes)]
fn string_strlen(state: &mut State, nbytes: usize) -> Result<()> {
    let s = c_string(nbytes);
    for _ in 0..state.iterations() {
        state.start_timing()?;
        let c = unsafe { libc::strlen(black_box(s.as_ptr()) as *const c_char) };
        state.observe(c);
        state.stop_timing_with_sample()?;
    }
    set_bytes(state, nbytes)
}

#[bench(args = common_sizes)]
fn string_strrchr(state: &mut State, nbytes: usize) -> Result<()> {
    let s = c_string(nbytes);
    state.start_timing()?;
    for _ in 0..state.iterations() {
        let c = unsafe { libc::strrchr(black_box(s.as_ptr()) as *const c_char, b'y' as c_int) };
        state.observe(c);
    }
    state.stop_timing()?;
    set_bytes(state, nbytes)
}

#[bench(args = common_sizes)]
fn string_strcmp(state: &mut State, nbytes: usize) -> Result<()> {
    let src = c_string(nbytes);
    let dst = c_string(nbytes);
    state.start_timing()?;
    for _ in 0..state.iterations() {
        let c = unsafe {
            libc::strcmp(
                black_box(dst.as_ptr()) as *const c_char,
                black_box(src.as_ptr()) as *const c_char,
            )
        };
        state.observe(c);
    }
    state.stop_timing()?;
    set_bytes(state, nbytes)
}

#[bench(args = common_sizes)]
fn string_strncmp(state: &mut State, nbytes: usize) -> Result<()> {
    let src = c_string(nbytes);
    let dst = c_string(nbytes);
    state.start_timing()?;
    for _ in 0..state.iterations() {
        let c = unsafe {
            libc::strncmp(
                black_box(dst.as_ptr()) as *const c_char,
                black_box(src.as_ptr()) as *const c_char,
                nbytes - 1,
            )
        };
        state.observe(c);
    }
    state.stop_timing()?;
    set_bytes(state, nbytes)
}

#[bench(args = common_sizes)]
fn string_memchr(state: &mut State, nbytes: usize) -> Result<()> {
    let s = c_string(nbytes);
    state.start_timing()?;
    for _ in 0..state.iterations() {
        let c = unsafe {
            libc::memchr(black_box(s.as_ptr()) as *const c_void, b'y' as c_int, nbytes - 1)
        };
        state.observe(c);
    }
    state.stop_timing()?;
    set_bytes(state, nbytes)
}

#[cfg(target_os = "linux")]
#[bench(args = common_sizes)]
fn string_memrchr(state: &mut State, nbytes: usize) -> Result<()> {
    let s = c_string(nbytes);
    state.start_timing()?;
    for _ in 0..state.iterations() {
        let c = unsafe {
            libc::memrchr(black_box(s.as_ptr()) as *const c_void, b'y' as c_int, nbytes - 1)
        };
        state.observe(c);
    }
    state.stop_timing()?;
    set_bytes(state, nbytes)
}

#[bench(args = common_sizes)]
fn string_strchr(state: &mut State, nbytes: usize) -> Result<()> {
    let s = c_string(nbytes);
    state.start_timing()?;
    for _ in 0..state.iterations() {
        let c = unsafe { libc::strchr(black_box(s.as_ptr()) as *const c_char, b'y' as c_int) };
        state.observe(c);
    }
    state.stop_timing()?;
    set_bytes(state, nbytes)
}

pub fn register(registry: &mut BenchmarkRegistry) -> Result<()> {
    registry.add(string_memcmp()?)?;
    registry.add(string_memcpy()?)?;
    registry.add(string_memmove()?)?;
    registry.add(string_memset()?)?;
    registry.add(string_strlen()?)?;
    registry.add(string_strrchr()?)?;
    registry.add(string_strcmp()?)?;
    registry.add(string_strncmp()?)?;
    registry.add(string_memchr()?)?;
    #[cfg(target_os = "linux")]
    registry.add(string_memrchr()?)?;
    registry.add(string_strchr()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_sizes_cover_8_bytes_to_64_kib() {
        let labels: Vec<_> = common_sizes()
            .unwrap()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(
            labels,
            vec!["8", "64", "512", "1024", "8192", "16384", "32768", "65536"]
        );
    }

    #[test]
    fn c_string_is_nul_terminated() {
        let s = c_string(8);
        assert_eq!(s.len(), 8);
        assert_eq!(s[7], 0);
        assert_eq!(unsafe { libc::strlen(s.as_ptr() as *const c_char) }, 7);
    }
}
