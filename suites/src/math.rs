use std::num::FpCategory;

use libcbench::{bench, black_box, ArgumentSweep, BenchmarkRegistry, Result, State};

#[link(name = "m")]
extern "C" {
    fn logb(x: f64) -> f64;
    fn fabs(x: f64) -> f64;
}

/// glibc's out-of-line classification entry points and the fenv calls.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
mod glibc {
    use libc::c_int;

    /// Large enough for `fenv_t` on every glibc target.
    #[repr(C, align(16))]
    #[allow(dead_code)]
    pub struct FenvT([u8; 64]);

    impl FenvT {
        pub fn zeroed() -> Self {
            Self([0; 64])
        }
    }

    pub const FE_TONEAREST: c_int = 0;

    #[link(name = "m")]
    extern "C" {
        pub fn __finite(x: f64) -> c_int;
        pub fn __isinf(x: f64) -> c_int;
        pub fn __isnan(x: f64) -> c_int;
        pub fn __signbit(x: f64) -> c_int;
        pub fn feholdexcept(envp: *mut FenvT) -> c_int;
        pub fn fesetround(round: c_int) -> c_int;
        pub fn feupdateenv(envp: *const FenvT) -> c_int;
        pub fn fesetenv(envp: *const FenvT) -> c_int;
    }
}

/// 1234.0, NaN, +inf and 0.0.
pub fn common_vals() -> Result<ArgumentSweep> {
    ArgumentSweep::builder()
        .add(1234.0)
        .add(f64::NAN)
        .add(f64::INFINITY)
        .add(0.0)
        .build()
}

/// Time `op` once per iteration, summing its results into the sink.
fn accumulate(state: &mut State, mut op: impl FnMut() -> f64) -> Result<()> {
    let mut d = 0.0;
    for _ in 0..state.iterations() {
        state.start_timing()?;
        d += op();
        state.stop_timing_with_sample()?;
    }
    state.observe(d);
    Ok(())
}

/// `FP_*` numbering as used by C's `fpclassify`.
fn fp_class(x: f64) -> i32 {
    match x.classify() {
        FpCategory::Nan => 0,
        FpCategory::Infinite => 1,
        FpCategory::Zero => 2,
        FpCategory::Subnormal => 3,
        FpCategory::Normal => 4,
    }
}

#[bench]
fn math_sqrt(state: &mut State) -> Result<()> {
    accumulate(state, || black_box(2.0f64).sqrt())
}

#[bench]
fn math_log10(state: &mut State) -> Result<()> {
    accumulate(state, || black_box(1234.0f64).log10())
}

#[bench]
fn math_logb(state: &mut State) -> Result<()> {
    accumulate(state, || unsafe { logb(black_box(1234.0)) })
}

#[bench(args = common_vals)]
fn math_isfinite_macro(state: &mut State, value: f64) -> Result<()> {
    accumulate(state, || black_box(value).is_finite() as i32 as f64)
}

#[bench(args = common_vals)]
fn math_isinf_macro(state: &mut State, value: f64) -> Result<()> {
    accumulate(state, || black_box(value).is_infinite() as i32 as f64)
}

#[bench(args = common_vals)]
fn math_isnan_macro(state: &mut State, value: f64) -> Result<()> {
    accumulate(state, || black_box(value).is_nan() as i32 as f64)
}

#[bench(args = common_vals)]
fn math_isnormal_macro(state: &mut State, value: f64) -> Result<()> {
    accumulate(state, || black_box(value).is_normal() as i32 as f64)
}

#[bench(args = common_vals)]
fn math_fpclassify(state: &mut State, value: f64) -> Result<()> {
    accumulate(state, || fp_class(black_box(value)) as f64)
}

#[bench(args = common_vals)]
fn math_signbit_macro(state: &mut State, value: f64) -> Result<()> {
    accumulate(state, || black_box(value).is_sign_negative() as i32 as f64)
}

#[bench(args = common_vals)]
fn math_fabs_macro(state: &mut State, value: f64) -> Result<()> {
    accumulate(state, || black_box(value).abs())
}

#[bench(args = common_vals)]
fn math_fabs(state: &mut State, value: f64) -> Result<()> {
    accumulate(state, || unsafe { fabs(black_box(value)) })
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[bench(args = common_vals)]
fn math_isfinite(state: &mut State, value: f64) -> Result<()> {
    accumulate(state, || unsafe { glibc::__finite(black_box(value)) as f64 })
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[bench(args = common_vals)]
fn math_isinf(state: &mut State, value: f64) -> Result<()> {
    accumulate(state, || unsafe { glibc::__isinf(black_box(value)) as f64 })
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[bench(args = common_vals)]
fn math_isnan(state: &mut State, value: f64) -> Result<()> {
    accumulate(state, || unsafe { glibc::__isnan(black_box(value)) as f64 })
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[bench(args = common_vals)]
fn math_signbit(state: &mut State, value: f64) -> Result<()> {
    accumulate(state, || unsafe { glibc::__signbit(black_box(value)) as f64 })
}

#[bench]
fn math_sin_fast(state: &mut State) -> Result<()> {
    let mut d = 1.0f64;
    for _ in 0..state.iterations() {
        state.start_timing()?;
        d += black_box(d).sin();
        state.stop_timing_with_sample()?;
    }
    state.observe(d);
    Ok(())
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[bench]
fn math_sin_feupdateenv(state: &mut State) -> Result<()> {
    let mut d = 1.0f64;
    for _ in 0..state.iterations() {
        state.start_timing()?;
        let mut saved = glibc::FenvT::zeroed();
        unsafe {
            glibc::feholdexcept(&mut saved);
            glibc::fesetround(glibc::FE_TONEAREST);
        }
        d += black_box(d).sin();
        unsafe { glibc::feupdateenv(&saved) };
        state.stop_timing_with_sample()?;
    }
    state.observe(d);
    Ok(())
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[bench]
fn math_sin_fesetenv(state: &mut State) -> Result<()> {
    let mut d = 1.0f64;
    for _ in 0..state.iterations() {
        state.start_timing()?;
        let mut saved = glibc::FenvT::zeroed();
        unsafe {
            glibc::feholdexcept(&mut saved);
            glibc::fesetround(glibc::FE_TONEAREST);
        }
        d += black_box(d).sin();
        unsafe { glibc::fesetenv(&saved) };
        state.stop_timing_with_sample()?;
    }
    state.observe(d);
    Ok(())
}

pub fn register(registry: &mut BenchmarkRegistry) -> Result<()> {
    registry.add(math_sqrt()?)?;
    registry.add(math_log10()?)?;
    registry.add(math_logb()?)?;
    registry.add(math_isfinite_macro()?)?;
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    registry.add(math_isfinite()?)?;
    registry.add(math_isinf_macro()?)?;
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    registry.add(math_isinf()?)?;
    registry.add(math_isnan_macro()?)?;
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    registry.add(math_isnan()?)?;
    registry.add(math_isnormal_macro()?)?;
    registry.add(math_sin_fast()?)?;
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    {
        registry.add(math_sin_feupdateenv()?)?;
        registry.add(math_sin_fesetenv()?)?;
    }
    registry.add(math_fpclassify()?)?;
    registry.add(math_signbit_macro()?)?;
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    registry.add(math_signbit()?)?;
    registry.add(math_fabs_macro()?)?;
    registry.add(math_fabs()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fp_class_follows_c_numbering() {
        assert_eq!(fp_class(f64::NAN), 0);
        assert_eq!(fp_class(f64::INFINITY), 1);
        assert_eq!(fp_class(0.0), 2);
        assert_eq!(fp_class(f64::MIN_POSITIVE / 2.0), 3);
        assert_eq!(fp_class(1234.0), 4);
    }

    #[test]
    fn common_vals_are_floats_in_order() {
        let sweep = common_vals().unwrap();
        let labels: Vec<_> = sweep.iter().map(|v| v.to_string()).collect();
        assert_eq!(labels, vec!["1234", "nan", "inf", "0"]);
    }

    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    #[test]
    fn glibc_classifiers_agree_with_intrinsics() {
        for v in [1234.0, f64::NAN, f64::INFINITY, 0.0, -1.0] {
            unsafe {
                assert_eq!(glibc::__finite(v) != 0, v.is_finite());
                assert_eq!(glibc::__isnan(v) != 0, v.is_nan());
                assert_eq!(glibc::__isinf(v) != 0, v.is_infinite());
                assert_eq!(glibc::__signbit(v) != 0, v.is_sign_negative());
            }
        }
    }
}
