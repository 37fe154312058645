use clap::Parser;
use libcbench::{ArgumentSweep, BenchmarkCase, BenchmarkRegistry, State};
use libcbench_cli::commands::{list::ListArgs, run::RunArgs};
use tempdir::TempDir;

fn copy(state: &mut State, nbytes: usize) -> libcbench::Result<()> {
    let src = vec![1u8; nbytes];
    let mut dst = vec![0u8; nbytes];
    for _ in 0..state.iterations() {
        state.start_timing()?;
        dst.copy_from_slice(&src);
        state.stop_timing_with_sample()?;
        state.observe(&dst);
    }
    state.set_bytes_processed(state.iterations() * nbytes as u64)
}

fn registry(with_fault: bool) -> anyhow::Result<BenchmarkRegistry> {
    let mut registry = BenchmarkRegistry::new();
    let sizes = ArgumentSweep::builder().add(8).add(64).build()?;
    registry.add(BenchmarkCase::with_arg("copy", sizes, copy)?)?;
    if with_fault {
        registry.add(BenchmarkCase::no_arg("faulty", |_: &mut State| -> libcbench::Result<()> {
            panic!("routine fault")
        })?)?;
    }
    Ok(registry)
}

fn read_csv(dir: &TempDir) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(dir.path().join("results.csv"))?;
    Ok(content.lines().map(|l| l.to_owned()).collect())
}

#[test]
fn csv_rows_are_appended() -> anyhow::Result<()> {
    let dir = TempDir::new("libcbench")?;
    let config = dir.path().join("libcbench.toml");
    std::fs::write(&config, "[profiles.quick]\nwarmup = false\nformat = \"json\"\n")?;
    let csv = dir.path().join("results.csv");
    let args = RunArgs::parse_from([
        "run",
        "--profile",
        "quick",
        "--config",
        config.to_str().unwrap(),
        "-n",
        "3",
        "--csv",
        csv.to_str().unwrap(),
    ]);
    args.run_registry(&registry(false)?)?;
    let lines = read_csv(&dir)?;
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "runid,bench,iterations,mean_ns,stddev_ns,bytes_per_sec"
    );
    assert!(lines[1].starts_with("quick-"));
    assert!(lines[1].contains(",copy/8,3,"));
    assert!(lines[2].contains(",copy/64,3,"));
    // A second run appends without repeating the header.
    args.run_registry(&registry(false)?)?;
    let lines = read_csv(&dir)?;
    assert_eq!(lines.len(), 5);
    assert_eq!(lines.iter().filter(|l| l.starts_with("runid,")).count(), 1);
    Ok(())
}

#[test]
fn faults_fail_the_run_but_keep_other_results() -> anyhow::Result<()> {
    let dir = TempDir::new("libcbench")?;
    let csv = dir.path().join("results.csv");
    let args = RunArgs::parse_from([
        "run",
        "-n",
        "2",
        "--no-warmup",
        "--format",
        "yaml",
        "--csv",
        csv.to_str().unwrap(),
    ]);
    let err = args.run_registry(&registry(true)?).unwrap_err();
    assert!(err.to_string().contains("faulty"));
    let lines = read_csv(&dir)?;
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| !l.contains("faulty")));
    Ok(())
}

#[test]
fn filter_selects_runs() -> anyhow::Result<()> {
    let dir = TempDir::new("libcbench")?;
    let csv = dir.path().join("results.csv");
    let args = RunArgs::parse_from([
        "run",
        "-n",
        "1",
        "--filter",
        "copy/64",
        "--csv",
        csv.to_str().unwrap(),
    ]);
    args.run_registry(&registry(true)?)?;
    let lines = read_csv(&dir)?;
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains(",copy/64,1,"));
    Ok(())
}

#[test]
fn unmatched_filter_is_an_error() -> anyhow::Result<()> {
    let args = RunArgs::parse_from(["run", "-n", "1", "--filter", "nothing"]);
    assert!(args.run_registry(&registry(false)?).is_err());
    Ok(())
}

#[test]
fn list_suite_labels() -> anyhow::Result<()> {
    let registry = libcbench_suites::registry()?;
    let all = ListArgs::parse_from(["list"]).labels(&registry);
    assert_eq!(all.len(), registry.runs().count());
    assert_eq!(all[0], "malloc_single/512");
    let memcpy = ListArgs::parse_from(["list", "--filter", "string_memcpy"]).labels(&registry);
    assert_eq!(
        memcpy,
        vec![
            "string_memcpy/8",
            "string_memcpy/64",
            "string_memcpy/512",
            "string_memcpy/1024",
            "string_memcpy/8192",
            "string_memcpy/16384",
            "string_memcpy/32768",
            "string_memcpy/65536",
        ]
    );
    Ok(())
}
