use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use libcbench::BenchmarkRegistry;

use crate::{
    config::{Config, Profile},
    meta::RunInfo,
    record::{Record, StatPrintFormat},
};

mod checks;
pub mod runner;
pub mod tuner;

/// Run the benchmarks
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[arg(short = 'n', long)]
    /// Fixed number of iterations. Disables auto-tuning
    pub iterations: Option<u64>,
    #[arg(long, default_value = "default")]
    /// Benchmarking profile
    pub profile: String,
    /// Path to the config file. Defaults to `libcbench.toml` if present
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Minimum measured time per run when auto-tuning
    #[arg(long)]
    pub min_time_ms: Option<u64>,
    /// Only run cases whose label contains this. May be repeated
    #[arg(long)]
    pub filter: Vec<String>,
    /// Result output format
    #[arg(long)]
    pub format: Option<StatPrintFormat>,
    /// Append results to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Skip the warm-up run
    #[arg(long, default_value = "false")]
    pub no_warmup: bool,
}

impl RunArgs {
    /// The selected profile with command line overrides applied.
    pub fn load_profile(&self) -> anyhow::Result<Profile> {
        let config = Config::load_or_default(self.config.as_deref())?;
        let mut profile = config.profile(&self.profile)?;
        if let Some(iterations) = self.iterations {
            if iterations == 0 {
                anyhow::bail!("Iteration count must be at least 1");
            }
            profile.iterations = Some(iterations);
        }
        if let Some(min_time_ms) = self.min_time_ms {
            profile.min_time_ms = min_time_ms;
        }
        if !self.filter.is_empty() {
            profile.filter = self.filter.clone();
        }
        if let Some(format) = self.format {
            profile.format = format;
        }
        if let Some(csv) = &self.csv {
            profile.csv = Some(csv.clone());
        }
        if self.no_warmup {
            profile.warmup = false;
        }
        Ok(profile)
    }

    /// Run the selected cases of `registry`, then print and save the results.
    /// Fails if any run failed.
    pub fn run_registry(&self, registry: &BenchmarkRegistry) -> anyhow::Result<()> {
        let profile = self.load_profile()?;
        let run = RunInfo::new(&self.profile);
        run.print_header();
        checks::dump_warnings(&checks::warnings(&run.system));
        eprintln!("{}\n", "Running Benchmarks...".blue());
        let outcome = runner::BenchRunner::new(&profile).run(registry)?;
        let record = Record::new(&run.runid, profile.format, &outcome.results);
        record.dump_stdout()?;
        if let Some(csv) = &profile.csv {
            record.dump_csv(csv)?;
            log::info!("Results appended to {}", csv.display());
        }
        if !outcome.is_success() {
            let labels = outcome
                .failures
                .iter()
                .map(|(label, _)| label.as_str())
                .collect::<Vec<_>>();
            anyhow::bail!("{} run(s) failed: {}", labels.len(), labels.join(", "));
        }
        Ok(())
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let registry = libcbench_suites::registry()?;
        self.run_registry(&registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_the_profile() {
        let args = RunArgs::parse_from([
            "run",
            "-n",
            "5",
            "--filter",
            "string_",
            "--format",
            "json",
            "--no-warmup",
        ]);
        let profile = args.load_profile().unwrap();
        assert_eq!(profile.iterations, Some(5));
        assert_eq!(profile.filter, vec!["string_".to_owned()]);
        assert_eq!(profile.format, StatPrintFormat::Json);
        assert!(!profile.warmup);
        assert_eq!(profile.min_time_ms, 1000);
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let args = RunArgs::parse_from(["run", "-n", "0"]);
        assert!(args.load_profile().is_err());
    }
}
