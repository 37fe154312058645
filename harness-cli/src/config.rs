use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::record::StatPrintFormat;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "libcbench.toml";

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

fn default_min_time_ms() -> u64 {
    1000
}

fn default_max_iterations() -> u64 {
    1_000_000_000
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Profile {
    /// Minimum measured time per run when auto-tuning the iteration count.
    #[serde(default = "default_min_time_ms")]
    pub min_time_ms: u64,
    /// Upper bound for auto-tuned iteration counts.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
    /// Fixed iteration count. Disables auto-tuning.
    #[serde(default)]
    pub iterations: Option<u64>,
    /// Run each case once before measuring it.
    #[serde(default = "default_true")]
    pub warmup: bool,
    /// Only run cases whose label contains one of these.
    #[serde(default)]
    pub filter: Vec<String>,
    #[serde(default)]
    pub format: StatPrintFormat,
    /// Append results to this CSV file.
    #[serde(default)]
    pub csv: Option<PathBuf>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            min_time_ms: default_min_time_ms(),
            max_iterations: default_max_iterations(),
            iterations: None,
            warmup: true,
            filter: Vec::new(),
            format: StatPrintFormat::default(),
            csv: None,
        }
    }
}

impl Profile {
    pub fn selects(&self, label: &str) -> bool {
        self.filter.is_empty() || self.filter.iter().any(|f| label.contains(f.as_str()))
    }
}

impl Config {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            anyhow::bail!("Failed to load {}", path.display());
        }
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Load `path`, or the default config file if it exists, or fall back to
    /// built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    /// Look up a profile. `default` always exists.
    pub fn profile(&self, name: &str) -> anyhow::Result<Profile> {
        match self.profiles.get(name) {
            Some(p) => Ok(p.clone()),
            None if name == "default" => Ok(Profile::default()),
            None => anyhow::bail!("Could not find profile `{}`", name),
        }
    }
}
