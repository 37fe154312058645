use std::io::Write;
use std::{fs::OpenOptions, path::Path};

use clap::ValueEnum;
use libcbench::RunResult;
use serde::{Deserialize, Serialize};

use crate::utils::md::print_table;

#[derive(ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[clap(rename_all = "kebab_case")]
#[serde(rename_all = "kebab-case")]
pub enum StatPrintFormat {
    #[default]
    Table,
    Yaml,
    Json,
}

/// One reported line, flattened from a [`RunResult`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Row {
    pub bench: String,
    pub iterations: u64,
    pub mean_ns: f64,
    pub stddev_ns: f64,
    pub bytes_per_sec: Option<f64>,
}

impl From<&RunResult> for Row {
    fn from(r: &RunResult) -> Self {
        Self {
            bench: r.label(),
            iterations: r.iterations(),
            mean_ns: r.mean_ns(),
            stddev_ns: r.stddev_ns(),
            bytes_per_sec: r.bytes_per_second(),
        }
    }
}

fn format_rate(bytes_per_sec: Option<f64>) -> String {
    match bytes_per_sec {
        Some(v) => format!("{:.2}", v / 1e6),
        None => "-".to_owned(),
    }
}

pub(crate) struct Record<'a> {
    pub runid: &'a str,
    pub format: StatPrintFormat,
    pub rows: Vec<Row>,
}

impl<'a> Record<'a> {
    pub fn new(runid: &'a str, format: StatPrintFormat, results: &[RunResult]) -> Self {
        Self {
            runid,
            format,
            rows: results.iter().map(Row::from).collect(),
        }
    }

    fn format(&self) -> StatPrintFormat {
        let force_table = std::env::var("LIBCBENCH_STAT_FORMAT") == Ok("table".to_owned());
        if force_table {
            StatPrintFormat::Table
        } else {
            self.format
        }
    }

    pub fn render_table(&self) -> String {
        let mut s = String::new();
        s += "|benchmark|iterations|ns/op|stddev (ns)|MB/s|\n";
        s += "|:-|-:|-:|-:|-:|\n";
        for row in &self.rows {
            s += &format!(
                "|{}|{}|{:.2}|{:.2}|{}|\n",
                row.bench,
                row.iterations,
                row.mean_ns,
                row.stddev_ns,
                format_rate(row.bytes_per_sec)
            );
        }
        s
    }

    pub fn render_yaml(&self) -> String {
        let mut s = String::new();
        for row in &self.rows {
            s += &format!("{}:\n", row.bench);
            s += &format!("  iterations: {}\n", row.iterations);
            s += &format!("  mean_ns: {:.2}\n", row.mean_ns);
            s += &format!("  stddev_ns: {:.2}\n", row.stddev_ns);
            s += &format!("  mb_per_sec: {}\n", format_rate(row.bytes_per_sec));
        }
        s
    }

    pub fn render_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&self.rows)?)
    }

    pub fn dump_stdout(&self) -> anyhow::Result<()> {
        match self.format() {
            StatPrintFormat::Table => print_table(self.render_table()),
            StatPrintFormat::Yaml => print!("{}", self.render_yaml()),
            StatPrintFormat::Json => println!("{}", self.render_json()?),
        }
        Ok(())
    }

    /// Append one line per row, writing the header first if the file is new.
    pub fn dump_csv(&self, csv: &Path) -> anyhow::Result<()> {
        if !csv.exists() {
            std::fs::write(
                csv,
                "runid,bench,iterations,mean_ns,stddev_ns,bytes_per_sec\n",
            )?;
        }
        let mut file = OpenOptions::new().append(true).open(csv)?;
        for row in &self.rows {
            writeln!(
                file,
                "{},{},{},{},{},{}",
                self.runid,
                row.bench,
                row.iterations,
                row.mean_ns,
                row.stddev_ns,
                row.bytes_per_sec.map(|v| v.to_string()).unwrap_or_default()
            )?;
        }
        Ok(())
    }
}
