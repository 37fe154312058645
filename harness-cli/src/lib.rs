//! Driver for the libcbench microbenchmarks: selects cases, tunes iteration
//! counts, and reports or saves the results.

use clap::{Parser, Subcommand};
use colored::Colorize;
use once_cell::sync::Lazy;

#[macro_use]
mod utils;
pub mod commands;
pub mod config;
mod meta;
pub mod record;

/// libc microbenchmark driver
#[derive(Parser)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    List(commands::list::ListArgs),
    Run(commands::run::RunArgs),
}

static CMD_ARGS: Lazy<Cli> = Lazy::new(|| {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    Cli::parse()
});

#[doc(hidden)]
pub fn main() -> anyhow::Result<()> {
    let cli = &*CMD_ARGS;
    env_logger::init();
    let result = match &cli.command {
        Commands::List(cmd) => cmd.run(),
        Commands::Run(cmd) => cmd.run(),
    };
    if let Err(err) = result {
        eprintln!("❌ {}: {}", "ERROR".red().bold(), err.to_string().red());
        std::process::exit(1);
    }
    Ok(())
}
