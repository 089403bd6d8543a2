// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;
use std::thread;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `wavedag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wavedag",
    version,
    about = "Run a dependency graph of tasks in concurrent waves.",
    long_about = None
)]
pub struct CliArgs {
    /// Task file (JSON, or TOML when the extension is `.toml`).
    #[arg(short = 'f', long, value_name = "PATH")]
    pub tasks_file: PathBuf,

    /// Run only these tasks and what they depend on.
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WAVEDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Maximum number of in-process evaluations running at once.
    ///
    /// Defaults to the available parallelism.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub eval_workers: Option<u16>,

    /// Parse, validate and print the plan, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Include each task's captured output in the summary.
    #[arg(long)]
    pub show_output: bool,
}

impl CliArgs {
    pub fn eval_workers(&self) -> usize {
        match self.eval_workers {
            Some(n) => usize::from(n),
            None => thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
