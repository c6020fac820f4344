// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `suiterun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "suiterun",
    version,
    about = "Run test suites one after another, stopping at the first failure.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the suite inventory (TOML).
    ///
    /// Default: `Suites.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SUITERUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the suite plan, but don't spawn anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Write the run report as JSON to this path once the run is over.
    #[arg(long, value_name = "PATH")]
    pub report: Option<String>,
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
