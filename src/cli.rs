// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::types::Expectation;

/// Command-line arguments for `native-harness`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "native-harness",
    version,
    about = "Run a native executable under a deadline and check its exit code.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Override `[harness].timeout_ms`.
    #[arg(long, value_name = "MILLIS")]
    pub timeout_ms: Option<u64>,

    /// Exit-code class the run must produce.
    #[arg(long, value_enum, default_value_t = ExpectArg::Success)]
    pub expect: ExpectArg,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `HARNESS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the command line and environment overrides without running.
    #[arg(long)]
    pub dry_run: bool,

    /// Arguments passed to the executable.
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Expected outcome as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ExpectArg {
    Success,
    Failure,
    Any,
}

impl From<ExpectArg> for Expectation {
    fn from(arg: ExpectArg) -> Self {
        match arg {
            ExpectArg::Success => Expectation::Success,
            ExpectArg::Failure => Expectation::Failure,
            ExpectArg::Any => Expectation::Any,
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
