// src/lib.rs

pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod exec;
pub mod layout;
pub mod logging;
pub mod output;
pub mod result;
pub mod types;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::exec::{Client, NativeClient};
use crate::output::{ClientOutput, ConsoleOutput};
use crate::types::Expectation;

pub use crate::errors::{AssertionFailure, HarnessError};
pub use crate::layout::ClientLayout;
pub use crate::result::ExecutionResult;
pub use crate::types::TIMEOUT_EXIT_CODE;

/// High-level entry point used by `main.rs`.
///
/// Loads the config, runs the executable once with console echo and returns
/// the process exit status for the harness itself: `0` if the outcome matched
/// `--expect`, `1` otherwise.
pub async fn run(args: CliArgs) -> Result<i32> {
    let mut cfg = load_and_validate(&args.config)?;

    if let Some(timeout_ms) = args.timeout_ms {
        if timeout_ms == 0 {
            bail!("--timeout-ms must be >= 1 (got 0)");
        }
        cfg.harness.timeout_ms = timeout_ms;
    }

    let client = NativeClient::from_config(&cfg);

    if args.dry_run {
        write_dry_run(&client, &args.args, &mut std::io::stdout().lock())?;
        return Ok(0);
    }

    let output: Arc<dyn ClientOutput> = Arc::new(ConsoleOutput);
    run_with_client(&client, output, args.args, args.expect.into()).await
}

/// Execute once through `client` and check the outcome against `expectation`.
///
/// Assertion failures are printed to stderr and turned into exit status `1`;
/// launch failures are returned as errors.
pub async fn run_with_client(
    client: &dyn Client,
    output: Arc<dyn ClientOutput>,
    args: Vec<String>,
    expectation: Expectation,
) -> Result<i32> {
    let result = client.execute(output, args).await?;

    match result.check(expectation) {
        Ok(result) => {
            info!(exit_code = result.exit_code(), %expectation, "outcome matched expectation");
            Ok(0)
        }
        Err(failure) => {
            warn!(exit_code = result.exit_code(), %expectation, "outcome did not match expectation");
            eprintln!("{failure}");
            Ok(1)
        }
    }
}

/// Write the command line and environment overrides a run would use,
/// without spawning anything.
pub fn write_dry_run<W: Write>(client: &NativeClient, args: &[String], out: &mut W) -> Result<()> {
    let (command, env) = client.prepare(args)?;

    writeln!(out, "native-harness dry-run")?;
    writeln!(out, "  dir: {}", client.layout().user_dir().display())?;
    writeln!(out, "  timeout_ms: {}", client.timeout().as_millis())?;
    writeln!(out, "  command:")?;
    for arg in command.as_slice() {
        writeln!(out, "    {arg}")?;
    }
    if !env.is_empty() {
        writeln!(out, "  env:")?;
        for (name, value) in env.iter() {
            writeln!(out, "    {name}={}", value.to_string_lossy())?;
        }
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
