// src/exec/client.rs

//! Facade that builds the command line, supervises one run and packages the
//! outcome.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::command::{CommandBuilder, CommandLine, EnvOverrides, host_thread_count};
use crate::config::ConfigFile;
use crate::errors::{HarnessError, Result};
use crate::exec::sink::OutputSink;
use crate::exec::supervisor::{DEFAULT_DRAIN_TIMEOUT, Supervisor};
use crate::layout::ClientLayout;
use crate::output::ClientOutput;
use crate::result::ExecutionResult;
use crate::types::MIN_THREADS;

/// Something that can run the executable under test once.
///
/// Production code uses [`NativeClient`]; tests can provide an implementation
/// that returns canned results without spawning anything.
pub trait Client: Send + Sync {
    fn execute<'a>(
        &'a self,
        output: Arc<dyn ClientOutput>,
        args: Vec<String>,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + 'a>>;
}

/// Runs a native executable with layout-derived defaults under a deadline.
#[derive(Debug, Clone)]
pub struct NativeClient {
    layout: ClientLayout,
    executable: PathBuf,
    timeout: Duration,
    drain_timeout: Duration,
    min_threads: usize,
    extra_env: BTreeMap<String, String>,
}

impl NativeClient {
    pub fn new(layout: ClientLayout, executable: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            layout,
            executable: executable.into(),
            timeout,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
            min_threads: MIN_THREADS,
            extra_env: BTreeMap::new(),
        }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(cfg.layout.clone(), &cfg.harness.executable, cfg.timeout())
            .with_min_threads(cfg.harness.min_threads)
            .with_drain_timeout(cfg.drain_timeout())
            .with_env(cfg.env.clone())
    }

    pub fn with_min_threads(mut self, min_threads: usize) -> Self {
        self.min_threads = min_threads;
        self
    }

    pub fn with_drain_timeout(mut self, drain_timeout: Duration) -> Self {
        self.drain_timeout = drain_timeout;
        self
    }

    /// Extra variables exported to every run. The layout-derived homes take
    /// precedence over entries with the same name.
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.extra_env = env;
        self
    }

    pub fn layout(&self) -> &ClientLayout {
        &self.layout
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Command line and environment overrides a run with `args` would use.
    ///
    /// The executable path must be valid UTF-8: it becomes the first element
    /// of the recorded argument vector and is spawned from there.
    pub fn prepare<S: AsRef<str>>(&self, args: &[S]) -> Result<(CommandLine, EnvOverrides)> {
        let program = self.executable.to_str().ok_or_else(|| {
            HarnessError::ConfigError(format!(
                "executable path is not valid UTF-8: {}",
                self.executable.display()
            ))
        })?;

        let threads = host_thread_count(self.min_threads);
        let command = CommandBuilder::new(program, &self.layout, threads).build(args);

        let mut env = EnvOverrides::for_args(&self.layout, args);
        env.extend_missing(self.extra_env.iter().map(|(k, v)| (k.clone(), v.clone())));

        Ok((command, env))
    }

    /// Run the executable once with `args`, echoing output to `output`.
    ///
    /// Only a failure to launch is an `Err`; non-zero exits and timeouts are
    /// reported through the returned [`ExecutionResult`].
    pub async fn run<S: AsRef<str>>(
        &self,
        output: Arc<dyn ClientOutput>,
        args: &[S],
    ) -> Result<ExecutionResult> {
        let (command, env) = self.prepare(args)?;

        info!(cmd = %command, timeout_ms = self.timeout.as_millis() as u64, "executing");
        output.accept(None, &format!("Executing {command}"));

        let sink = OutputSink::new(Arc::clone(&output));
        let mut supervisor = Supervisor::start(&command, self.layout.user_dir(), &env, sink.clone())?
            .with_drain_timeout(self.drain_timeout);

        let exit_code = supervisor.wait_for(self.timeout).await?;
        drop(supervisor);

        let log = sink.snapshot();
        debug!(exit_code, lines = log.len(), "run finished");
        Ok(ExecutionResult::new(command.as_slice(), exit_code, log))
    }
}

impl Client for NativeClient {
    fn execute<'a>(
        &'a self,
        output: Arc<dyn ClientOutput>,
        args: Vec<String>,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + 'a>> {
        Box::pin(async move { self.run(output, &args).await })
    }
}
