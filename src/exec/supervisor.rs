// src/exec/supervisor.rs

//! Deadline-bound ownership of one child process.

use std::io::{BufRead, BufReader, PipeReader};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::command::{CommandLine, EnvOverrides};
use crate::errors::{HarnessError, Result};
use crate::exec::sink::OutputSink;
use crate::types::TIMEOUT_EXIT_CODE;

/// Upper bound on waiting for a killed process to be reaped.
const KILL_GRACE: Duration = Duration::from_secs(5);

/// Default time allowed for the output reader to reach EOF once the process
/// has exited.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// A running child process plus the thread draining its output.
///
/// The child's stderr and stdout share one pipe, so the captured order is the
/// order in which the child wrote. On Unix the child leads a fresh process
/// group and termination is delivered to the whole group.
///
/// Dropping a `Supervisor` releases everything: a process that is still
/// running is killed, and the reader thread is left to hit EOF on its own.
/// This holds on every path out of the caller, including `?` and panics.
pub struct Supervisor {
    child: Child,
    pid: Option<u32>,
    command: String,
    reader: Option<JoinHandle<()>>,
    drain_timeout: Duration,
}

impl Supervisor {
    /// Spawn `command` in `working_dir` with `env` applied on top of the
    /// inherited environment. Captured lines go to `sink`.
    ///
    /// Any failure to get the process running is a [`HarnessError::Launch`].
    /// Must be called from within a Tokio runtime; the output reader runs on
    /// its blocking pool.
    pub fn start(
        command: &CommandLine,
        working_dir: &Path,
        env: &EnvOverrides,
        sink: OutputSink,
    ) -> Result<Self> {
        let launch_error = |source: std::io::Error| HarnessError::Launch {
            command: command.to_string(),
            source,
        };

        let (pipe_reader, pipe_writer) = std::io::pipe().map_err(launch_error)?;
        let stderr_writer = pipe_writer.try_clone().map_err(launch_error)?;

        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(pipe_writer)
            .stderr(stderr_writer)
            .kill_on_drop(true);
        for (name, value) in env.iter() {
            cmd.env(name, value);
        }
        #[cfg(unix)]
        cmd.process_group(0);

        let child = cmd.spawn().map_err(launch_error)?;
        // The command still holds our copies of the write end; the reader only
        // sees EOF once they are gone.
        drop(cmd);

        let pid = child.id();
        info!(pid, cmd = %command, dir = %working_dir.display(), "started process");

        let reader = tokio::task::spawn_blocking(move || drain_lines(pipe_reader, sink));

        Ok(Self {
            child,
            pid,
            command: command.to_string(),
            reader: Some(reader),
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        })
    }

    /// Override how long [`Supervisor::wait_for`] keeps collecting output
    /// after the process is gone.
    pub fn with_drain_timeout(mut self, drain_timeout: Duration) -> Self {
        self.drain_timeout = drain_timeout;
        self
    }

    /// OS process id captured at spawn.
    pub fn id(&self) -> Option<u32> {
        self.pid
    }

    /// Wait until the process exits or `deadline` elapses.
    ///
    /// On expiry the process is killed and [`TIMEOUT_EXIT_CODE`] is returned.
    /// Either way, the output reader has reached EOF (or been given up on
    /// after the drain timeout) by the time this returns, so the sink is
    /// final.
    pub async fn wait_for(&mut self, deadline: Duration) -> Result<i32> {
        let code = match tokio::time::timeout(deadline, self.child.wait()).await {
            Ok(status) => {
                let code = exit_code(status?);
                info!(pid = self.pid, exit_code = code, "process exited");
                code
            }
            Err(_elapsed) => {
                warn!(
                    pid = self.pid,
                    timeout_ms = deadline.as_millis() as u64,
                    cmd = %self.command,
                    "deadline elapsed; killing process"
                );
                self.terminate().await;
                TIMEOUT_EXIT_CODE
            }
        };

        self.drain_output().await;
        Ok(code)
    }

    /// Kill the process group and reap the leader, bounded by [`KILL_GRACE`].
    async fn terminate(&mut self) {
        self.kill_group();
        match tokio::time::timeout(KILL_GRACE, self.child.kill()).await {
            Ok(Ok(())) => debug!(pid = self.pid, "process killed"),
            Ok(Err(e)) => warn!(pid = self.pid, error = %e, "failed to kill process"),
            Err(_) => warn!(
                pid = self.pid,
                grace_ms = KILL_GRACE.as_millis() as u64,
                "process did not die within grace period"
            ),
        }
    }

    /// Wait for the reader to hit EOF.
    ///
    /// Leftover members of the process group can keep the pipe open after the
    /// leader exits; they are killed once the drain timeout passes.
    async fn drain_output(&mut self) {
        let Some(mut reader) = self.reader.take() else {
            return;
        };

        if tokio::time::timeout(self.drain_timeout, &mut reader).await.is_ok() {
            debug!(pid = self.pid, "output drained");
            return;
        }

        warn!(
            pid = self.pid,
            "output still open after process exit; killing remaining process group"
        );
        self.kill_group();

        if tokio::time::timeout(self.drain_timeout, &mut reader).await.is_err() {
            warn!(pid = self.pid, "output reader did not finish; captured log may be incomplete");
        }
    }

    #[cfg(unix)]
    fn kill_group(&self) {
        use nix::errno::Errno;
        use nix::sys::signal::{Signal, killpg};
        use nix::unistd::Pid;

        let Some(pid) = self.pid else {
            return;
        };
        match killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
            Ok(()) | Err(Errno::ESRCH) => {}
            Err(e) => warn!(pid, error = %e, "failed to signal process group"),
        }
    }

    #[cfg(not(unix))]
    fn kill_group(&self) {}
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        let reader_running = self.reader.as_ref().is_some_and(|r| !r.is_finished());

        match self.child.try_wait() {
            Ok(Some(_)) => {
                if reader_running {
                    self.kill_group();
                }
            }
            Ok(None) => {
                debug!(pid = self.pid, "releasing supervisor with process still running");
                self.kill_group();
                if let Err(e) = self.child.start_kill() {
                    warn!(pid = self.pid, error = %e, "failed to kill process on release");
                }
            }
            Err(e) => {
                warn!(pid = self.pid, error = %e, "failed to query process state on release");
                self.kill_group();
            }
        }
        // The reader thread owns the read end and exits at EOF; dropping the
        // handle detaches it.
    }
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("pid", &self.pid)
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

/// Read the merged stream line by line into `sink` until EOF.
fn drain_lines(pipe: PipeReader, sink: OutputSink) {
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => sink.append(decode_line(&buf)),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(error = %e, "error reading process output");
                break;
            }
        }
    }
}

/// Strip the line terminator and decode, replacing invalid UTF-8.
fn decode_line(buf: &[u8]) -> String {
    let mut end = buf.len();
    if end > 0 && buf[end - 1] == b'\n' {
        end -= 1;
        if end > 0 && buf[end - 1] == b'\r' {
            end -= 1;
        }
    }
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

/// Exit code for `status`; signal deaths map to `128 + signal` on Unix.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}
