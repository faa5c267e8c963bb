// src/output.rs

//! Live consumers of captured output.

use std::io::Write;

/// Receives output as it is captured.
///
/// `channel` tags the origin of a line; the harness itself uses `None` for
/// both its own `Executing ...` notice and the child's merged stream.
/// Implementations are called from the output reader thread.
pub trait ClientOutput: Send + Sync {
    fn accept(&self, channel: Option<&str>, line: &str);
}

impl<F> ClientOutput for F
where
    F: Fn(Option<&str>, &str) + Send + Sync,
{
    fn accept(&self, channel: Option<&str>, line: &str) {
        self(channel, line)
    }
}

/// Echoes every line to stdout, prefixed with the channel when there is one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOutput;

impl ClientOutput for ConsoleOutput {
    fn accept(&self, channel: Option<&str>, line: &str) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        // A closed stdout must not take the reader thread down with it.
        let _ = match channel {
            Some(ch) => writeln!(out, "[{ch}] {line}"),
            None => writeln!(out, "{line}"),
        };
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl ClientOutput for NullOutput {
    fn accept(&self, _channel: Option<&str>, _line: &str) {}
}
