// src/exec/sink.rs

//! Append-only log of captured lines shared between the output reader and
//! whoever builds the final result.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::output::ClientOutput;

/// Thread-safe, ordered record of captured output.
///
/// Cloning yields another handle onto the same log. Every line is stored
/// before it is forwarded to the live consumer, so a consumer that panics can
/// never cost the log a line.
#[derive(Clone)]
pub struct OutputSink {
    lines: Arc<Mutex<Vec<String>>>,
    live: Arc<dyn ClientOutput>,
}

impl OutputSink {
    pub fn new(live: Arc<dyn ClientOutput>) -> Self {
        Self {
            lines: Arc::new(Mutex::new(Vec::new())),
            live,
        }
    }

    /// Store `line`, then forward it to the live consumer.
    pub fn append(&self, line: impl Into<String>) {
        let line = line.into();
        self.lines.lock().push(line.clone());

        // Forward outside the lock so a slow consumer never blocks snapshots.
        let live = &self.live;
        if catch_unwind(AssertUnwindSafe(|| live.accept(None, &line))).is_err() {
            warn!("live output consumer panicked; line kept in captured log");
        }
    }

    /// Copy of every line captured so far, in arrival order.
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSink")
            .field("lines", &self.len())
            .finish_non_exhaustive()
    }
}
