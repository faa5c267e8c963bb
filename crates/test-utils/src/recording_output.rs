use std::sync::Arc;

use parking_lot::Mutex;
use native_harness::output::ClientOutput;

/// Live consumer that remembers every `(channel, line)` it was given.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    lines: Mutex<Vec<(Option<String>, String)>>,
}

impl RecordingOutput {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All lines in arrival order, without channels.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().iter().map(|(_, l)| l.clone()).collect()
    }

    /// Lines with their channel tags.
    pub fn entries(&self) -> Vec<(Option<String>, String)> {
        self.lines.lock().clone()
    }
}

impl ClientOutput for RecordingOutput {
    fn accept(&self, channel: Option<&str>, line: &str) {
        self.lines
            .lock()
            .push((channel.map(str::to_string), line.to_string()));
    }
}
