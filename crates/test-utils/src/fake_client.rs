use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use native_harness::ExecutionResult;
use native_harness::errors::Result;
use native_harness::exec::Client;
use native_harness::output::ClientOutput;

/// A fake client that:
/// - records the argument lists it was asked to run
/// - replays a fixed exit code and transcript through the live consumer.
pub struct FakeClient {
    exit_code: i32,
    transcript: Vec<String>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl FakeClient {
    pub fn new(exit_code: i32, transcript: &[&str]) -> Self {
        Self {
            exit_code,
            transcript: transcript.iter().map(|s| s.to_string()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }
}

impl Client for FakeClient {
    fn execute<'a>(
        &'a self,
        output: Arc<dyn ClientOutput>,
        args: Vec<String>,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().push(args.clone());

            for line in &self.transcript {
                output.accept(None, line);
            }

            let mut argv = vec!["fake".to_string()];
            argv.extend(args);
            Ok(ExecutionResult::new(&argv, self.exit_code, self.transcript.clone()))
        })
    }
}
