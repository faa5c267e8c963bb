// tests/resource_stability.rs
//
// Kept in its own test binary: counting descriptors is only meaningful when
// no other test in the process is opening files concurrently.
#![cfg(target_os = "linux")]

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use native_harness::exec::NativeClient;
use native_harness::output::NullOutput;
use native_harness_test_utils::builders::LayoutBuilder;
use native_harness_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn open_fds() -> usize {
    std::fs::read_dir("/proc/self/fd").map(|d| d.count()).unwrap_or(0)
}

#[tokio::test]
async fn repeated_runs_do_not_leak_descriptors() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let client = NativeClient::new(
        LayoutBuilder::new(dir.path()).build(),
        "/bin/sh",
        Duration::from_secs(10),
    );
    let short_client = NativeClient::new(
        LayoutBuilder::new(dir.path()).build(),
        "/bin/sh",
        Duration::from_millis(50),
    );

    // Warm up: the runtime sets up its child-reaping machinery on first use.
    client.run(Arc::new(NullOutput), &["-c", "true"]).await?;
    short_client.run(Arc::new(NullOutput), &["-c", "sleep 5"]).await?;

    let before = open_fds();

    for i in 0..100 {
        let result = if i % 10 == 0 {
            short_client.run(Arc::new(NullOutput), &["-c", "sleep 5"]).await?
        } else {
            client.run(Arc::new(NullOutput), &["-c", "echo out; echo err >&2"]).await?
        };
        if i % 10 == 0 {
            assert!(result.is_timeout());
        } else {
            result.assert_success();
            assert_eq!(result.log().len(), 2);
        }
    }

    let after = open_fds();
    assert!(
        after <= before,
        "descriptor count grew from {before} to {after} over 100 runs"
    );
    Ok(())
}
