// tests/result_assertions.rs

use native_harness::types::Expectation;
use native_harness::{ExecutionResult, TIMEOUT_EXIT_CODE};

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[test]
fn success_message_quotes_each_argument_and_wraps_transcript() {
    let result = ExecutionResult::new(
        &argv(&["/opt/native/client", "clean", "with space"]),
        1,
        vec!["[ERROR] boom".to_string(), "done".to_string()],
    );

    let failure = result.check_success().unwrap_err();
    assert_eq!(
        failure.message,
        "client returned 1 \"/opt/native/client\" \"clean\" \"with space\"\n\
         --- stderr+stdout start ---\n\
         [ERROR] boom\n\
         done\n\
         --- stderr+stdout end ---"
    );
}

#[test]
fn timeout_annotation_follows_command() {
    let result = ExecutionResult::new(&argv(&["client", "-x"]), TIMEOUT_EXIT_CODE, vec![]);

    let failure = result.check_success().unwrap_err();
    assert!(failure
        .message
        .starts_with(&format!("client returned {TIMEOUT_EXIT_CODE} \"client\" \"-x\" (timeout)\n")));
    assert!(result.is_timeout());
    assert!(result.check_failure().is_ok());
}

#[test]
fn failure_assertion_reports_unexpected_success() {
    let result = ExecutionResult::new(&argv(&["client", "verify"]), 0, vec!["ok".to_string()]);

    let failure = result.check_failure().unwrap_err();
    assert_eq!(
        failure.message,
        "client returned 0 instead of non-zero exit code: \"client\" \"verify\""
    );
    assert!(!failure.message.contains("ok"));
}

#[test]
fn assertions_chain_when_they_hold() {
    let ok = ExecutionResult::new(&argv(&["client"]), 0, vec![]);
    assert_eq!(ok.assert_success().exit_code(), 0);

    let bad = ExecutionResult::new(&argv(&["client"]), 2, vec![]);
    assert_eq!(bad.assert_failure().exit_code(), 2);
}

#[test]
#[should_panic(expected = "--- stderr+stdout start ---")]
fn assert_success_panics_with_transcript() {
    ExecutionResult::new(&argv(&["client"]), 7, vec!["why".to_string()]).assert_success();
}

#[test]
fn result_owns_a_copy_of_its_arguments() {
    let mut args = argv(&["client", "a"]);
    let result = ExecutionResult::new(&args, 0, vec![]);
    args.push("b".to_string());

    assert_eq!(result.args(), &["client".to_string(), "a".to_string()]);
}

#[test]
fn check_dispatches_on_expectation() {
    let ok = ExecutionResult::new(&argv(&["client"]), 0, vec![]);
    let bad = ExecutionResult::new(&argv(&["client"]), 1, vec![]);

    assert!(ok.check(Expectation::Success).is_ok());
    assert!(ok.check(Expectation::Failure).is_err());
    assert!(bad.check(Expectation::Success).is_err());
    assert!(bad.check(Expectation::Failure).is_ok());
    assert!(bad.check(Expectation::Any).is_ok());
    assert_eq!("FAILURE".parse::<Expectation>(), Ok(Expectation::Failure));
    assert!("maybe".parse::<Expectation>().is_err());
}
