// tests/logging_filter.rs

use native_harness::cli::LogLevel;
use native_harness::logging::build_filter;
use tracing_subscriber::filter::LevelFilter;

#[test]
fn cli_level_wins_over_environment() {
    let filter = build_filter(Some(LogLevel::Debug), Some("trace"));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
}

#[test]
fn environment_accepts_per_target_directives() {
    let filter = build_filter(None, Some("native_harness::exec=trace,warn"));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
}

#[test]
fn missing_or_invalid_environment_defaults_to_info() {
    for value in [None, Some(""), Some("native_harness=loud")] {
        let filter = build_filter(None, value);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO), "value {value:?}");
    }
}
