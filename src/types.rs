use std::fmt;
use std::str::FromStr;

/// Exit code reported when the supervised process was killed because its
/// deadline elapsed.
///
/// Real executables report codes in `0..=255` (or `128 + signal` for signal
/// deaths), so this value can never be produced by the child itself.
pub const TIMEOUT_EXIT_CODE: i32 = i32::MIN + 42;

/// Lower bound for the injected `-T<n>` worker count.
pub const MIN_THREADS: usize = 2;

/// Which exit-code class a caller expects from a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Exit code must be zero.
    Success,
    /// Exit code must be non-zero (timeouts included).
    Failure,
    /// Any outcome is accepted.
    Any,
}

impl Default for Expectation {
    fn default() -> Self {
        Expectation::Success
    }
}

impl FromStr for Expectation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(Expectation::Success),
            "failure" => Ok(Expectation::Failure),
            "any" => Ok(Expectation::Any),
            other => Err(format!(
                "invalid expectation: {other} (expected \"success\", \"failure\" or \"any\")"
            )),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Expectation::Success => "success",
            Expectation::Failure => "failure",
            Expectation::Any => "any",
        };
        f.write_str(s)
    }
}
