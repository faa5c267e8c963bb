// src/command/flags.rs

//! Declarative table of default flags.
//!
//! Each entry pairs a [`Detector`] (does the caller already say this?) with
//! the tokens to append when it does not. The table is built once per
//! invocation from the resolved layout and never mutated afterwards.

use std::path::Path;

/// Decides whether an argument list already specifies a flag.
///
/// A token matches when it equals one of `exact`, or starts with one of
/// `prefixes`. Flags that carry a separate value token (`-s <path>`) only list
/// exact spellings plus the `--long=` form; flags with an inline value
/// (`-T4`) also list the bare prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detector {
    pub exact: &'static [&'static str],
    pub prefixes: &'static [&'static str],
}

impl Detector {
    /// Detector for a `--name` / `--name=value` option.
    pub const fn option(exact: &'static [&'static str], prefixes: &'static [&'static str]) -> Self {
        Self { exact, prefixes }
    }

    pub fn matches(&self, arg: &str) -> bool {
        self.exact.iter().any(|e| arg == *e) || self.prefixes.iter().any(|p| arg.starts_with(p))
    }

    /// True if any token in `args` matches.
    pub fn is_present<S: AsRef<str>>(&self, args: &[S]) -> bool {
        args.iter().any(|a| self.matches(a.as_ref()))
    }
}

pub const PROPERTIES_PATH: Detector =
    Detector::option(&["--properties-path"], &["--properties-path="]);
pub const LOCAL_REPO: Detector = Detector::option(&["--local-repo"], &["--local-repo="]);
pub const SETTINGS: Detector = Detector::option(&["-s", "--settings"], &["--settings="]);
pub const THREADS: Detector = Detector::option(&["--threads"], &["-T", "--threads="]);
pub const RUNTIME_HOME: Detector = Detector::option(&["--runtime-home"], &["--runtime-home="]);
pub const JAVA_HOME: Detector = Detector::option(&["--java-home"], &["--java-home="]);

/// One conditionally injected default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultFlag {
    pub name: &'static str,
    pub detector: Detector,
    /// Tokens appended verbatim when the detector finds nothing.
    pub tokens: Vec<String>,
}

impl DefaultFlag {
    /// `--name=value` rendered as a single token.
    pub fn inline(name: &'static str, detector: Detector, option: &str, value: &Path) -> Self {
        Self {
            name,
            detector,
            tokens: vec![format!("{option}={}", value.display())],
        }
    }

    /// Flag followed by its value as a separate token.
    pub fn separate(name: &'static str, detector: Detector, flag: &str, value: &Path) -> Self {
        Self {
            name,
            detector,
            tokens: vec![flag.to_string(), value.display().to_string()],
        }
    }

    /// Flag with the value glued on, e.g. `-T4`.
    pub fn glued(name: &'static str, detector: Detector, flag: &str, value: impl std::fmt::Display) -> Self {
        Self {
            name,
            detector,
            tokens: vec![format!("{flag}{value}")],
        }
    }

    /// Tokens to append for `args`, or `None` if the caller already has it.
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> Option<&[String]> {
        if self.detector.is_present(args) {
            None
        } else {
            Some(&self.tokens)
        }
    }
}
