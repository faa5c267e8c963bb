// src/result.rs

//! Outcome of one harness invocation and the assertions made on it.

use std::fmt::Write;
use std::path::Path;

use crate::errors::AssertionFailure;
use crate::types::{Expectation, TIMEOUT_EXIT_CODE};

/// Immutable record of one run: exit code, the argument vector that was
/// executed, and everything captured from the merged output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    exit_code: i32,
    args: Vec<String>,
    log: Vec<String>,
}

impl ExecutionResult {
    /// `args` is the full argument vector, executable first.
    pub fn new(args: &[String], exit_code: i32, log: Vec<String>) -> Self {
        Self {
            exit_code,
            args: args.to_vec(),
            log,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn is_timeout(&self) -> bool {
        self.exit_code == TIMEOUT_EXIT_CODE
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// `Err` with the full transcript unless the exit code is zero.
    pub fn check_success(&self) -> Result<&Self, AssertionFailure> {
        if self.is_success() {
            return Ok(self);
        }

        let mut msg = format!("{} returned {}", self.program_name(), self.exit_code);
        self.append_command(&mut msg);
        if self.is_timeout() {
            msg.push_str(" (timeout)");
        }
        msg.push_str("\n--- stderr+stdout start ---");
        for line in &self.log {
            msg.push('\n');
            msg.push_str(line);
        }
        msg.push_str("\n--- stderr+stdout end ---");

        Err(AssertionFailure { message: msg })
    }

    /// `Err` if the exit code is zero.
    pub fn check_failure(&self) -> Result<&Self, AssertionFailure> {
        if !self.is_success() {
            return Ok(self);
        }

        let mut msg = format!(
            "{} returned {} instead of non-zero exit code:",
            self.program_name(),
            self.exit_code
        );
        self.append_command(&mut msg);

        Err(AssertionFailure { message: msg })
    }

    /// Check against `expectation`; [`Expectation::Any`] always passes.
    pub fn check(&self, expectation: Expectation) -> Result<&Self, AssertionFailure> {
        match expectation {
            Expectation::Success => self.check_success(),
            Expectation::Failure => self.check_failure(),
            Expectation::Any => Ok(self),
        }
    }

    /// Panic with the full transcript unless the run succeeded.
    #[track_caller]
    pub fn assert_success(&self) -> &Self {
        if let Err(failure) = self.check_success() {
            panic!("{failure}");
        }
        self
    }

    /// Panic unless the run failed.
    #[track_caller]
    pub fn assert_failure(&self) -> &Self {
        if let Err(failure) = self.check_failure() {
            panic!("{failure}");
        }
        self
    }

    fn program_name(&self) -> String {
        self.args
            .first()
            .map(|p| {
                Path::new(p)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.clone())
            })
            .unwrap_or_else(|| "process".to_string())
    }

    fn append_command(&self, msg: &mut String) {
        for arg in &self.args {
            let _ = write!(msg, " \"{arg}\"");
        }
    }
}
