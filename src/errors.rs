// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The executable could not be started at all (missing binary, permission
    /// denied, invalid working directory). Never reported as an exit code.
    #[error("Could not execute: {command}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// An execution result did not match the expected exit-code class.
///
/// The message carries the reconstructed command line and, for unexpected
/// failures, the full captured transcript.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AssertionFailure {
    pub message: String,
}

pub type Result<T> = std::result::Result<T, HarnessError>;
