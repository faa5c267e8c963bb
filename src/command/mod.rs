// src/command/mod.rs

//! Command-line and environment construction.
//!
//! - [`flags`] holds the table of default flags and their detectors.
//! - [`builder`] turns caller arguments into the final [`CommandLine`].
//! - [`env`] decides which home variables are exported to the child.

pub mod builder;
pub mod env;
pub mod flags;

pub use builder::{CommandBuilder, CommandLine, default_thread_count, host_thread_count};
pub use env::EnvOverrides;
pub use flags::{DefaultFlag, Detector};
