// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`sink`] holds the shared log of captured output lines.
//! - [`supervisor`] owns one child process: spawn, deadline wait, release.
//! - [`client`] ties command construction, supervision and result packaging
//!   together behind the [`Client`] trait.

pub mod client;
pub mod sink;
pub mod supervisor;

pub use client::{Client, NativeClient};
pub use sink::OutputSink;
pub use supervisor::Supervisor;
