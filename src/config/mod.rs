// src/config/mod.rs

//! Configuration loading and validation for the harness.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{DEFAULT_CONFIG_PATH, load_and_validate, load_from_path};
pub use model::{ConfigFile, HarnessSection, LayoutSection, RawConfigFile};
