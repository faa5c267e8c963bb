// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::layout::ClientLayout;
use crate::types::MIN_THREADS;

/// Raw configuration as read from a TOML file.
///
/// ```toml
/// [harness]
/// executable = "target/native/client"
/// timeout_ms = 300000
///
/// [layout]
/// properties_path = "home/conf/client.properties"
/// local_repository = "home/repo"
/// settings = "home/settings.xml"
///
/// [env]
/// LANG = "C"
/// ```
///
/// This only carries what deserialization can check. Use
/// [`ConfigFile::try_from`] to get a validated configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    pub harness: HarnessSection,

    pub layout: LayoutSection,

    /// Extra environment variables exported to the child on top of the
    /// inherited environment.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// `[harness]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct HarnessSection {
    /// Path of the executable under test.
    pub executable: PathBuf,

    /// Deadline for one invocation, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Floor for the injected worker count.
    #[serde(default = "default_min_threads")]
    pub min_threads: usize,

    /// How long to keep draining output after the process has gone.
    #[serde(default = "default_drain_timeout_ms")]
    pub drain_timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    300_000
}

fn default_min_threads() -> usize {
    MIN_THREADS
}

fn default_drain_timeout_ms() -> u64 {
    5_000
}

/// `[layout]` section. Relative paths are resolved against the directory of
/// the config file by the loader.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSection {
    #[serde(default = "default_user_dir")]
    pub user_dir: PathBuf,
    pub properties_path: PathBuf,
    pub local_repository: PathBuf,
    #[serde(default)]
    pub settings: Option<PathBuf>,
    #[serde(default)]
    pub runtime_home: Option<PathBuf>,
    #[serde(default)]
    pub java_home: Option<PathBuf>,
}

fn default_user_dir() -> PathBuf {
    PathBuf::from(".")
}

impl From<LayoutSection> for ClientLayout {
    fn from(s: LayoutSection) -> Self {
        ClientLayout {
            user_dir: s.user_dir,
            properties_path: s.properties_path,
            local_repository: s.local_repository,
            settings: s.settings,
            runtime_home: s.runtime_home,
            java_home: s.java_home,
        }
    }
}

/// Validated configuration.
///
/// Only constructible through [`TryFrom<RawConfigFile>`], so holding one
/// means the semantic checks in `validate.rs` have passed.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub harness: HarnessSection,
    pub layout: ClientLayout,
    pub env: BTreeMap<String, String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        harness: HarnessSection,
        layout: ClientLayout,
        env: BTreeMap<String, String>,
    ) -> Self {
        Self { harness, layout, env }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.harness.timeout_ms)
    }

    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.harness.drain_timeout_ms)
    }

    /// Resolve the executable and every layout path against `base`.
    pub fn rebased(mut self, base: &Path) -> Self {
        if self.harness.executable.is_relative() {
            self.harness.executable = base.join(&self.harness.executable);
        }
        self.layout = self.layout.rebased(base);
        self
    }
}
