// src/layout.rs

//! Resolved locations the harness consumes from its collaborators.
//!
//! Nothing here discovers paths on its own: callers (or the config loader)
//! hand over already-resolved values and the command builder and supervisor
//! only read them.

use std::path::{Path, PathBuf};

/// Paths and homes used to derive default flags and environment overrides
/// for one executable under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientLayout {
    /// Working directory of the child process.
    pub user_dir: PathBuf,
    /// Injected as `--properties-path=<p>`.
    pub properties_path: PathBuf,
    /// Injected as `--local-repo=<p>`.
    pub local_repository: PathBuf,
    /// Injected as `-s <p>` when present.
    pub settings: Option<PathBuf>,
    /// Exported as `RUNTIME_HOME` unless `--runtime-home` is on the command line.
    pub runtime_home: Option<PathBuf>,
    /// Exported as `JAVA_HOME` unless `--java-home` is on the command line.
    pub java_home: Option<PathBuf>,
}

impl ClientLayout {
    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    /// Return a copy with every relative path joined onto `base`.
    pub fn rebased(&self, base: &Path) -> ClientLayout {
        let join = |p: &Path| -> PathBuf {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base.join(p)
            }
        };

        ClientLayout {
            user_dir: join(&self.user_dir),
            properties_path: join(&self.properties_path),
            local_repository: join(&self.local_repository),
            settings: self.settings.as_deref().map(join),
            runtime_home: self.runtime_home.as_deref().map(join),
            java_home: self.java_home.as_deref().map(join),
        }
    }
}
