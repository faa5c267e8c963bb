#![allow(dead_code)]

use std::path::{Path, PathBuf};

use native_harness::ClientLayout;

/// Builder for `ClientLayout` rooted at a test directory.
///
/// Defaults mirror a typical test home: `<root>/conf/client.properties`,
/// `<root>/repo`, no settings and no homes.
pub struct LayoutBuilder {
    layout: ClientLayout,
}

impl LayoutBuilder {
    pub fn new(root: &Path) -> Self {
        Self {
            layout: ClientLayout {
                user_dir: root.to_path_buf(),
                properties_path: root.join("conf").join("client.properties"),
                local_repository: root.join("repo"),
                settings: None,
                runtime_home: None,
                java_home: None,
            },
        }
    }

    pub fn user_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.layout.user_dir = dir.into();
        self
    }

    pub fn properties_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.layout.properties_path = path.into();
        self
    }

    pub fn local_repository(mut self, path: impl Into<PathBuf>) -> Self {
        self.layout.local_repository = path.into();
        self
    }

    pub fn settings(mut self, path: impl Into<PathBuf>) -> Self {
        self.layout.settings = Some(path.into());
        self
    }

    pub fn runtime_home(mut self, path: impl Into<PathBuf>) -> Self {
        self.layout.runtime_home = Some(path.into());
        self
    }

    pub fn java_home(mut self, path: impl Into<PathBuf>) -> Self {
        self.layout.java_home = Some(path.into());
        self
    }

    pub fn build(self) -> ClientLayout {
        self.layout
    }
}
