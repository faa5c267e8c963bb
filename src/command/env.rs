// src/command/env.rs

//! Environment overrides for the child process.
//!
//! Two homes are exported from the layout unless the caller already points the
//! executable at them through the equivalent command-line option.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::command::flags::{self, Detector};
use crate::layout::ClientLayout;

pub const RUNTIME_HOME_VAR: &str = "RUNTIME_HOME";
pub const JAVA_HOME_VAR: &str = "JAVA_HOME";

/// Variables to set on top of the inherited environment, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    vars: BTreeMap<String, OsString>,
}

impl EnvOverrides {
    /// Overrides derived from `layout` for the given caller `args`.
    pub fn for_args<S: AsRef<str>>(layout: &ClientLayout, args: &[S]) -> Self {
        let table: [(&str, Detector, Option<&PathBuf>); 2] = [
            (RUNTIME_HOME_VAR, flags::RUNTIME_HOME, layout.runtime_home.as_ref()),
            (JAVA_HOME_VAR, flags::JAVA_HOME, layout.java_home.as_ref()),
        ];

        let mut vars = BTreeMap::new();
        for (var, detector, value) in table {
            if let Some(value) = value {
                if !detector.is_present(args) {
                    vars.insert(var.to_string(), value.clone().into_os_string());
                }
            }
        }
        Self { vars }
    }

    /// Merge `extra` without replacing anything already set.
    pub fn extend_missing<I, K, V>(&mut self, extra: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OsString>,
    {
        for (k, v) in extra {
            self.vars.entry(k.into()).or_insert_with(|| v.into());
        }
    }

    pub fn get(&self, name: &str) -> Option<&OsString> {
        self.vars.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OsString)> {
        self.vars.iter()
    }
}
