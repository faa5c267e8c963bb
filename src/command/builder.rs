// src/command/builder.rs

//! Final argument vector assembly.

use std::fmt;

use tracing::debug;

use crate::command::flags::{self, DefaultFlag};
use crate::layout::ClientLayout;

/// The exact argument vector handed to the OS: executable first, then the
/// caller's arguments, then any injected defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    argv: Vec<String>,
}

impl CommandLine {
    /// A command line with no injected defaults.
    pub fn new<S: AsRef<str>>(program: impl Into<String>, args: &[S]) -> Self {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(program.into());
        argv.extend(args.iter().map(|a| a.as_ref().to_string()));
        Self { argv }
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments after the program.
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.argv
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv.join(" "))
    }
}

/// Default worker count for a host reporting `parallelism` CPUs.
pub fn default_thread_count(parallelism: usize, min_threads: usize) -> usize {
    parallelism.saturating_sub(1).max(min_threads.max(1))
}

/// Worker count derived from [`std::thread::available_parallelism`].
pub fn host_thread_count(min_threads: usize) -> usize {
    let parallelism = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    default_thread_count(parallelism, min_threads)
}

/// Builds the command line for one invocation of the executable under test.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    defaults: Vec<DefaultFlag>,
}

impl CommandBuilder {
    /// Table of defaults for `layout`, in append order. `program` is used
    /// verbatim as the first element of every command line.
    pub fn new(program: impl Into<String>, layout: &ClientLayout, threads: usize) -> Self {
        let mut defaults = vec![
            DefaultFlag::inline(
                "properties-path",
                flags::PROPERTIES_PATH,
                "--properties-path",
                &layout.properties_path,
            ),
            DefaultFlag::inline(
                "local-repo",
                flags::LOCAL_REPO,
                "--local-repo",
                &layout.local_repository,
            ),
        ];
        if let Some(settings) = &layout.settings {
            defaults.push(DefaultFlag::separate("settings", flags::SETTINGS, "-s", settings));
        }
        defaults.push(DefaultFlag::glued("threads", flags::THREADS, "-T", threads));

        Self {
            program: program.into(),
            defaults,
        }
    }

    pub fn defaults(&self) -> &[DefaultFlag] {
        &self.defaults
    }

    /// Assemble the argument vector for `args`. `args` is never modified.
    pub fn build<S: AsRef<str>>(&self, args: &[S]) -> CommandLine {
        let mut argv = Vec::with_capacity(args.len() + 1 + self.defaults.len() * 2);
        argv.push(self.program.clone());
        argv.extend(args.iter().map(|a| a.as_ref().to_string()));

        for flag in &self.defaults {
            match flag.render(args) {
                Some(tokens) => argv.extend(tokens.iter().cloned()),
                None => debug!(flag = flag.name, "caller already specifies flag; not injecting"),
            }
        }

        CommandLine { argv }
    }
}
