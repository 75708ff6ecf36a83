// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::{DispatchMode, RunLimit};

/// A raw command string, exactly as the user typed it.
pub type CommandSpec = String;

/// Optional TOML file given with `--config`.
///
/// ```toml
/// [watch]
/// path = "src"
/// recursive = false
///
/// [run]
/// commands = ["cargo build", "cargo test"]
/// parallel = false
/// count = -1
/// timeout = "30s"
/// verbose = true
/// ```
///
/// Every key is optional; flags on the command line win over the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub run: RunSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchSection {
    /// Path to watch.
    #[serde(default)]
    pub path: Option<String>,

    /// Watch subdirectories too.
    #[serde(default)]
    pub recursive: bool,
}

/// `[run]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunSection {
    /// Commands to run on every change. Replaced entirely by positional
    /// commands on the command line.
    #[serde(default)]
    pub commands: Vec<CommandSpec>,

    #[serde(default)]
    pub parallel: bool,

    /// Same meaning as `-c`.
    #[serde(default)]
    pub count: Option<i64>,

    /// Per-command timeout, e.g. `"30s"`.
    #[serde(default)]
    pub timeout: Option<String>,

    #[serde(default)]
    pub verbose: bool,
}

/// Fully resolved configuration of one `tend` process.
///
/// Built once at startup and owned by the watch loop afterwards; nothing
/// reads flags from anywhere else once this exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub path: PathBuf,
    pub commands: Vec<CommandSpec>,
    pub mode: DispatchMode,
    pub limit: RunLimit,
    pub recursive: bool,
    pub verbose: bool,
    pub timeout: Option<Duration>,
}

impl WatchConfig {
    /// Sequential, unbounded, non-recursive watch of `path`.
    pub fn new<P, I, S>(path: P, commands: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<CommandSpec>,
    {
        Self {
            path: path.into(),
            commands: commands.into_iter().map(Into::into).collect(),
            mode: DispatchMode::default(),
            limit: RunLimit::default(),
            recursive: false,
            verbose: false,
            timeout: None,
        }
    }
}
