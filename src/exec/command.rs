// src/exec/command.rs

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::CommandSpec;

/// A program plus its arguments, ready to be spawned once.
///
/// Specs are rebuilt from the raw command strings on every trigger and are
/// consumed by the run, so nothing carries over from a previous batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl ProcessSpec {
    /// Split a raw command on whitespace: the first token is the program, the
    /// rest are passed verbatim as arguments.
    ///
    /// There is no quoting or escaping. `"echo 'a b'"` yields the arguments
    /// `'a` and `b'`. An empty string yields an empty program name, which
    /// then fails to launch and is reported like any other failure.
    pub fn parse(raw: &str) -> Self {
        let mut tokens = raw.split_whitespace().map(str::to_string);
        let program = tokens.next().unwrap_or_default();
        Self {
            program,
            args: tokens.collect(),
        }
    }

    /// The invocation line printed before the process starts.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// The executable the program name resolves to: the first executable
    /// match on `PATH` for a bare name. Names with a directory part, and
    /// names nothing matches, come back unchanged.
    pub fn program_path(&self) -> PathBuf {
        let program = Path::new(&self.program);
        if self.program.is_empty() || program.components().count() > 1 {
            return program.to_path_buf();
        }
        std::env::var_os("PATH")
            .and_then(|paths| {
                std::env::split_paths(&paths)
                    .map(|dir| dir.join(program))
                    .find(|candidate| is_executable(candidate))
            })
            .unwrap_or_else(|| program.to_path_buf())
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

impl fmt::Display for ProcessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Build a fresh batch from the configured command strings, same length and
/// same order.
pub fn materialize(commands: &[CommandSpec]) -> Vec<ProcessSpec> {
    commands.iter().map(|raw| ProcessSpec::parse(raw)).collect()
}
