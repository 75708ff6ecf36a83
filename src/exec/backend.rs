// src/exec/backend.rs

//! Pluggable process runner abstraction.
//!
//! The watch loop talks to a `ProcessRunner` instead of spawning processes
//! itself. Production code uses [`OsProcessRunner`](super::OsProcessRunner);
//! tests can provide a runner that records what was started and finished
//! without touching the OS.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// How a single process run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// Exited unsuccessfully. `None` when the process was killed by a signal.
    Failed(Option<i32>),
    /// Killed after exceeding the configured timeout.
    TimedOut(Duration),
    /// The process could not be started at all.
    LaunchFailed(String),
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success)
    }

    /// Text printed under `<program> encountered an error:`.
    pub fn error_text(&self) -> Option<String> {
        match self {
            CommandOutcome::Success => None,
            CommandOutcome::Failed(Some(code)) => Some(format!("exit status {code}")),
            CommandOutcome::Failed(None) => Some("terminated by signal".to_string()),
            CommandOutcome::TimedOut(limit) => Some(format!("timed out after {limit:?}")),
            CommandOutcome::LaunchFailed(err) => Some(err.clone()),
        }
    }
}

/// What one process did. Printed as soon as it is known and handed back to
/// the dispatcher; never stored beyond the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    pub command_line: String,
    /// Combined stdout and stderr, in the order they were read.
    pub output: Vec<u8>,
    pub outcome: CommandOutcome,
}

/// Trait abstracting how one process spec is run to completion.
///
/// Implementations must report failures through the returned
/// [`ExecutionReport`]; a failing command never aborts its batch.
pub trait ProcessRunner: Send + Sync + 'static {
    fn run(
        &self,
        spec: super::ProcessSpec,
    ) -> Pin<Box<dyn Future<Output = ExecutionReport> + Send + '_>>;
}
