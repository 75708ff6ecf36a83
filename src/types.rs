// src/types.rs

use std::fmt;

/// How the processes of one batch are run.
///
/// - `Sequential`: one after another, in configuration order (default).
/// - `Concurrent`: all launched together; the batch ends when the last one
///   exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    #[default]
    Sequential,
    Concurrent,
}

impl DispatchMode {
    pub fn from_parallel_flag(parallel: bool) -> Self {
        if parallel {
            DispatchMode::Concurrent
        } else {
            DispatchMode::Sequential
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchMode::Sequential => f.write_str("sequential"),
            DispatchMode::Concurrent => f.write_str("concurrent"),
        }
    }
}

/// Upper bound on how many batches the watch loop dispatches before exiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunLimit {
    #[default]
    Unbounded,
    Bounded(u64),
}

impl RunLimit {
    /// Map the `-c` count onto a limit.
    ///
    /// Every count `<= 0` is unbounded: a negative count never reaches zero,
    /// and a zero count is already past zero after the first decrement.
    pub fn from_count(count: i64) -> Self {
        if count > 0 {
            RunLimit::Bounded(count as u64)
        } else {
            RunLimit::Unbounded
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, RunLimit::Unbounded)
    }
}

impl fmt::Display for RunLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunLimit::Unbounded => f.write_str("unbounded"),
            RunLimit::Bounded(n) => write!(f, "{n}"),
        }
    }
}
