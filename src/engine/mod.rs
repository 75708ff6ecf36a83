// src/engine/mod.rs

//! The watch loop.
//!
//! The pure state machine lives in [`core`]: it classifies notifications,
//! counts dispatches against the run limit and decides when to stop. The
//! async shell in [`runtime`] reads the notification stream, runs batches
//! through a [`ProcessRunner`](crate::exec::ProcessRunner) and reports
//! completion to whoever spawned it.

/// Where the watch loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Subscribed and waiting for the next notification.
    Idle,
    /// A batch is running; no notification is consumed until it finishes.
    Dispatching,
    /// The run limit was reached. Terminal.
    Terminating,
}

/// Work the core asks the shell to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Materialize and run the configured batch, then call
    /// [`WatchLoopCore::finish_dispatch`].
    DispatchBatch,
    /// Log a notification backend error. Nothing else changes.
    ReportWatchError {
        paths: Vec<std::path::PathBuf>,
        message: String,
    },
    /// The last permitted batch has run.
    Terminate { runs: u64 },
}

/// Result of feeding one input into the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
    pub keep_running: bool,
}

impl CoreStep {
    fn idle() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }
}

/// What the loop did over its lifetime, reported when it stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub dispatches: u64,
    pub final_state: LoopState,
}

pub mod core;
pub mod runtime;

pub use self::core::WatchLoopCore;
pub use runtime::WatchLoop;
