// src/engine/core.rs

//! Pure watch loop state machine.
//!
//! The core owns the run counter and the loop state. It has no channels, no
//! Tokio types and performs no IO, so every transition is unit tested here
//! directly.

use tracing::debug;

use crate::engine::{CoreCommand, CoreStep, LoopState};
use crate::types::RunLimit;
use crate::watch::WatchEvent;

#[derive(Debug)]
pub struct WatchLoopCore {
    state: LoopState,
    /// Batches still permitted; `None` when unbounded.
    remaining: Option<u64>,
    dispatched: u64,
}

impl WatchLoopCore {
    pub fn new(limit: RunLimit) -> Self {
        let remaining = match limit {
            RunLimit::Unbounded => None,
            RunLimit::Bounded(n) => Some(n),
        };
        Self {
            state: LoopState::Idle,
            remaining,
            dispatched: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn remaining(&self) -> Option<u64> {
        self.remaining
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Feed one notification into the core.
    ///
    /// Only a write moves `Idle` to `Dispatching`. Other changes are dropped
    /// and backend errors are handed back for logging; neither touches the
    /// counter.
    pub fn on_event(&mut self, event: WatchEvent) -> CoreStep {
        match self.state {
            LoopState::Idle => {}
            LoopState::Terminating => {
                debug!(?event, "event after termination; ignoring");
                return CoreStep {
                    commands: Vec::new(),
                    keep_running: false,
                };
            }
            LoopState::Dispatching => {
                // The shell never reads while dispatching.
                debug!(?event, "event while dispatching; ignoring");
                return CoreStep::idle();
            }
        }

        match event {
            WatchEvent::Changed { kind, paths } if kind.is_write() => {
                debug!(?paths, "write detected");
                self.state = LoopState::Dispatching;
                CoreStep {
                    commands: vec![CoreCommand::DispatchBatch],
                    keep_running: true,
                }
            }
            WatchEvent::Changed { kind, paths } => {
                debug!(?kind, ?paths, "ignoring non-write change");
                CoreStep::idle()
            }
            WatchEvent::Error { paths, message } => CoreStep {
                commands: vec![CoreCommand::ReportWatchError { paths, message }],
                keep_running: true,
            },
        }
    }

    /// Record that the current batch has fully completed.
    ///
    /// Decrements the counter by exactly one and moves to `Terminating` iff
    /// it reaches zero, otherwise back to `Idle`.
    pub fn finish_dispatch(&mut self) -> CoreStep {
        if self.state != LoopState::Dispatching {
            debug!(state = ?self.state, "finish_dispatch outside of a dispatch; ignoring");
            return CoreStep {
                commands: Vec::new(),
                keep_running: self.state != LoopState::Terminating,
            };
        }

        self.dispatched += 1;

        let exhausted = match self.remaining.as_mut() {
            Some(left) => {
                *left = left.saturating_sub(1);
                *left == 0
            }
            None => false,
        };

        if exhausted {
            self.state = LoopState::Terminating;
            CoreStep {
                commands: vec![CoreCommand::Terminate {
                    runs: self.dispatched,
                }],
                keep_running: false,
            }
        } else {
            self.state = LoopState::Idle;
            CoreStep::idle()
        }
    }
}
