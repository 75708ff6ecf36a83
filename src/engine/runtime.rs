// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::config::WatchConfig;
use crate::engine::core::WatchLoopCore;
use crate::engine::{CoreCommand, LoopSummary};
use crate::exec::{dispatch, materialize, ProcessRunner};
use crate::watch::{WatchEvent, WatcherHandle};

/// Drives [`WatchLoopCore`] from a stream of [`WatchEvent`]s and runs the
/// batches it asks for through a [`ProcessRunner`].
///
/// The loop owns everything it touches: the configuration, the counter (via
/// the core), the event stream and, when given one, the watcher handle. The
/// subscription is therefore released exactly once, when the loop ends.
pub struct WatchLoop<R: ProcessRunner> {
    config: WatchConfig,
    core: WatchLoopCore,
    events: mpsc::UnboundedReceiver<WatchEvent>,
    runner: Arc<R>,
    watcher: Option<WatcherHandle>,
}

impl<R: ProcessRunner> fmt::Debug for WatchLoop<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchLoop")
            .field("core", &self.core)
            .field("watcher", &self.watcher)
            .finish_non_exhaustive()
    }
}

impl<R: ProcessRunner> WatchLoop<R> {
    pub fn new(
        config: WatchConfig,
        events: mpsc::UnboundedReceiver<WatchEvent>,
        runner: R,
    ) -> Self {
        let core = WatchLoopCore::new(config.limit);
        Self {
            config,
            core,
            events,
            runner: Arc::new(runner),
            watcher: None,
        }
    }

    /// Hand ownership of the filesystem subscription to the loop.
    pub fn with_watcher(mut self, watcher: WatcherHandle) -> Self {
        self.watcher = Some(watcher);
        self
    }

    /// Run the loop on its own Tokio task.
    ///
    /// The returned receiver resolves once, when the loop has stopped.
    pub fn spawn(self) -> oneshot::Receiver<LoopSummary> {
        let (done_tx, done_rx) = oneshot::channel();
        tokio::spawn(async move {
            let summary = self.run().await;
            // Nobody waiting means the process is already on its way out.
            let _ = done_tx.send(summary);
        });
        done_rx
    }

    /// Main loop.
    ///
    /// Waits for the next notification, feeds it to the core and carries out
    /// what the core returns. A batch is run to completion before the next
    /// notification is read.
    pub async fn run(mut self) -> LoopSummary {
        debug!(path = ?self.config.path, limit = %self.config.limit, "watch loop started");

        loop {
            let Some(event) = self.events.recv().await else {
                info!("notification stream closed; stopping");
                break;
            };

            let step = self.core.on_event(event);
            let mut keep_running = step.keep_running;

            for command in step.commands {
                if command == CoreCommand::DispatchBatch {
                    self.dispatch_batch().await;
                    let after = self.core.finish_dispatch();
                    for command in after.commands {
                        self.report(command);
                    }
                    keep_running = after.keep_running;
                } else {
                    self.report(command);
                }
            }

            if !keep_running {
                break;
            }
        }

        if let Some(watcher) = self.watcher.take() {
            debug!(path = ?watcher.path(), "releasing watcher");
        }

        LoopSummary {
            dispatches: self.core.dispatched(),
            final_state: self.core.state(),
        }
    }

    async fn dispatch_batch(&mut self) {
        info!("Change detected");
        // Fresh specs every time; a spec is never run twice.
        let batch = materialize(&self.config.commands);
        dispatch(&self.runner, self.config.mode, batch).await;
    }

    fn report(&self, command: CoreCommand) {
        match command {
            CoreCommand::ReportWatchError { paths, message } => {
                warn!(
                    ?paths,
                    "Watching {} error: {}",
                    self.config.path.display(),
                    message
                );
            }
            CoreCommand::Terminate { runs } => {
                info!("tend has run {runs} times. Exiting.");
            }
            CoreCommand::DispatchBatch => {
                debug!("nested dispatch request ignored");
            }
        }
    }
}
