// src/exec/dispatch.rs

//! Dispatch strategies: run one batch of process specs to completion.
//!
//! Neither strategy stops early on a failed command, and both return only
//! once every command in the batch has finished.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::exec::backend::{ExecutionReport, ProcessRunner};
use crate::exec::command::ProcessSpec;
use crate::types::DispatchMode;

/// Run `batch` with the strategy selected by `mode`.
///
/// Reports come back in batch order regardless of strategy.
pub async fn dispatch<R: ProcessRunner>(
    runner: &Arc<R>,
    mode: DispatchMode,
    batch: Vec<ProcessSpec>,
) -> Vec<ExecutionReport> {
    debug!(%mode, size = batch.len(), "dispatching batch");

    let reports = match mode {
        DispatchMode::Sequential => run_sequential(runner.as_ref(), batch).await,
        DispatchMode::Concurrent => run_concurrent(runner, batch).await,
    };

    let failed = reports.iter().filter(|r| !r.outcome.is_success()).count();
    debug!(%mode, completed = reports.len(), failed, "batch finished");
    reports
}

/// Run each spec to completion before starting the next.
pub async fn run_sequential<R: ProcessRunner + ?Sized>(
    runner: &R,
    batch: Vec<ProcessSpec>,
) -> Vec<ExecutionReport> {
    let mut reports = Vec::with_capacity(batch.len());
    for spec in batch {
        reports.push(runner.run(spec).await);
    }
    reports
}

/// Launch every spec at once on its own Tokio task and wait for all of them.
pub async fn run_concurrent<R: ProcessRunner>(
    runner: &Arc<R>,
    batch: Vec<ProcessSpec>,
) -> Vec<ExecutionReport> {
    let size = batch.len();
    let mut workers = JoinSet::new();

    for (index, spec) in batch.into_iter().enumerate() {
        let runner = Arc::clone(runner);
        workers.spawn(async move { (index, runner.run(spec).await) });
    }

    let mut slots: Vec<Option<ExecutionReport>> = (0..size).map(|_| None).collect();
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((index, report)) => slots[index] = Some(report),
            // A panicking runner loses its own report, not the batch.
            Err(err) => error!(error = %err, "dispatch worker failed"),
        }
    }

    slots.into_iter().flatten().collect()
}
