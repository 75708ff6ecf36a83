// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;
pub mod watch;

use anyhow::anyhow;
use tracing::{debug, info, warn};

use crate::config::WatchConfig;
use crate::engine::WatchLoop;
use crate::errors::Result;
use crate::exec::{Console, OsProcessRunner};
use crate::types::DispatchMode;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the filesystem subscription (fatal if it cannot be set up)
/// - the process runner
/// - the watch loop, on its own task
/// - Ctrl-C handling
///
/// Returns once the loop has used up its run limit or the user interrupts.
pub async fn run(config: WatchConfig) -> Result<()> {
    announce(&config);

    let (watcher, events) = watch::subscribe(&config.path, config.recursive)?;

    let runner = OsProcessRunner::new(Console::Stdout).with_timeout(config.timeout);
    let done = WatchLoop::new(config, events, runner)
        .with_watcher(watcher)
        .spawn();

    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        finished = done => {
            let summary = finished
                .map_err(|_| anyhow!("watch loop stopped without reporting completion"))?;
            debug!(?summary, "watch loop finished");
        }
        _ = interrupted => {
            info!("interrupted; stopping");
        }
    }

    Ok(())
}

/// Verbose preamble describing what is about to be watched and run.
fn announce(config: &WatchConfig) {
    info!("When {} changes, I will run", config.path.display());
    for command in &config.commands {
        info!("    {command}");
    }
    if config.mode == DispatchMode::Concurrent {
        info!("in parallel");
    }
    if let Some(timeout) = config.timeout {
        info!("killing any command still running after {timeout:?}");
    }
}
