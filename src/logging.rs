// src/logging.rs

//! Logging setup for `tend` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `TEND_LOG` environment variable (e.g. "info", "debug")
//! 3. `info` when verbose output was requested, `warn` otherwise
//!
//! Status lines share stdout with the commands' own output, so a change,
//! the commands it started and their output read top to bottom.

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::MakeWriter;

use crate::cli::LogLevel;
use crate::errors::{Result, TendError};

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV_VAR: &str = "TEND_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>, verbose: bool) -> Result<()> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or_else(|| default_level(verbose)),
    };

    // Colour only on a terminal; piped runs mix these lines with command output.
    let ansi = std::io::stdout().is_terminal();
    tracing::subscriber::set_global_default(subscriber(level, ansi, std::io::stdout))
        .map_err(|e| TendError::Other(e.into()))?;

    Ok(())
}

fn subscriber<W>(level: tracing::Level, ansi: bool, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_ansi(ansi)
        .with_writer(writer)
        .finish()
}

fn default_level(verbose: bool) -> tracing::Level {
    if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    }
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
