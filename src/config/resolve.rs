// src/config/resolve.rs

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::loader::load_from_path;
use crate::config::model::{CommandSpec, FileConfig, WatchConfig};
use crate::errors::{Result, TendError};
use crate::types::{DispatchMode, RunLimit};

/// Outcome of merging the command line with the optional config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Everything needed to start watching is known.
    Ready(WatchConfig),
    /// No path or no commands: print usage and exit successfully.
    ShowUsage,
}

/// Resolve the configuration for this process, reading `--config` if given.
pub fn resolve(args: &CliArgs) -> Result<Resolution> {
    let file = match &args.config {
        Some(path) => {
            debug!(path = ?path, "loading config file");
            load_from_path(path)?
        }
        None => FileConfig::default(),
    };
    resolve_with_file(args, file)
}

/// Merge CLI flags over an already loaded file config.
///
/// Path precedence: `-w`, then `[watch].path`, then (only when neither is
/// set and at least two positionals were given) the first positional.
pub fn resolve_with_file(args: &CliArgs, file: FileConfig) -> Result<Resolution> {
    let commands: Vec<CommandSpec> = if args.commands.is_empty() {
        file.run.commands
    } else {
        args.commands.clone()
    };

    let explicit_path = non_empty(args.watch.clone()).or_else(|| non_empty(file.watch.path));

    let (path, commands) = match explicit_path {
        Some(path) => (Some(path), commands),
        None if args.commands.len() > 1 => {
            let mut commands = commands;
            let path = commands.remove(0);
            (Some(path), commands)
        }
        None => (None, commands),
    };

    let Some(path) = path else {
        debug!("no watch path given");
        return Ok(Resolution::ShowUsage);
    };
    if commands.is_empty() {
        debug!(path = %path, "no commands given");
        return Ok(Resolution::ShowUsage);
    }

    let count = args.count.or(file.run.count).unwrap_or(-1);
    let timeout = args
        .timeout
        .as_deref()
        .or(file.run.timeout.as_deref())
        .map(parse_duration)
        .transpose()?;

    Ok(Resolution::Ready(WatchConfig {
        path: PathBuf::from(path),
        commands,
        mode: DispatchMode::from_parallel_flag(args.parallel || file.run.parallel),
        limit: RunLimit::from_count(count),
        recursive: args.recursive || file.watch.recursive,
        verbose: args.verbose || file.run.verbose,
        timeout,
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Parse a simple duration string like `"3s"`, `"250ms"`, `"1m"`, `"2h"`.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TendError::ConfigError("empty duration string".to_string()));
    }

    // Find the boundary between digits and suffix.
    let idx = s.chars().position(|c| !c.is_ascii_digit()).ok_or_else(|| {
        TendError::ConfigError(format!("duration '{s}' is missing a unit suffix"))
    })?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part.parse().map_err(|e| {
        TendError::ConfigError(format!("invalid duration number '{num_part}': {e}"))
    })?;
    let unit = unit_part.trim().to_lowercase();

    let secs_per_unit = match unit.as_str() {
        "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        _ => {
            return Err(TendError::ConfigError(format!(
                "unsupported duration unit '{unit}'; expected ms, s, m, or h"
            )));
        }
    };
    let secs = value.checked_mul(secs_per_unit).ok_or_else(|| {
        TendError::ConfigError(format!("duration '{s}' is too large"))
    })?;
    Ok(Duration::from_secs(secs))
}
