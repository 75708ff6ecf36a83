// src/cli.rs

//! CLI argument parsing using `clap`.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};

/// Command-line arguments for `tend`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "tend",
    version,
    about = "Run commands whenever a watched path is written to.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to watch.
    ///
    /// If omitted and at least two commands are given, the first command is
    /// taken as the path instead.
    #[arg(short = 'w', value_name = "PATH")]
    pub watch: Option<String>,

    /// Print status messages while watching.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Run the commands of a batch in parallel.
    #[arg(short = 'p', long)]
    pub parallel: bool,

    /// Number of changes to react to before exiting (-1 for no limit).
    #[arg(short = 'c', long, value_name = "N", allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Also watch subdirectories of PATH.
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Kill a command that runs longer than this (e.g. `500ms`, `30s`, `2m`).
    #[arg(long, value_name = "DURATION")]
    pub timeout: Option<String>,

    /// TOML file providing defaults for the options above.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TEND_LOG` is used, then `info` with `-v`, else `warn`.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Commands to run on every change.
    #[arg(value_name = "COMMAND")]
    pub commands: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Invocations shown under the usage text.
pub const USAGE_EXAMPLES: [&str; 3] = [
    r#"tend -w src/ "npm run build""#,
    "tend -v -w src/ make",
    r#"tend -w src/ "rm -rf lib" "npm run build:dev""#,
];

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Print the usage text to stdout.
pub fn print_usage() -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_usage(&mut out)?;
    out.flush()
}

/// Write the generated help followed by a few example invocations.
pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", CliArgs::command().render_help())?;
    writeln!(out, "Examples:")?;
    for example in USAGE_EXAMPLES {
        writeln!(out, "  {example}")?;
    }
    Ok(())
}
