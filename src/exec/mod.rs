// src/exec/mod.rs

//! Process execution layer.
//!
//! This module turns command strings into processes, runs them with
//! `tokio::process::Command` and prints what they did.
//!
//! - [`command`] materializes raw command strings into [`ProcessSpec`]s.
//! - [`backend`] provides the [`ProcessRunner`] trait that the watch loop
//!   talks to, so tests can swap in a fake runner.
//! - [`runner`] is the real runner used in production.
//! - [`dispatch`] runs one batch sequentially or concurrently.
//! - [`output`] is where invocation lines and process output are written.

pub mod backend;
pub mod command;
pub mod dispatch;
pub mod output;
pub mod runner;

pub use backend::{CommandOutcome, ExecutionReport, ProcessRunner};
pub use command::{materialize, ProcessSpec};
pub use dispatch::{dispatch, run_concurrent, run_sequential};
pub use output::Console;
pub use runner::{run_process, OsProcessRunner};
