// src/exec/runner.rs

//! Real process runner.

use std::future::Future;
use std::io::{self, Read};
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::exec::backend::{CommandOutcome, ExecutionReport, ProcessRunner};
use crate::exec::command::ProcessSpec;
use crate::exec::output::Console;

/// Runs process specs as real OS processes and prints to a [`Console`].
#[derive(Debug, Clone, Default)]
pub struct OsProcessRunner {
    console: Console,
    timeout: Option<Duration>,
}

impl OsProcessRunner {
    pub fn new(console: Console) -> Self {
        Self {
            console,
            timeout: None,
        }
    }

    /// Kill any process still running after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ProcessRunner for OsProcessRunner {
    fn run(
        &self,
        spec: ProcessSpec,
    ) -> Pin<Box<dyn Future<Output = ExecutionReport> + Send + '_>> {
        Box::pin(run_process(spec, &self.console, self.timeout))
    }
}

/// Run one process to completion.
///
/// Prints the invocation line first, then (after exit) the error if there
/// was one, then the captured output if non-empty.
pub async fn run_process(
    spec: ProcessSpec,
    console: &Console,
    timeout: Option<Duration>,
) -> ExecutionReport {
    let command_line = spec.command_line();
    console.line(&command_line);

    let mut output = Vec::new();
    let outcome = match execute(&spec, timeout, &mut output).await {
        Ok(outcome) => outcome,
        Err(err) => CommandOutcome::LaunchFailed(err.to_string()),
    };

    debug!(
        program = %spec.program,
        success = outcome.is_success(),
        output_bytes = output.len(),
        "process finished"
    );

    if let Some(text) = outcome.error_text() {
        console.line(&format!("{} encountered an error:", spec.program_path().display()));
        console.line(&text);
    }
    if !output.is_empty() {
        console.write_block(&output);
    }

    ExecutionReport {
        command_line,
        output,
        outcome,
    }
}

async fn execute(
    spec: &ProcessSpec,
    timeout: Option<Duration>,
    output: &mut Vec<u8>,
) -> io::Result<CommandOutcome> {
    // One pipe behind both stdout and stderr keeps their writes in the order
    // the process made them.
    let (reader, writer) = io::pipe()?;

    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer)
        .kill_on_drop(true);
    let mut child = command.spawn()?;
    // The command still holds our copies of the write end; no EOF until they go.
    drop(command);

    debug!(program = %spec.program, pid = ?child.id(), "process started");

    let drain = tokio::task::spawn_blocking(move || {
        let mut reader = reader;
        let mut captured = Vec::new();
        reader.read_to_end(&mut captured).map(|_| captured)
    });

    let outcome = match timeout {
        None => outcome_from_status(child.wait().await?),
        Some(limit) => {
            let waited = tokio::time::timeout(limit, child.wait()).await;
            match waited {
                Ok(status) => outcome_from_status(status?),
                Err(_) => {
                    if let Err(err) = child.kill().await {
                        warn!(
                            program = %spec.program,
                            error = %err,
                            "failed to kill timed out process"
                        );
                    }
                    CommandOutcome::TimedOut(limit)
                }
            }
        }
    };

    match drain.await {
        Ok(Ok(captured)) => output.extend_from_slice(&captured),
        Ok(Err(err)) => {
            warn!(program = %spec.program, error = %err, "failed to read process output");
        }
        Err(err) => {
            warn!(program = %spec.program, error = %err, "output reader task failed");
        }
    }

    Ok(outcome)
}

fn outcome_from_status(status: ExitStatus) -> CommandOutcome {
    if status.success() {
        CommandOutcome::Success
    } else {
        CommandOutcome::Failed(status.code())
    }
}
