use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tend::exec::{CommandOutcome, ExecutionReport, ProcessRunner, ProcessSpec};

/// Something the fake runner observed, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Started(String),
    Finished(String),
}

/// A fake runner that:
/// - records when each command line starts and finishes
/// - optionally sleeps per program to simulate work
/// - optionally reports failure for chosen programs
///
/// Clones share the same journal.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    journal: Arc<Mutex<Vec<RunEvent>>>,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every run of `program` takes `delay`.
    pub fn with_delay(mut self, program: &str, delay: Duration) -> Self {
        self.delays.insert(program.to_string(), delay);
        self
    }

    /// Every run of `program` exits with status 1.
    pub fn failing(mut self, program: &str) -> Self {
        self.failing.insert(program.to_string());
        self
    }

    pub fn journal(&self) -> Vec<RunEvent> {
        self.journal.lock().unwrap().clone()
    }

    /// Command lines in the order they finished.
    pub fn finished(&self) -> Vec<String> {
        self.journal()
            .into_iter()
            .filter_map(|e| match e {
                RunEvent::Finished(line) => Some(line),
                RunEvent::Started(_) => None,
            })
            .collect()
    }

    /// Command lines in the order they started.
    pub fn started(&self) -> Vec<String> {
        self.journal()
            .into_iter()
            .filter_map(|e| match e {
                RunEvent::Started(line) => Some(line),
                RunEvent::Finished(_) => None,
            })
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(
        &self,
        spec: ProcessSpec,
    ) -> Pin<Box<dyn Future<Output = ExecutionReport> + Send + '_>> {
        Box::pin(async move {
            let line = spec.command_line();
            self.journal
                .lock()
                .unwrap()
                .push(RunEvent::Started(line.clone()));

            if let Some(delay) = self.delays.get(&spec.program) {
                tokio::time::sleep(*delay).await;
            }

            self.journal
                .lock()
                .unwrap()
                .push(RunEvent::Finished(line.clone()));

            let outcome = if self.failing.contains(&spec.program) {
                CommandOutcome::Failed(Some(1))
            } else {
                CommandOutcome::Success
            };

            ExecutionReport {
                command_line: line,
                output: Vec::new(),
                outcome,
            }
        })
    }
}
