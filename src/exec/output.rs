// src/exec/output.rs

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

/// Where invocation lines and captured process output go.
///
/// Each call writes one whole block under a single lock, so blocks from
/// concurrently running commands interleave but never tear mid-block.
#[derive(Debug, Clone, Default)]
pub enum Console {
    #[default]
    Stdout,
    /// In-memory sink, used to observe output in tests.
    Buffer(Arc<Mutex<Vec<u8>>>),
}

impl Console {
    /// A console writing into a fresh shared buffer.
    pub fn buffer() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (Console::Buffer(Arc::clone(&buf)), buf)
    }

    /// Write one line, appending the newline.
    pub fn line(&self, line: &str) {
        let mut block = String::with_capacity(line.len() + 1);
        block.push_str(line);
        block.push('\n');
        self.write_block(block.as_bytes());
    }

    /// Write raw bytes as they are.
    pub fn write_block(&self, bytes: &[u8]) {
        match self {
            Console::Stdout => {
                let mut out = std::io::stdout().lock();
                if let Err(err) = out.write_all(bytes).and_then(|()| out.flush()) {
                    debug!(error = %err, "failed to write to stdout");
                }
            }
            Console::Buffer(buf) => {
                buf.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend_from_slice(bytes);
            }
        }
    }
}
