// src/watch/event.rs

use std::path::PathBuf;

use notify::event::ModifyKind;
use notify::{Event, EventKind};

/// Coarse classification of a filesystem change.
///
/// Only [`ChangeKind::Write`] triggers a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File content was modified.
    Write,
    Create,
    Remove,
    Rename,
    /// Permissions or other metadata changed.
    Chmod,
    /// Access, or anything the backend could not classify.
    Other,
}

impl ChangeKind {
    pub fn classify(kind: &EventKind) -> Self {
        match kind {
            // Some backends cannot tell what was modified and report `Any`.
            EventKind::Modify(ModifyKind::Data(_)) | EventKind::Modify(ModifyKind::Any) => {
                ChangeKind::Write
            }
            EventKind::Modify(ModifyKind::Name(_)) => ChangeKind::Rename,
            EventKind::Modify(ModifyKind::Metadata(_)) => ChangeKind::Chmod,
            EventKind::Create(_) => ChangeKind::Create,
            EventKind::Remove(_) => ChangeKind::Remove,
            _ => ChangeKind::Other,
        }
    }

    pub fn is_write(self) -> bool {
        self == ChangeKind::Write
    }
}

/// One item of the notification stream consumed by the watch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    Changed {
        kind: ChangeKind,
        paths: Vec<PathBuf>,
    },
    /// The notification backend reported a problem after subscribing.
    Error {
        paths: Vec<PathBuf>,
        message: String,
    },
}

impl WatchEvent {
    pub fn changed(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        WatchEvent::Changed {
            kind,
            paths: vec![path.into()],
        }
    }

    /// Shorthand for a content modification of `path`.
    pub fn write(path: impl Into<PathBuf>) -> Self {
        Self::changed(ChangeKind::Write, path)
    }

    pub fn error(message: impl Into<String>) -> Self {
        WatchEvent::Error {
            paths: Vec::new(),
            message: message.into(),
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, WatchEvent::Changed { kind, .. } if kind.is_write())
    }
}

impl From<notify::Result<Event>> for WatchEvent {
    fn from(res: notify::Result<Event>) -> Self {
        match res {
            Ok(event) => WatchEvent::Changed {
                kind: ChangeKind::classify(&event.kind),
                paths: event.paths,
            },
            Err(err) => WatchEvent::Error {
                message: err.to_string(),
                paths: err.paths,
            },
        }
    }
}
