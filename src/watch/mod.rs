// src/watch/mod.rs

//! File watching.
//!
//! This module is responsible for:
//! - Subscribing to change notifications for the watched path (`notify`).
//! - Turning raw notifications into [`WatchEvent`]s, classified so the watch
//!   loop can tell writes apart from every other kind of change.
//!
//! It does **not** decide what to run; that is the engine's job.

pub mod event;
pub mod watcher;

pub use event::{ChangeKind, WatchEvent};
pub use watcher::{subscribe, WatcherHandle};
