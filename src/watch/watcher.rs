// src/watch/watcher.rs

use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::info;

use crate::errors::{Result, TendError};
use crate::watch::event::WatchEvent;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    path: PathBuf,
}

impl WatcherHandle {
    /// The path this handle is subscribed to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Subscribe to change notifications for `path`.
///
/// Returns the handle owning the subscription and the stream of classified
/// events. Both creating the watcher and subscribing the path are fatal on
/// failure; everything the backend reports afterwards arrives as
/// [`WatchEvent::Error`] on the stream.
pub fn subscribe(
    path: &Path,
    recursive: bool,
) -> Result<(WatcherHandle, mpsc::UnboundedReceiver<WatchEvent>)> {
    // Channel from the blocking notify callback into the async world.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<WatchEvent>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            // A closed channel means the watch loop is shutting down.
            let _ = event_tx.send(WatchEvent::from(res));
        },
        Config::default(),
    )
    .map_err(TendError::WatcherInit)?;

    let mode = if recursive {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    };

    watcher
        .watch(path, mode)
        .map_err(|source| TendError::Subscribe {
            path: path.to_path_buf(),
            source,
        })?;

    info!(?mode, "watching {:?}", path);

    let handle = WatcherHandle {
        _inner: watcher,
        path: path.to_path_buf(),
    };
    Ok((handle, event_rx))
}
