// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Only startup problems surface here. Failures of the watched commands are
//! reported by the process runner and never become a `TendError`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TendError {
    #[error("failed to create file watcher: {0}")]
    WatcherInit(#[source] notify::Error),

    #[error("failed to watch {}: {source}", .path.display())]
    Subscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TendError>;
