// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::FileConfig;
use crate::errors::Result;

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; merging with the command line
/// happens in [`crate::config::resolve`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<FileConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: FileConfig = toml::from_str(&contents)?;

    Ok(config)
}
