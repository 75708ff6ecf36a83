// src/config/mod.rs

//! Configuration for tend.
//!
//! Responsibilities:
//! - Define the optional TOML file model and the resolved, immutable
//!   [`WatchConfig`] handed to the watch loop (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Merge CLI flags over file values and decide whether there is anything
//!   to watch at all (`resolve.rs`).

pub mod loader;
pub mod model;
pub mod resolve;

pub use loader::load_from_path;
pub use model::{CommandSpec, FileConfig, RunSection, WatchConfig, WatchSection};
pub use resolve::{parse_duration, resolve, resolve_with_file, Resolution};
