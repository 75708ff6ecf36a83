#![allow(dead_code)]

use std::time::Duration;

use tend::config::WatchConfig;
use tend::types::{DispatchMode, RunLimit};

/// Builder for `WatchConfig` to simplify test setup.
pub struct WatchConfigBuilder {
    config: WatchConfig,
}

impl WatchConfigBuilder {
    /// Sequential, unbounded watch of `./src` with no commands yet.
    pub fn new() -> Self {
        Self {
            config: WatchConfig::new("./src", Vec::<String>::new()),
        }
    }

    pub fn path(mut self, path: &str) -> Self {
        self.config.path = path.into();
        self
    }

    pub fn command(mut self, cmd: &str) -> Self {
        self.config.commands.push(cmd.to_string());
        self
    }

    pub fn commands(mut self, cmds: &[&str]) -> Self {
        self.config.commands.extend(cmds.iter().map(|c| c.to_string()));
        self
    }

    pub fn concurrent(mut self) -> Self {
        self.config.mode = DispatchMode::Concurrent;
        self
    }

    pub fn count(mut self, count: i64) -> Self {
        self.config.limit = RunLimit::from_count(count);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> WatchConfig {
        self.config
    }
}

impl Default for WatchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
