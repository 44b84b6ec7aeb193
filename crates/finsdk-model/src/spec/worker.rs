use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    CONFIG_KEY_FETCH_URL, CONFIG_KEY_MAINTENANCE, CONFIG_KEY_TICK_MS, ConfigMap, DEFAULT_FETCH_URL,
    DEFAULT_TICK_MS, Flag,
};

/// Declarative specification for the background worker loop.
///
/// Describes *what* the loop polls and *how often*, independent of the
/// context that eventually runs it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerConfig {
    /// Endpoint fetched on every iteration.
    pub fetch_url: String,
    /// Delay between iterations in milliseconds.
    ///
    /// The delay is cancellable: a stop signal interrupts the sleep instead
    /// of waiting out the full interval.
    pub tick_ms: u64,
    /// Whether the continuous-logic step runs memory maintenance.
    ///
    /// When disabled the step only emits a trace log.
    pub maintenance: Flag,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            fetch_url: DEFAULT_FETCH_URL.to_string(),
            tick_ms: DEFAULT_TICK_MS,
            maintenance: Flag::enabled(),
        }
    }
}

impl WorkerConfig {
    /// Replace the fetch endpoint.
    pub fn with_fetch_url(mut self, url: impl Into<String>) -> Self {
        self.fetch_url = url.into();
        self
    }

    /// Replace the tick interval.
    pub fn with_tick_ms(mut self, ms: u64) -> Self {
        self.tick_ms = ms;
        self
    }

    /// Toggle memory maintenance.
    pub fn with_maintenance(mut self, flag: Flag) -> Self {
        self.maintenance = flag;
        self
    }

    /// Tick interval as a [`Duration`].
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Apply overrides from loaded configuration.
    ///
    /// Recognized keys: [`CONFIG_KEY_FETCH_URL`], [`CONFIG_KEY_TICK_MS`],
    /// [`CONFIG_KEY_MAINTENANCE`]. Values that fail to parse are logged and
    /// ignored, keeping the previous setting.
    pub fn overlay(mut self, cfg: &ConfigMap) -> Self {
        if let Some(url) = cfg.get(CONFIG_KEY_FETCH_URL) {
            self.fetch_url = url.to_string();
        }
        if let Some(raw) = cfg.get(CONFIG_KEY_TICK_MS) {
            match raw.parse::<u64>() {
                Ok(ms) => self.tick_ms = ms,
                Err(_) => warn!(value = raw, "ignoring unparseable tick_ms override"),
            }
        }
        if let Some(raw) = cfg.get(CONFIG_KEY_MAINTENANCE) {
            match raw.parse::<bool>() {
                Ok(b) => self.maintenance = b.into(),
                Err(_) => warn!(value = raw, "ignoring unparseable maintenance override"),
            }
        }
        self
    }
}
