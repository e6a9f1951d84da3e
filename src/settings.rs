use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{alerts::ThresholdConfig, history::DEFAULT_RECENT_CAPACITY, models::LightSchedule};

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 3_000;
const DEBUG_TICK_INTERVAL_MS: u64 = 500;
/// tokio intervals panic on a zero period.
const MIN_TICK_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonitorSettings {
    pub tick_interval_ms: u64,
    pub thresholds: ThresholdConfig,
    pub light_schedule: LightSchedule,
    pub history_capacity: usize,
    /// Fixed seed for a reproducible simulation; random when absent.
    pub simulator_seed: Option<u64>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            thresholds: ThresholdConfig::default(),
            light_schedule: LightSchedule::default(),
            history_capacity: DEFAULT_RECENT_CAPACITY,
            simulator_seed: None,
        }
    }
}

impl MonitorSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(MIN_TICK_INTERVAL_MS))
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `BROODER_DEBUG`, `BROODER_TICK_MS` and `BROODER_SIM_SEED`.
    /// Unparsable values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let debug_mode = lookup("BROODER_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if debug_mode {
            self.tick_interval_ms = DEBUG_TICK_INTERVAL_MS;
        }

        if let Some(ms) = lookup("BROODER_TICK_MS").and_then(|v| v.trim().parse().ok()) {
            self.tick_interval_ms = ms;
        }

        if let Some(seed) = lookup("BROODER_SIM_SEED").and_then(|v| v.trim().parse().ok()) {
            self.simulator_seed = Some(seed);
        }

        self
    }
}

/// Monitor settings read from a JSON file, falling back to defaults.
pub struct SettingsStore {
    data: MonitorSettings,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("ignoring malformed settings in {}: {err}", path.display());
                MonitorSettings::default()
            })
        } else {
            MonitorSettings::default()
        };

        Ok(Self { data })
    }

    pub fn current(&self) -> MonitorSettings {
        self.data.clone()
    }
}
