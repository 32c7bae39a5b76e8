//! TOML-based application configuration.
//!
//! Stores tracker preferences:
//! - Defaults for a fresh day draft (mode, environment, macro novelty)
//! - History window loaded on open
//! - Autosave debounce
//!
//! Configuration is stored at `~/.config/expansion/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::day::{DayInput, Mode};
use crate::error::ConfigError;

/// Tracker behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_mode")]
    pub default_mode: Mode,
    #[serde(default = "default_environment")]
    pub default_environment: f64,
    #[serde(default = "default_macro_novelty")]
    pub default_macro_novelty: u8,
    /// Number of recent records loaded on open.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Milliseconds of edit silence before a draft autosaves.
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: i64,
}

impl TrackerConfig {
    /// A fresh draft seeded with the configured defaults.
    pub fn default_draft(&self) -> DayInput {
        DayInput {
            mode: self.default_mode,
            environment: self.default_environment,
            macro_novelty: self.default_macro_novelty,
            ..DayInput::default()
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_mode: default_mode(),
            default_environment: default_environment(),
            default_macro_novelty: default_macro_novelty(),
            history_window: default_history_window(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/expansion/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,
}

impl Config {
    /// Path of the config file inside the data directory.
    pub fn path() -> std::io::Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Write the configuration back to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;

        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }
}

fn default_mode() -> Mode {
    Mode::Building
}
fn default_environment() -> f64 {
    0.5
}
fn default_macro_novelty() -> u8 {
    5
}
fn default_history_window() -> usize {
    90
}
fn default_autosave_debounce_ms() -> i64 {
    1500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fresh_draft() {
        let config = TrackerConfig::default();
        assert_eq!(config.default_draft(), DayInput::default());
        assert_eq!(config.history_window, 90);
        assert_eq!(config.autosave_debounce_ms, 1500);
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            "[tracker]\ndefault_mode = \"expanding\"\nhistory_window = 30\n",
        )
        .unwrap();

        assert_eq!(config.tracker.default_mode, Mode::Expanding);
        assert_eq!(config.tracker.history_window, 30);
        assert_eq!(config.tracker.default_environment, 0.5);
        assert_eq!(config.tracker.autosave_debounce_ms, 1500);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = Config::default();
        let raw = toml::to_string_pretty(&config).unwrap();
        let reloaded: Config = toml::from_str(&raw).unwrap();
        assert_eq!(reloaded.tracker.default_mode, config.tracker.default_mode);
        assert_eq!(reloaded.tracker.history_window, config.tracker.history_window);
    }
}
