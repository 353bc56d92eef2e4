//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/consultdesk/config.toml` by default.

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use consultdesk_core::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Configuration for the consultdesk CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Schedule store settings.
    pub store: StoreSettings,

    /// Display settings.
    pub display: DisplaySettings,

    /// Engine settings.
    pub engine: EngineSettings,
}

/// Where schedules are read from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the JSON schedule file. Defaults to the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Display settings for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// strftime format for dates in text output.
    pub date_format: String,

    /// Text to show when nothing matches.
    pub empty_text: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d %H:%M".to_string(),
            empty_text: "No schedules".to_string(),
        }
    }
}

/// Range engine and listing limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Maximum occurrences expanded per event for one agenda.
    pub max_occurrences: usize,

    /// Default number of entries for `upcoming`.
    pub upcoming_limit: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_occurrences: consultdesk_core::DEFAULT_MAX_OCCURRENCES,
            upcoming_limit: 10,
        }
    }
}

impl EngineSettings {
    /// Converts to the engine's configuration.
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig::default().with_max_occurrences(self.max_occurrences)
    }
}

impl CliConfig {
    /// Loads configuration from the default path, or defaults if absent.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("failed to read config: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("failed to parse config: {}", e)))
    }

    /// Checks settings that deserialize fine but cannot be used.
    pub fn validate(&self) -> CliResult<()> {
        if StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(CliError::Config(format!(
                "invalid display.date_format {:?}",
                self.display.date_format
            )));
        }
        if self.engine.max_occurrences == 0 {
            return Err(CliError::Config(
                "engine.max_occurrences must be greater than zero".to_string(),
            ));
        }
        if self.engine.upcoming_limit == 0 {
            return Err(CliError::Config(
                "engine.upcoming_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the schedule file to read, honoring an override.
    pub fn store_path(&self, overridden: Option<&Path>) -> PathBuf {
        overridden
            .map(Path::to_path_buf)
            .or_else(|| self.store.path.clone())
            .unwrap_or_else(|| Self::default_data_dir().join("schedules.json"))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("consultdesk")
    }

    /// Returns the default data directory path.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("consultdesk")
    }
}
