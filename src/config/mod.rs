//! Configuration system for Sysboard

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::poller::PollIntervals;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/dashboard/api";

/// Global application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub display: DisplayConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sysboard").join("config.toml"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub metrics_interval_ms: u64,
    pub processes_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            metrics_interval_ms: 2000,
            processes_interval_ms: 5000,
        }
    }
}

impl PollingConfig {
    /// Zero would make `tokio::time::interval` panic, so it is floored at 100ms.
    pub fn intervals(&self) -> PollIntervals {
        PollIntervals {
            metrics: Duration::from_millis(self.metrics_interval_ms.max(100)),
            processes: Duration::from_millis(self.processes_interval_ms.max(100)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub theme: String,
    pub default_section: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "tokyo-night".to_string(),
            default_section: "overview".to_string(),
        }
    }
}

/// Write the default configuration to `path`
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    Config::default().save(path)?;
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[polling]\nmetrics_interval_ms = 1000\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.polling.metrics_interval_ms, 1000);
        assert_eq!(config.polling.processes_interval_ms, 5000);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.display.default_section, "overview");
    }

    #[test]
    fn init_writes_loadable_defaults_and_respects_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_config(&path, false).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());

        assert!(init_config(&path, false).is_err());
        assert!(init_config(&path, true).is_ok());
    }

    #[test]
    fn intervals_default_to_two_and_five_seconds() {
        let intervals = PollingConfig::default().intervals();
        assert_eq!(intervals, PollIntervals::default());

        let floored = PollingConfig {
            metrics_interval_ms: 0,
            processes_interval_ms: 0,
        }
        .intervals();
        assert_eq!(floored.metrics, Duration::from_millis(100));
    }
}
