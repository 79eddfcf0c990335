use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::{AppConfig, DomainError};
use crate::ports::ConfigStore;

const APP_DIR: &str = "scribe-console";

/// TOML-based configuration store.
pub struct TomlConfigStore {
    config_path: PathBuf,
    logs_dir: PathBuf,
}

impl TomlConfigStore {
    /// Store in the OS-specific config directory.
    /// - Linux: ~/.config/scribe-console/config.toml
    /// - macOS: ~/Library/Application Support/scribe-console/config.toml
    /// - Windows: %APPDATA%\scribe-console\config.toml
    pub fn new() -> Result<Self, DomainError> {
        let config_dir = dirs::config_dir()
            .map(|p| p.join(APP_DIR))
            .ok_or_else(|| DomainError::Config("Could not find configuration directory".to_string()))?;

        let logs_dir = dirs::data_local_dir()
            .map(|p| p.join(APP_DIR).join("logs"))
            .unwrap_or_else(|| config_dir.join("logs"));

        info!(config_dir = ?config_dir, "ConfigStore initialized");

        Ok(Self {
            config_path: config_dir.join("config.toml"),
            logs_dir,
        })
    }

    /// Store at an explicit file path. Logs go next to it.
    pub fn at(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let logs_dir = config_path
            .parent()
            .map(|p| p.join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"));

        Self {
            config_path,
            logs_dir,
        }
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<AppConfig, DomainError> {
        if self.config_path.exists() {
            debug!(path = ?self.config_path, "Loading configuration");
            let content = fs::read_to_string(&self.config_path)?;
            let config: AppConfig = toml::from_str(&content)?;
            info!(path = ?self.config_path, "Configuration loaded");
            Ok(config)
        } else {
            info!(path = ?self.config_path, "Configuration file not found, creating default");
            let config = AppConfig::new();
            self.save(&config)?;
            Ok(config)
        }
    }

    fn save(&self, config: &AppConfig) -> Result<(), DomainError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content)?;

        info!(path = ?self.config_path, "Configuration saved");
        Ok(())
    }

    fn config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    fn logs_dir(&self) -> PathBuf {
        self.logs_dir.clone()
    }
}
