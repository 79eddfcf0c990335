use std::path::PathBuf;

use crate::domain::{AppConfig, DomainError};

/// Port for loading and saving the console configuration.
pub trait ConfigStore: Send + Sync {
    /// Load configuration, writing the defaults on first use.
    fn load(&self) -> Result<AppConfig, DomainError>;

    /// Persist configuration.
    fn save(&self, config: &AppConfig) -> Result<(), DomainError>;

    /// Location of the configuration file.
    fn config_path(&self) -> PathBuf;

    /// Directory for rotated log files.
    fn logs_dir(&self) -> PathBuf;
}
