use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{DomainError, Source, TranscriptionModel};

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the transcription backend.
    pub base_url: String,
    /// Per-request timeout in seconds.
    /// Transcription of long files is slow, keep this generous.
    pub timeout_secs: u64,
    pub azure_files_path: String,
    pub local_files_path: String,
    pub aws_files_path: String,
    pub process_path: String,
    pub log_path: String,
    /// Prefix for streaming files from the local folder.
    pub local_audio_prefix: String,
    /// Prefix for streaming files from the Azure container.
    pub azure_audio_prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 300,
            azure_files_path: "/api/azure-files".to_string(),
            local_files_path: "/api/local-files".to_string(),
            aws_files_path: "/api/aws-files".to_string(),
            process_path: "/api/process-audio".to_string(),
            log_path: "/api/log".to_string(),
            local_audio_prefix: "/audio".to_string(),
            azure_audio_prefix: "/azure-audio".to_string(),
        }
    }
}

impl ApiConfig {
    /// Resolve an endpoint path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, DomainError> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| DomainError::Config(format!("Base URL cannot be a base: {}", self.base_url)))?;
            segments.pop_if_empty();
            for part in path.split('/').filter(|p| !p.is_empty()) {
                segments.push(part);
            }
        }
        Ok(url)
    }

    /// URL of an audio stream. The file name is pushed as one
    /// percent-encoded segment.
    pub fn audio_url(&self, prefix: &str, name: &str) -> Result<Url, DomainError> {
        let mut url = self.endpoint(prefix)?;
        url.path_segments_mut()
            .map_err(|_| DomainError::Config(format!("Base URL cannot be a base: {}", self.base_url)))?
            .push(name);
        Ok(url)
    }

    /// Listing endpoint for a source, or `None` for the picker.
    pub fn listing_path(&self, source: Source) -> Option<&str> {
        match source {
            Source::Azure => Some(self.azure_files_path.as_str()),
            Source::LocalFolder => Some(self.local_files_path.as_str()),
            Source::Aws => Some(self.aws_files_path.as_str()),
            Source::BrowseFile => None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable JSON file logging with daily rotation.
    pub file_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
        }
    }
}

/// Remote log forwarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteLogConfig {
    /// Forward workflow errors to the backend log endpoint.
    pub enabled: bool,
}

impl Default for RemoteLogConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Selection used by the CLI when a flag is omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub source: Option<Source>,
    pub model: Option<TranscriptionModel>,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub remote_log: RemoteLogConfig,
    pub defaults: DefaultsConfig,
}

impl AppConfig {
    /// Create a new AppConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }
}
