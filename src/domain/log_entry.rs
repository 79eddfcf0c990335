use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Level of a remote log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteLogLevel {
    Log,
    Info,
    Warn,
    Error,
    Debug,
}

/// Body of a `POST /api/log` request.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteLogEntry {
    pub level: RemoteLogLevel,
    pub message: String,
    pub metadata: Map<String, Value>,
    pub timestamp: String,
}

impl RemoteLogEntry {
    pub fn new(level: RemoteLogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            metadata: Map::new(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(RemoteLogLevel::Error, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(RemoteLogLevel::Warn, message)
    }

    /// Attach a metadata field.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}
