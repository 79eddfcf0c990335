use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{ApiConfig, DomainError, RemoteLogEntry};
use crate::ports::RemoteLogSink;

/// Sends log entries to the backend log endpoint.
pub struct HttpRemoteLog {
    client: Client,
    url: Url,
    enabled: bool,
}

impl HttpRemoteLog {
    pub fn new(api: &ApiConfig, enabled: bool) -> Result<Self, DomainError> {
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DomainError::HttpRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: api.endpoint(&api.log_path)?,
            enabled,
        })
    }

    async fn try_send(&self, entry: &RemoteLogEntry) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(entry)
            .send()
            .await
            .map_err(|e| DomainError::HttpRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::HttpStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteLogSink for HttpRemoteLog {
    async fn send(&self, entry: RemoteLogEntry) {
        if !self.enabled {
            debug!(message = %entry.message, "Remote log disabled, entry dropped");
            return;
        }

        if let Err(e) = self.try_send(&entry).await {
            warn!(error = %e, message = %entry.message, "Failed to send log to server");
        }
    }
}
