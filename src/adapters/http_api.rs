use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::domain::{ApiConfig, DomainError, Source, TranscriptionModel, UploadedAudio};
use crate::ports::{ProcessRequest, TranscriptionApi};

/// reqwest client for the transcription backend.
pub struct HttpTranscriptionApi {
    client: Client,
    api: ApiConfig,
}

impl HttpTranscriptionApi {
    pub fn new(api: ApiConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .use_rustls_tls()
            .user_agent(format!("ScribeConsole/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|e| DomainError::HttpRequest(format!("Failed to create HTTP client: {}", e)))?;

        info!(base_url = %api.base_url, "Transcription API client initialized");

        Ok(Self { client, api })
    }

    /// Send a request and reject non-2xx responses.
    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::HttpRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    /// Read a success body as JSON. A body that is not JSON comes back
    /// as a string value.
    async fn read_body(response: Response) -> Result<Value, DomainError> {
        let text = response
            .text()
            .await
            .map_err(|e| DomainError::HttpRequest(e.to_string()))?;

        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") => "audio/mp4",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl TranscriptionApi for HttpTranscriptionApi {
    async fn list_files(&self, source: Source) -> Result<Vec<String>, DomainError> {
        let path = self
            .api
            .listing_path(source)
            .ok_or_else(|| DomainError::Config(format!("Source '{}' has no listing endpoint", source)))?;
        let url = self.api.endpoint(path)?;

        debug!(url = %url, source = %source, "Listing files");

        let response = self.send(self.client.get(url.clone()), &url).await?;
        let names: Vec<String> = response
            .json()
            .await
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        info!(source = %source, count = names.len(), "Files listed");
        Ok(names)
    }

    async fn process_named(&self, request: &ProcessRequest) -> Result<Value, DomainError> {
        let url = self.api.endpoint(&self.api.process_path)?;

        debug!(url = %url, files = ?request.files, model = %request.model, "Submitting file by name");

        let response = self.send(self.client.post(url.clone()).json(request), &url).await?;
        Self::read_body(response).await
    }

    async fn process_upload(
        &self,
        model: TranscriptionModel,
        upload: &UploadedAudio,
    ) -> Result<Value, DomainError> {
        let url = self.api.endpoint(&self.api.process_path)?;

        let part = Part::bytes(upload.bytes().to_vec())
            .file_name(upload.file_name().to_string())
            .mime_str(mime_for(upload.file_name()))
            .map_err(|e| DomainError::HttpRequest(format!("mime: {}", e)))?;

        let form = Form::new()
            .text("model", model.wire_name())
            .part("files", part);

        debug!(
            url = %url,
            file = upload.file_name(),
            size = upload.len(),
            model = %model,
            "Uploading file"
        );

        let response = self.send(self.client.post(url.clone()).multipart(form), &url).await?;
        Self::read_body(response).await
    }
}
