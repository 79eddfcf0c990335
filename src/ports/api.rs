use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{DomainError, Source, TranscriptionModel, UploadedAudio};

/// JSON body for processing a file the backend already holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub model: TranscriptionModel,
    /// Always a single name, the workflow submits one file per request.
    pub files: Vec<String>,
    pub is_azure: bool,
}

impl ProcessRequest {
    pub fn single(model: TranscriptionModel, name: impl Into<String>, source: Option<Source>) -> Self {
        Self {
            model,
            files: vec![name.into()],
            is_azure: source.is_some_and(|s| s.is_azure()),
        }
    }
}

/// Port to the transcription backend.
///
/// A non-2xx status is an error. A successful body is handed back as
/// JSON without interpretation, so callers decide what shape they accept.
#[async_trait]
pub trait TranscriptionApi: Send + Sync {
    /// List file names available from a server-side source.
    async fn list_files(&self, source: Source) -> Result<Vec<String>, DomainError>;

    /// Process a file by name.
    async fn process_named(&self, request: &ProcessRequest) -> Result<Value, DomainError>;

    /// Process a file by uploading its bytes.
    async fn process_upload(
        &self,
        model: TranscriptionModel,
        upload: &UploadedAudio,
    ) -> Result<Value, DomainError>;
}
