use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{DomainError, UploadedAudio};
use crate::ports::FilePicker;

/// Picker over paths chosen up front, e.g. on the command line.
pub struct PathFilePicker {
    paths: Vec<PathBuf>,
}

impl PathFilePicker {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl FilePicker for PathFilePicker {
    async fn pick(&self) -> Result<Vec<UploadedAudio>, DomainError> {
        let mut picked = Vec::with_capacity(self.paths.len());

        for path in &self.paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .ok_or_else(|| DomainError::Io(format!("Not a file path: {}", path.display())))?;

            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| DomainError::Io(format!("{}: {}", path.display(), e)))?;

            picked.push(UploadedAudio::new(name, bytes));
        }

        info!(count = picked.len(), "Files picked");
        Ok(picked)
    }
}
