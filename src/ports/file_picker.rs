use async_trait::async_trait;

use crate::domain::{DomainError, UploadedAudio};

/// Port for picking audio files on the client side.
#[async_trait]
pub trait FilePicker: Send + Sync {
    /// Let the user choose files and read them.
    ///
    /// An empty list means the user chose nothing.
    async fn pick(&self) -> Result<Vec<UploadedAudio>, DomainError>;
}
