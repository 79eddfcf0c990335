use async_trait::async_trait;

use crate::domain::RemoteLogEntry;

/// Port for forwarding structured log entries to the backend.
///
/// Delivery is best effort. Implementations report their own failures
/// locally and never hand them back to the caller.
#[async_trait]
pub trait RemoteLogSink: Send + Sync {
    async fn send(&self, entry: RemoteLogEntry);
}
