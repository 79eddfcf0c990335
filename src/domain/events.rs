use serde::Serialize;

use crate::domain::TranscriptionRecord;

/// Progress of a submission run, one event per observable step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowEvent {
    /// Run accepted with this many pending files.
    Started { total: usize },
    /// A file moved from pending to processed.
    FileProcessed {
        name: String,
        records: Vec<TranscriptionRecord>,
    },
    /// The request for this file failed. Nothing after it was sent.
    Aborted { name: String, reason: String },
    /// The run reached the end of its batch without a failure.
    Finished { processed: usize },
}
