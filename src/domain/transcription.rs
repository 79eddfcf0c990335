use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One completed transcription returned by the processing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionRecord {
    pub filename: String,
    pub transcription: String,
}

impl TranscriptionRecord {
    pub fn new(filename: impl Into<String>, transcription: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            transcription: transcription.into(),
        }
    }
}

/// Extract records from a processing response body.
///
/// Only a JSON array of records yields anything. Any other shape,
/// including an array holding non-record elements, yields nothing.
pub fn records_from_response(body: Value) -> Vec<TranscriptionRecord> {
    if !body.is_array() {
        debug!("Processing response is not an array, nothing to record");
        return Vec::new();
    }

    match serde_json::from_value(body) {
        Ok(records) => records,
        Err(e) => {
            debug!(error = %e, "Processing response array does not hold records");
            Vec::new()
        }
    }
}
