use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Transcription backend selected for processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionModel {
    /// Azure speech service.
    Azure,
    /// Deepgram hosted model.
    Deepgram,
    /// AWS Transcribe.
    Aws,
    /// Whisper running on the backend host.
    Whisper,
}

impl TranscriptionModel {
    /// All models in display order.
    pub const ALL: [TranscriptionModel; 4] = [
        TranscriptionModel::Azure,
        TranscriptionModel::Deepgram,
        TranscriptionModel::Aws,
        TranscriptionModel::Whisper,
    ];

    /// Name sent to the processing endpoint.
    pub fn wire_name(&self) -> &'static str {
        match self {
            TranscriptionModel::Azure => "azure",
            TranscriptionModel::Deepgram => "deepgram",
            TranscriptionModel::Aws => "aws",
            TranscriptionModel::Whisper => "whisper",
        }
    }
}

impl fmt::Display for TranscriptionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl FromStr for TranscriptionModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.wire_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown model: {}", s))
    }
}
