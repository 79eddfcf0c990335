use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::domain::config::ApiConfig;

/// Origin of candidate audio files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Azure blob container, listed by the backend.
    Azure,
    /// Folder on the backend host.
    LocalFolder,
    /// AWS bucket, listed by the backend.
    Aws,
    /// Files picked on the client and uploaded as raw bytes.
    BrowseFile,
}

impl Source {
    /// All sources in display order.
    pub const ALL: [Source; 4] = [
        Source::Azure,
        Source::LocalFolder,
        Source::Aws,
        Source::BrowseFile,
    ];

    /// Label shown next to the option.
    pub fn label(&self) -> &'static str {
        match self {
            Source::Azure => "azure",
            Source::LocalFolder => "localFolder",
            Source::Aws => "Aws",
            Source::BrowseFile => "Browse File",
        }
    }

    /// Whether files from this source travel as raw bytes.
    #[must_use]
    pub fn is_browse(&self) -> bool {
        matches!(self, Source::BrowseFile)
    }

    /// Whether files from this source live in the Azure container.
    #[must_use]
    pub fn is_azure(&self) -> bool {
        matches!(self, Source::Azure)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raw bytes of a file picked on the client.
/// The content is zeroed when dropped.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct UploadedAudio {
    file_name: String,
    bytes: Vec<u8>,
}

impl UploadedAudio {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for UploadedAudio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedAudio")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One candidate audio file.
///
/// Listed files carry only a name. Picked files carry their bytes, so
/// `upload()` is `Some` exactly when `source()` is [`Source::BrowseFile`].
#[derive(Debug, Clone)]
pub struct FileItem {
    name: String,
    source: Source,
    upload: Option<UploadedAudio>,
}

impl FileItem {
    /// A file known to the backend by name.
    pub fn listed(name: impl Into<String>, source: Source) -> Self {
        debug_assert!(!source.is_browse(), "listed files never come from the picker");
        Self {
            name: name.into(),
            source,
            upload: None,
        }
    }

    /// A file picked on the client.
    pub fn uploaded(upload: UploadedAudio) -> Self {
        Self {
            name: upload.file_name().to_string(),
            source: Source::BrowseFile,
            upload: Some(upload),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn upload(&self) -> Option<&UploadedAudio> {
        self.upload.as_ref()
    }

    /// URL the backend streams this file from.
    /// Picked files have no server-side copy and return `None`.
    pub fn stream_url(&self, api: &ApiConfig) -> Option<String> {
        let prefix = match self.source {
            Source::Azure => &api.azure_audio_prefix,
            Source::LocalFolder | Source::Aws => &api.local_audio_prefix,
            Source::BrowseFile => return None,
        };
        api.audio_url(prefix, &self.name).ok().map(String::from)
    }
}
