pub mod config;
pub mod error;
pub mod events;
pub mod log_entry;
pub mod model;
pub mod queue;
pub mod selection;
pub mod source;
pub mod transcription;
pub mod view;

pub use config::{ApiConfig, AppConfig};
pub use error::DomainError;
pub use events::WorkflowEvent;
pub use log_entry::{RemoteLogEntry, RemoteLogLevel};
pub use model::TranscriptionModel;
pub use queue::FileQueue;
pub use selection::Selection;
pub use source::{FileItem, Source, UploadedAudio};
pub use transcription::{records_from_response, TranscriptionRecord};
pub use view::ViewMode;
