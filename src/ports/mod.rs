pub mod api;
pub mod config;
pub mod file_picker;
pub mod notifier;
pub mod playback;
pub mod remote_log;

pub use api::{ProcessRequest, TranscriptionApi};
pub use config::ConfigStore;
pub use file_picker::FilePicker;
pub use notifier::Notifier;
pub use playback::AudioElement;
pub use remote_log::RemoteLogSink;
