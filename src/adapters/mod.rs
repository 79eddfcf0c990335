pub mod config_store;
pub mod file_picker;
pub mod http_api;
pub mod notifier;
pub mod remote_log;

pub use config_store::TomlConfigStore;
pub use file_picker::PathFilePicker;
pub use http_api::HttpTranscriptionApi;
pub use notifier::ConsoleNotifier;
pub use remote_log::HttpRemoteLog;
