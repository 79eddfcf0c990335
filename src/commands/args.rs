//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::{Source, TranscriptionModel, ViewMode};

/// Scribe Console - submit audio files to a transcription backend
#[derive(Parser, Debug)]
#[command(name = "scribe-console")]
#[command(about = "Control panel for a remote audio transcription backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file path (default: <config dir>/scribe-console/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the audio files a server-side source offers
    List(ListArgs),
    /// Select a source and model, then process every file
    Process(ProcessArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Source to list
    #[arg(short, long, value_enum)]
    pub source: SourceArg,
}

#[derive(Parser, Debug)]
pub struct ProcessArgs {
    /// Where the audio files come from (default: [defaults] source)
    #[arg(short, long, value_enum)]
    pub source: Option<SourceArg>,

    /// Transcription model (default: [defaults] model)
    #[arg(short, long, value_enum)]
    pub model: Option<ModelArg>,

    /// Files to upload (only with --source browse)
    #[arg(short, long = "file")]
    pub files: Vec<PathBuf>,

    /// View printed when the run ends
    #[arg(long, value_enum, default_value_t = ViewArg::Results)]
    pub view: ViewArg,
}

#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum SourceArg {
    /// Azure blob container
    Azure,
    /// Folder on the backend host
    Local,
    /// AWS bucket
    Aws,
    /// Local files given with --file
    Browse,
}

impl From<SourceArg> for Source {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Azure => Source::Azure,
            SourceArg::Local => Source::LocalFolder,
            SourceArg::Aws => Source::Aws,
            SourceArg::Browse => Source::BrowseFile,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum ModelArg {
    Azure,
    Deepgram,
    Aws,
    Whisper,
}

impl From<ModelArg> for TranscriptionModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Azure => TranscriptionModel::Azure,
            ModelArg::Deepgram => TranscriptionModel::Deepgram,
            ModelArg::Aws => TranscriptionModel::Aws,
            ModelArg::Whisper => TranscriptionModel::Whisper,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default, Debug, PartialEq, Eq)]
pub enum ViewArg {
    /// Inbox and Outbox columns
    Queue,
    /// Transcription texts
    #[default]
    Results,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Queue => ViewMode::Queue,
            ViewArg::Results => ViewMode::Results,
        }
    }
}
