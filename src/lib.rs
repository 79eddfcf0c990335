#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
pub mod commands;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use app::{AppController, Ports, SubmissionSummary};
pub use domain::{DomainError, FileItem, Selection, Source, TranscriptionModel, TranscriptionRecord};
