use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::domain::{FileItem, TranscriptionRecord};

const NO_RESULTS: &str = "No transcriptions available.";

/// Which view the session is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Pending and processed files side by side.
    #[default]
    Queue,
    /// Flat list of transcriptions.
    Results,
}

impl ViewMode {
    /// Switch to the other view.
    pub fn toggle(&mut self) -> ViewMode {
        *self = match self {
            ViewMode::Queue => ViewMode::Results,
            ViewMode::Results => ViewMode::Queue,
        };
        *self
    }
}

/// Render transcriptions as filename and text pairs.
pub fn render_results(results: &[TranscriptionRecord]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut out = String::new();
    for (idx, record) in results.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "File: {}", record.filename);
        let _ = writeln!(out, "{}", record.transcription);
    }
    out
}

/// Render the two-column Inbox/Outbox view.
pub fn render_queue(pending: &[FileItem], processed: &[String]) -> String {
    let left: Vec<String> = pending
        .iter()
        .enumerate()
        .map(|(idx, item)| format!("{}: {}", idx, item.name()))
        .collect();

    let width = left
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once("Inbox".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$} | Outbox", "Inbox", width = width);
    let _ = writeln!(out, "{}-+-{}", "-".repeat(width), "-".repeat("Outbox".len()));

    let rows = left.len().max(processed.len());
    for row in 0..rows {
        let l = left.get(row).map(String::as_str).unwrap_or("");
        let r = processed.get(row).map(String::as_str).unwrap_or("");
        let line = format!("{:<width$} | {}", l, r, width = width);
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}
