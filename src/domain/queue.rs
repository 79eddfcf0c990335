use std::collections::HashSet;

use tracing::warn;

use crate::domain::{FileItem, TranscriptionRecord};

/// Session state of a submission: files waiting, files done, and the
/// transcriptions collected so far.
///
/// Names are unique within the pending list, so a name identifies an item.
#[derive(Debug, Default)]
pub struct FileQueue {
    pending: Vec<FileItem>,
    processed: Vec<String>,
    results: Vec<TranscriptionRecord>,
}

impl FileQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending list wholesale.
    ///
    /// Later duplicates of a name are dropped. Returns the number of
    /// items kept.
    pub fn replace_pending(&mut self, items: Vec<FileItem>) -> usize {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(items.len());
        for item in items {
            if seen.insert(item.name().to_string()) {
                kept.push(item);
            } else {
                warn!(file = item.name(), "Duplicate file name dropped from pending list");
            }
        }
        self.pending = kept;
        self.pending.len()
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> &[FileItem] {
        &self.pending
    }

    pub fn processed(&self) -> &[String] {
        &self.processed
    }

    pub fn results(&self) -> &[TranscriptionRecord] {
        &self.results
    }

    pub fn pending_names(&self) -> Vec<String> {
        self.pending.iter().map(|f| f.name().to_string()).collect()
    }

    /// Move a file from pending to processed and keep its records.
    ///
    /// Returns `false` and changes nothing if the file is not pending.
    pub fn complete(&mut self, name: &str, records: Vec<TranscriptionRecord>) -> bool {
        let Some(pos) = self.pending.iter().position(|f| f.name() == name) else {
            return false;
        };
        self.pending.remove(pos);
        self.processed.push(name.to_string());
        self.results.extend(records);
        true
    }
}
