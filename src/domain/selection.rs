use serde::{Deserialize, Serialize};

use crate::domain::{Source, TranscriptionModel};

/// Apply the pick-again-to-clear rule to an optional choice.
///
/// Picking the active value clears it, picking any other value replaces it.
pub fn toggle_option<T: PartialEq + Copy>(current: &mut Option<T>, picked: T) -> Option<T> {
    *current = if *current == Some(picked) {
        None
    } else {
        Some(picked)
    };
    *current
}

/// Current source and model choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub source: Option<Source>,
    pub model: Option<TranscriptionModel>,
}

impl Selection {
    pub fn new(source: Option<Source>, model: Option<TranscriptionModel>) -> Self {
        Self { source, model }
    }

    /// Toggle a source option. Returns the resulting active source.
    pub fn toggle_source(&mut self, source: Source) -> Option<Source> {
        toggle_option(&mut self.source, source)
    }

    /// Toggle a model option. Returns the resulting active model.
    pub fn toggle_model(&mut self, model: TranscriptionModel) -> Option<TranscriptionModel> {
        toggle_option(&mut self.model, model)
    }

    /// Whether both a source and a model are chosen.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.source.is_some() && self.model.is_some()
    }
}
