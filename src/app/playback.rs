use tracing::debug;

use crate::ports::AudioElement;

/// Keeps at most one audio element of the pending list playing.
///
/// The marker is a single index, so two items can never both be marked.
#[derive(Debug, Default)]
pub struct PlaybackController {
    playing: Option<usize>,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the element currently playing.
    pub fn playing(&self) -> Option<usize> {
        self.playing
    }

    /// Play or pause element `index`.
    ///
    /// Every other element is paused and rewound. The toggled element
    /// keeps its position when paused. An index with no element is
    /// ignored.
    pub fn toggle<E: AudioElement>(&mut self, elements: &mut [E], index: usize) -> Option<usize> {
        if index >= elements.len() {
            debug!(index, count = elements.len(), "No audio element at index");
            return self.playing;
        }

        for (i, element) in elements.iter_mut().enumerate() {
            if i != index {
                element.pause();
                element.rewind();
            }
        }

        let current = &mut elements[index];
        if self.playing == Some(index) {
            current.pause();
            self.playing = None;
        } else {
            current.play();
            self.playing = Some(index);
        }

        self.playing
    }

    /// Element `index` reached its end.
    pub fn ended(&mut self, index: usize) {
        if self.playing == Some(index) {
            self.playing = None;
        }
    }

    /// Forget the marker, e.g. when the list is replaced.
    pub fn reset(&mut self) {
        self.playing = None;
    }
}
