pub mod controller;
pub mod playback;
pub mod submission;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::{AppController, Ports};
pub use playback::PlaybackController;
pub use submission::{SubmissionSummary, SubmissionWorkflow};
