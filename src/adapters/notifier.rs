use tracing::warn;

use crate::ports::Notifier;

/// Prints alerts to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        warn!(alert = message, "User alert");
        eprintln!("{}", message);
    }
}
