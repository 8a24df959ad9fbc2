use tracing::info;

use crate::services::Notifier;

/// Prints notifications to stderr so they never mix with command output.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        info!(message, "notification");
        eprintln!("{message}");
    }
}
