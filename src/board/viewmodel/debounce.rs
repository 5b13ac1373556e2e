//! Debounced delivery of search keystrokes.

use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle};

/// Forwards the latest submitted search text once input has been quiet for
/// the configured period.
///
/// Each submission cancels the delivery still pending from the previous one,
/// so a burst of keystrokes yields a single value. Must be used inside a
/// Tokio runtime.
#[derive(Debug)]
pub struct SearchDebouncer {
    quiet: Duration,
    sender: mpsc::UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    /// Creates a debouncer and the receiver its settled values arrive on.
    #[must_use]
    pub fn new(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let debouncer = Self {
            quiet,
            sender,
            pending: None,
        };
        (debouncer, receiver)
    }

    /// Returns the quiet period.
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Submits new search text, replacing any pending delivery.
    pub fn submit(&mut self, text: impl Into<String>) {
        self.cancel();
        let quiet = self.quiet;
        let sender = self.sender.clone();
        let value = text.into();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            if sender.send(value).is_err() {
                tracing::debug!("search receiver dropped before delivery");
            }
        }));
    }

    /// Drops the pending delivery, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
