//! Failure reporting to chat
//!
//! Forwards transient poll failures to the notification chat so the operator
//! does not have to watch the logs. A failure identical to the last one
//! reported is suppressed, so a long outage produces one message instead of
//! one per poll.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::repository::MessageRepository;

pub struct FailureReporter {
    messages: Arc<dyn MessageRepository>,
    channel_id: String,
    last_reported: Option<String>,
}

impl FailureReporter {
    pub fn new(messages: Arc<dyn MessageRepository>, channel_id: impl Into<String>) -> Self {
        Self {
            messages,
            channel_id: channel_id.into(),
            last_reported: None,
        }
    }

    /// Sends `failure` to the chat unless it repeats the previous report
    ///
    /// Returns whether a message was delivered. Delivery errors are logged
    /// and leave the previous report in place, so the next occurrence is
    /// retried.
    pub async fn report(&mut self, failure: &str) -> bool {
        let text = format!("Program failure: {}", failure);

        if self.last_reported.as_deref() == Some(text.as_str()) {
            debug!("Suppressing repeated failure report");
            return false;
        }

        match self.messages.deliver(&self.channel_id, &text).await {
            Ok(()) => {
                self.last_reported = Some(text);
                true
            }
            Err(e) => {
                warn!("Failed to report failure to chat: {}", e);
                false
            }
        }
    }

    /// Forgets the last report so a recurrence after recovery is sent again
    pub fn clear(&mut self) {
        self.last_reported = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::RecordingMessages;

    #[tokio::test]
    async fn test_repeated_failures_are_suppressed() {
        let messages = Arc::new(RecordingMessages::new());
        let mut reporter = FailureReporter::new(messages.clone(), "42");

        assert!(reporter.report("boom").await);
        assert!(!reporter.report("boom").await);
        assert!(reporter.report("other").await);

        assert_eq!(
            messages.texts(),
            vec!["Program failure: boom", "Program failure: other"]
        );
    }

    #[tokio::test]
    async fn test_clear_allows_recurrence() {
        let messages = Arc::new(RecordingMessages::new());
        let mut reporter = FailureReporter::new(messages.clone(), "42");

        assert!(reporter.report("boom").await);
        reporter.clear();
        assert!(reporter.report("boom").await);
        assert_eq!(messages.texts().len(), 2);
    }

    #[tokio::test]
    async fn test_undelivered_report_is_retried() {
        let messages = Arc::new(RecordingMessages::failing_on(&["boom"]));
        let mut reporter = FailureReporter::new(messages.clone(), "42");

        assert!(!reporter.report("boom").await);
        assert!(!reporter.report("boom").await);
        assert_eq!(messages.attempts(), 2);
    }
}
