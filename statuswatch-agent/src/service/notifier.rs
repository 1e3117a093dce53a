//! Notification service
//!
//! Renders one submission into its notification text and delivers it to
//! the configured chat.

use async_trait::async_trait;
use statuswatch_core::domain::submission::SubmissionRecord;
use statuswatch_core::verdict;
use std::sync::Arc;
use tracing::info;

use crate::error::NotifyError;
use crate::repository::MessageRepository;

/// Service trait for notifying about a single status change
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Renders and delivers the notification for `record`
    ///
    /// # Returns
    /// The text that was delivered
    async fn notify(&self, record: &SubmissionRecord) -> Result<String, NotifyError>;
}

/// Delivers status notifications to one fixed chat
pub struct StatusNotifier {
    messages: Arc<dyn MessageRepository>,
    channel_id: String,
}

impl StatusNotifier {
    /// Creates a notifier bound to `channel_id`
    pub fn new(messages: Arc<dyn MessageRepository>, channel_id: impl Into<String>) -> Self {
        Self {
            messages,
            channel_id: channel_id.into(),
        }
    }
}

#[async_trait]
impl NotificationService for StatusNotifier {
    async fn notify(&self, record: &SubmissionRecord) -> Result<String, NotifyError> {
        let text = verdict::render(record)?;

        self.messages
            .deliver(&self.channel_id, &text)
            .await
            .map_err(NotifyError::Delivery)?;

        info!(channel_id = %self.channel_id, "Notification sent: {}", text);
        Ok(text)
    }
}
