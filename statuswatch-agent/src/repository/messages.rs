//! Messages repository
//!
//! Delivers plain-text messages to a chat through the bot API.

use async_trait::async_trait;
use statuswatch_client::{BotClient, ClientError};

/// Repository trait for outbound messages
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Delivers `text` to `channel_id`
    async fn deliver(&self, channel_id: &str, text: &str) -> Result<(), ClientError>;
}

#[async_trait]
impl MessageRepository for BotClient {
    async fn deliver(&self, channel_id: &str, text: &str) -> Result<(), ClientError> {
        self.send_message(channel_id, text).await
    }
}
