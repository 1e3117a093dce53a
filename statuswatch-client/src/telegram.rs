//! Messaging bot API client

use crate::error::{ClientError, Result};
use crate::{handle_response, trim_base_url};
use reqwest::Client;
use statuswatch_core::dto::message::{BotResponse, SendMessage};

/// Client for the bot API used to deliver notifications
#[derive(Debug, Clone)]
pub struct BotClient {
    /// Base URL of the bot API (e.g., "https://api.telegram.org")
    base_url: String,
    token: String,
    client: Client,
}

impl BotClient {
    /// Create a new bot client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the bot API
    /// * `token` - Bot token issued by the messaging service
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a new bot client with a custom HTTP client
    pub fn with_client(base_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: trim_base_url(base_url),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the bot API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a plain-text message to a chat
    ///
    /// Fails on transport errors, non-2xx statuses, and on 2xx responses
    /// whose envelope carries `ok: false`.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessage {
                chat_id: chat_id.to_string(),
                text: text.to_string(),
            })
            .send()
            .await?;

        let envelope: BotResponse = handle_response(response).await?;
        check_envelope(envelope)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }
}

fn check_envelope(envelope: BotResponse) -> Result<()> {
    if envelope.ok {
        return Ok(());
    }

    let description = envelope
        .description
        .unwrap_or_else(|| "no description".to_string());
    Err(match envelope.error_code {
        Some(code) => ClientError::Rejected(format!("{} ({})", description, code)),
        None => ClientError::Rejected(description),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url() {
        let client = BotClient::new("https://api.telegram.org/", "123:abc");
        assert_eq!(client.base_url(), "https://api.telegram.org");
        assert_eq!(
            client.method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_check_envelope() {
        let ok: BotResponse = serde_json::from_str(r#"{"ok": true, "result": {}}"#).unwrap();
        assert!(check_envelope(ok).is_ok());

        let rejected: BotResponse = serde_json::from_str(
            r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#,
        )
        .unwrap();
        let err = check_envelope(rejected).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bot API rejected the request: Bad Request: chat not found (400)"
        );
    }
}
