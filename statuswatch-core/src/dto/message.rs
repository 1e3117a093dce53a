//! Message DTOs

use serde::{Deserialize, Serialize};

/// Request body for the bot API `sendMessage` method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessage {
    /// Destination chat or channel identifier
    pub chat_id: String,

    /// Plain-text message body
    pub text: String,
}

/// Envelope returned by every bot API method
///
/// The API may answer 200 with `ok: false`, so the flag has to be checked
/// in addition to the HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotResponse {
    pub ok: bool,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub error_code: Option<i64>,
}
