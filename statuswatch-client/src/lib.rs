//! Statuswatch HTTP Clients
//!
//! Thin, type-safe HTTP clients for the two remote services the agent talks to:
//! - [`ReviewClient`]: the review-status endpoint that reports a user's submissions
//! - [`BotClient`]: the messaging bot API used to deliver notifications
//!
//! # Example
//!
//! ```no_run
//! use statuswatch_client::{BotClient, ReviewClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let reviews = ReviewClient::new(
//!         "https://practicum.yandex.ru/api/user_api/homework_statuses/",
//!         "review-token",
//!     );
//!     let bot = BotClient::new("https://api.telegram.org", "bot-token");
//!
//!     let payload = reviews.fetch_statuses(0).await?;
//!     bot.send_message("12345", &payload.to_string()).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod reviews;
mod telegram;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use reviews::ReviewClient;
pub use telegram::BotClient;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Builds a reqwest client with a per-request timeout
///
/// Falls back to a client without a timeout if the builder fails, which
/// only happens when the TLS backend cannot be initialised.
pub fn http_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
        tracing::warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
        Client::new()
    })
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Handle an API response and deserialize JSON
///
/// Checks the status code and returns an appropriate error if the request
/// failed, or deserializes the response body if successful.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

fn trim_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}
