//! Review-status API client

use crate::error::Result;
use crate::handle_response;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Client for the review-status endpoint
///
/// The endpoint is used verbatim (including any trailing slash) since the
/// service distinguishes the two forms.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    endpoint: String,
    token: String,
    client: Client,
}

impl ReviewClient {
    /// Create a new review client
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the homework statuses endpoint
    /// * `token` - OAuth token of the user whose submissions are watched
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(endpoint, token, Client::new())
    }

    /// Create a new review client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(endpoint: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    /// Get the configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch submission statuses updated since a Unix timestamp
    ///
    /// Returns the decoded JSON body unchanged; shape checks are left to the
    /// caller. Network errors, non-2xx statuses and non-JSON bodies are all
    /// reported as errors.
    pub async fn fetch_statuses(&self, since: i64) -> Result<Value> {
        debug!("Fetching submission statuses since {}", since);

        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .query(&[("from_date", since)])
            .send()
            .await?;

        handle_response(response).await
    }

    fn authorization(&self) -> String {
        format!("OAuth {}", self.token)
    }
}
