//! Statuses repository
//!
//! Fetches raw submission statuses from the review service.

use async_trait::async_trait;
use serde_json::Value;
use statuswatch_client::{ClientError, ReviewClient};

/// Repository trait for reading submission statuses
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Fetches statuses updated since `since` (Unix seconds)
    ///
    /// Returns the decoded payload as-is; the caller validates its shape.
    async fn fetch(&self, since: i64) -> Result<Value, ClientError>;
}

#[async_trait]
impl StatusRepository for ReviewClient {
    async fn fetch(&self, since: i64) -> Result<Value, ClientError> {
        self.fetch_statuses(since).await
    }
}
