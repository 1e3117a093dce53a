//! Error taxonomy of the agent
//!
//! Everything except [`ConfigurationFailure`] is transient: it is logged and
//! resolved by the next scheduled poll.

use statuswatch_client::ClientError;
use statuswatch_core::validation::ValidationFailure;
use statuswatch_core::verdict::{UNNAMED_SUBMISSION, UnknownStatusFailure};
use thiserror::Error;

/// Why a single notification was not delivered
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The record's status is outside the catalog; nothing was sent
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatusFailure),

    /// Rendering succeeded but the bot API refused or was unreachable
    #[error("failed to deliver notification: {0}")]
    Delivery(#[source] ClientError),
}

/// A failure surfaced by the poll loop
///
/// `Fetch` and `Validation` end the iteration with the cursor untouched.
/// `UnknownStatus` is raised for a single record; the batch carries on.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("failed to fetch submission statuses: {0}")]
    Fetch(#[source] ClientError),

    #[error("invalid review service response: {0}")]
    Validation(#[from] ValidationFailure),

    #[error("{} (submission \"{}\")", .source, .name.as_deref().unwrap_or(UNNAMED_SUBMISSION))]
    UnknownStatus {
        name: Option<String>,
        #[source]
        source: UnknownStatusFailure,
    },
}

impl PollError {
    /// Short label for the failure class, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            PollError::Fetch(e) if e.is_timeout() => "fetch_timeout",
            PollError::Fetch(e) if e.is_client_error() => "fetch_client_error",
            PollError::Fetch(e) if e.is_server_error() => "fetch_server_error",
            PollError::Fetch(_) => "fetch",
            PollError::Validation(ValidationFailure::EmptyResponse) => "empty_response",
            PollError::Validation(ValidationFailure::MalformedResponse(_)) => "malformed_response",
            PollError::Validation(ValidationFailure::MalformedSubmissionsField(_)) => {
                "malformed_submissions_field"
            }
            PollError::UnknownStatus { .. } => "unknown_status",
        }
    }
}

/// Required settings are missing; the agent refuses to start
#[derive(Debug, Error)]
#[error("missing required configuration: {}", .missing.join(", "))]
pub struct ConfigurationFailure {
    pub missing: Vec<&'static str>,
}
