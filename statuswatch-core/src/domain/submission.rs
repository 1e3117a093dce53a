//! Submission domain types

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One submission as reported by the review service
///
/// Both fields are optional on the wire, and a field of the wrong type is
/// read as absent. A missing name is tolerated when rendering; a missing
/// status is reported as an unknown status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SubmissionRecord {
    #[serde(rename = "homework_name", default, deserialize_with = "string_or_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub status: Option<String>,
}

impl SubmissionRecord {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            status: Some(status.into()),
        }
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

/// Validated payload of one poll
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchResult {
    /// Submissions in the order notifications must be sent
    pub submissions: Vec<SubmissionRecord>,

    /// Server-side position to resume from, when the service supplied one
    pub cursor: Option<i64>,
}
