//! Response validation
//!
//! Checks the shape of a raw review-service payload before anything is
//! read from it. The expected shape is:
//!
//! ```json
//! { "homeworks": [ { "homework_name": "...", "status": "..." } ], "current_date": 1000 }
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::submission::{FetchResult, SubmissionRecord};

/// Wire name of the submissions list
pub const SUBMISSIONS_FIELD: &str = "homeworks";

/// Wire name of the server cursor
pub const CURSOR_FIELD: &str = "current_date";

/// Reasons a raw payload is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// Payload was null or an empty object
    #[error("response is empty")]
    EmptyResponse,

    /// Payload was not a JSON object
    #[error("response is not an object (got {0})")]
    MalformedResponse(&'static str),

    /// The submissions field was absent or not an array
    #[error("response field 'homeworks' is {0}")]
    MalformedSubmissionsField(&'static str),
}

/// Validates a raw payload and extracts its submissions in order
///
/// An explicit empty list is valid and means "no new statuses". Elements of
/// the list are read leniently: string fields are kept, anything else is
/// treated as absent and surfaces later when the record is rendered.
pub fn validate(raw: &Value) -> Result<FetchResult, ValidationFailure> {
    let object = match raw {
        Value::Null => return Err(ValidationFailure::EmptyResponse),
        Value::Object(map) if map.is_empty() => return Err(ValidationFailure::EmptyResponse),
        Value::Object(map) => map,
        other => return Err(ValidationFailure::MalformedResponse(json_type(other))),
    };

    let submissions = match object.get(SUBMISSIONS_FIELD) {
        None => return Err(ValidationFailure::MalformedSubmissionsField("missing")),
        Some(Value::Array(items)) => items.iter().map(read_submission).collect(),
        Some(other) => {
            return Err(ValidationFailure::MalformedSubmissionsField(json_type(other)));
        }
    };

    Ok(FetchResult {
        submissions,
        cursor: read_cursor(object),
    })
}

// Elements that are not objects carry no fields at all.
fn read_submission(item: &Value) -> SubmissionRecord {
    if !item.is_object() {
        return SubmissionRecord::default();
    }
    SubmissionRecord::deserialize(item).unwrap_or_default()
}

fn read_cursor(object: &Map<String, Value>) -> Option<i64> {
    object.get(CURSOR_FIELD).and_then(Value::as_i64)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
