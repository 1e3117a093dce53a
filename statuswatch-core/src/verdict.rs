//! Status catalog and notification text

use thiserror::Error;

use crate::domain::submission::SubmissionRecord;

/// Substituted when the review service omits the submission name
pub const UNNAMED_SUBMISSION: &str = "<unnamed submission>";

/// Known status codes and their verdict sentences
pub const STATUS_CATALOG: [(&str, &str); 3] = [
    (
        "approved",
        "The work has been reviewed: the reviewer liked everything. Hooray!",
    ),
    (
        "reviewing",
        "The work has been taken up for review by a reviewer.",
    ),
    (
        "rejected",
        "The work has been reviewed: the reviewer has comments.",
    ),
];

/// The review service reported a status code outside the catalog
///
/// Carries the raw code (or `None` when the field was missing) so the
/// operator can see what the API started sending.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown submission status {}", display_status(.status))]
pub struct UnknownStatusFailure {
    pub status: Option<String>,
}

fn display_status(status: &Option<String>) -> String {
    match status {
        Some(code) => format!("'{code}'"),
        None => "(missing)".to_string(),
    }
}

/// Looks up the verdict sentence for a status code
pub fn verdict(status: &str) -> Option<&'static str> {
    STATUS_CATALOG
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, sentence)| *sentence)
}

/// Renders the notification text for one submission
pub fn render(record: &SubmissionRecord) -> Result<String, UnknownStatusFailure> {
    let sentence = record
        .status
        .as_deref()
        .and_then(verdict)
        .ok_or_else(|| UnknownStatusFailure {
            status: record.status.clone(),
        })?;

    let name = record.name.as_deref().unwrap_or(UNNAMED_SUBMISSION);

    Ok(format!("Status changed for submission \"{name}\". {sentence}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_render_name_and_verdict() {
        for (code, sentence) in STATUS_CATALOG {
            let text = render(&SubmissionRecord::new("proj1", code)).unwrap();
            assert!(text.contains("proj1"), "{text}");
            assert!(text.contains(sentence), "{text}");
        }
    }

    #[test]
    fn test_render_template() {
        let text = render(&SubmissionRecord::new("proj1", "rejected")).unwrap();
        assert_eq!(
            text,
            "Status changed for submission \"proj1\". The work has been reviewed: the reviewer has comments."
        );
    }

    #[test]
    fn test_missing_name_uses_placeholder() {
        let record = SubmissionRecord {
            name: None,
            status: Some("reviewing".to_string()),
        };

        let text = render(&record).unwrap();
        assert!(text.contains(UNNAMED_SUBMISSION));
        assert!(text.ends_with("The work has been taken up for review by a reviewer."));
    }

    #[test]
    fn test_unknown_status_fails() {
        let err = render(&SubmissionRecord::new("proj1", "on_hold")).unwrap_err();
        assert_eq!(err.status.as_deref(), Some("on_hold"));
        assert_eq!(err.to_string(), "unknown submission status 'on_hold'");
    }

    #[test]
    fn test_missing_status_fails() {
        let record = SubmissionRecord {
            name: Some("proj1".to_string()),
            status: None,
        };

        let err = render(&record).unwrap_err();
        assert_eq!(err.status, None);
        assert_eq!(err.to_string(), "unknown submission status (missing)");
    }

    #[test]
    fn test_verdict_lookup_is_case_sensitive() {
        assert!(verdict("approved").is_some());
        assert!(verdict("APPROVED").is_none());
    }
}
