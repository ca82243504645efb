//! Error types for Chapterboard Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// A single problem found on one field of a chapter document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every problem found while validating one chapter document.
///
/// Issues are reported together, in field declaration order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Chapter validation failed: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    /// Error for input that is not a JSON object at all
    pub fn not_an_object() -> Self {
        Self::new(vec![FieldIssue::new("document", "expected a JSON object")])
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(FieldIssue::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_joins_issues() {
        let err = ValidationError::new(vec![
            FieldIssue::new("subject", "`subject` is required"),
            FieldIssue::new("status", "`Done` is not a valid status"),
        ]);

        assert_eq!(
            err.to_string(),
            "Chapter validation failed: subject: `subject` is required, status: `Done` is not a valid status"
        );
        assert!(err.has_field("status"));
        assert!(!err.has_field("unit"));
    }

    #[test]
    fn test_core_error_wraps_validation_transparently() {
        let err: CoreError = ValidationError::not_an_object().into();
        assert_eq!(
            err.to_string(),
            "Chapter validation failed: document: expected a JSON object"
        );
    }
}
