//! Domain errors for the Triage prioritization engine.

use std::fmt;

use thiserror::Error;

/// A single problem found while normalizing one record of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Position of the offending record in the submitted batch.
    pub index: usize,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task[{}]: {}", self.index, self.message)
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Malformed or duplicate task input. The whole request is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed: {}", format_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Build an error carrying a single issue.
    pub fn single(index: usize, message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue {
                index,
                message: message.into(),
            }],
        }
    }
}

/// Domain-level errors that can occur while prioritizing a batch.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("batch of {size} tasks exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_issue() {
        let err = ValidationError {
            issues: vec![
                ValidationIssue {
                    index: 0,
                    message: "missing id".to_string(),
                },
                ValidationIssue {
                    index: 2,
                    message: "missing title".to_string(),
                },
            ],
        };

        assert_eq!(
            err.to_string(),
            "validation failed: task[0]: missing id; task[2]: missing title"
        );
    }

    #[test]
    fn test_domain_error_is_transparent_for_validation() {
        let err: DomainError = ValidationError::single(1, "duplicate id \"a\"").into();
        assert_eq!(err.to_string(), "validation failed: task[1]: duplicate id \"a\"");
    }
}
