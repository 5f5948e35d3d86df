//! Mapping of domain and extractor failures onto `{detail}` responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::errors::{DomainError, ValidationIssue};

/// One rejected record of a batch
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IssueBody {
    pub index: usize,
    pub message: String,
}

impl From<&ValidationIssue> for IssueBody {
    fn from(issue: &ValidationIssue) -> Self {
        Self {
            index: issue.index,
            message: issue.message.clone(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<IssueBody>,
}

/// An error on its way to the client
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                detail: detail.into(),
                errors: Vec::new(),
            },
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.body.detail
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Validation(validation) => Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorResponse {
                    detail: err.to_string(),
                    errors: validation.issues.iter().map(IssueBody::from).collect(),
                },
            },
            DomainError::BatchTooLarge { .. } => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, err.to_string())
            }
            DomainError::InvalidWeights(_) | DomainError::MalformedRequest(_) => {
                Self::bad_request(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Oversized bodies keep their 413; every other body problem is the
        // client's malformed JSON.
        let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            StatusCode::PAYLOAD_TOO_LARGE
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::new(status, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
