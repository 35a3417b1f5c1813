//! HTTP adapter mapping for domain errors.
//!
//! The domain error stays transport agnostic; this module alone decides
//! status codes and the wire payload shape. Internal failure detail is
//! logged server-side and never rendered to clients.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{CaseError, ErrorKind};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Standard error payload rendered for every 4xx/5xx response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Server time the error was rendered, RFC 3339.
    pub timestamp: DateTime<Utc>,
    /// HTTP status code.
    #[schema(example = 404)]
    pub status: u16,
    /// Short failure-class label.
    #[schema(example = "Case Not Found")]
    pub error: String,
    /// Human-readable message.
    #[schema(example = "Case with id 42 not found")]
    pub message: String,
    /// Request path that produced the error.
    #[schema(example = "/cases/42")]
    pub path: String,
    /// Per-field validation messages, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// A domain error paired with the request path it occurred on.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    error: CaseError,
    path: String,
}

const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

const fn label_for(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "Validation Failed",
        ErrorKind::NotFound => "Case Not Found",
        ErrorKind::Conflict => "Data Integrity Violation",
        ErrorKind::Internal => "Internal Server Error",
    }
}

impl ApiError {
    /// Attach the request path to a domain error.
    pub fn new(error: CaseError, path: impl Into<String>) -> Self {
        Self {
            error,
            path: path.into(),
        }
    }

    /// Validation failure with the collected per-field violations.
    pub fn validation_failed(details: Vec<String>, path: impl Into<String>) -> Self {
        Self::new(
            CaseError::validation("Input validation failed").with_details(details),
            path,
        )
    }

    /// Malformed body or unknown enum value rejected at deserialisation.
    pub fn bad_payload(path: impl Into<String>) -> Self {
        Self::new(
            CaseError::validation("Invalid input format or enum value"),
            path,
        )
    }

    /// The underlying domain error.
    #[must_use]
    pub const fn domain_error(&self) -> &CaseError {
        &self.error
    }

    fn body(&self) -> ErrorBody {
        let kind = self.error.kind();
        let message = if matches!(kind, ErrorKind::Internal) {
            // Do not leak failure detail to clients.
            error!(cause = %self.error, path = %self.path, "internal error");
            "An unexpected error occurred".to_owned()
        } else {
            self.error.message().to_owned()
        };

        ErrorBody {
            timestamp: Utc::now(),
            status: status_for(kind).as_u16(),
            error: label_for(kind).to_owned(),
            message,
            path: self.path.clone(),
            details: self.error.details().map(<[String]>::to_vec),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self.error.kind())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

/// Render body-deserialisation failures in the standard payload shape.
///
/// Installed via `JsonConfig::error_handler` so malformed JSON and unknown
/// enum values produce the same 400 envelope as explicit validation.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    req: &HttpRequest,
) -> actix_web::Error {
    tracing::debug!(error = %err, path = %req.path(), "rejected request body");
    ApiError::bad_payload(req.path()).into()
}

/// Render query-string failures in the standard payload shape.
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    req: &HttpRequest,
) -> actix_web::Error {
    tracing::debug!(error = %err, path = %req.path(), "rejected query string");
    ApiError::bad_payload(req.path()).into()
}
