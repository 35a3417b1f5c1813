//! Domain-level error type for case operations.
//!
//! Transport agnostic: the service raises a [`CaseError`] carrying a kind
//! tag; the HTTP adapter alone maps kinds to status codes and renders the
//! error payload.

/// Failure category for a case operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The payload is malformed, incomplete, or out of range.
    Validation,
    /// The target record does not exist (or the identifier is unparseable).
    NotFound,
    /// The write collides with a store constraint, such as a duplicate case
    /// number.
    Conflict,
    /// An unanticipated failure in the service or the store.
    Internal,
}

/// Error raised by the case service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CaseError {
    kind: ErrorKind,
    message: String,
    details: Option<Vec<String>>,
}

impl CaseError {
    /// Create an error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Per-field violation messages, when applicable.
    #[must_use]
    pub fn details(&self) -> Option<&[String]> {
        self.details.as_deref()
    }

    /// Attach per-field violation messages.
    #[must_use]
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorKind::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Convenience constructor for [`ErrorKind::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Convenience constructor for [`ErrorKind::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Convenience constructor for [`ErrorKind::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Not-found error echoing the raw identifier the caller supplied.
    pub fn case_not_found(raw_id: impl std::fmt::Display) -> Self {
        Self::not_found(format!("Case with id {raw_id} not found"))
    }
}
