//! Driven port for case persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Case, CaseId, CaseStatus, NewCase};

/// Errors raised by case repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaseRepositoryError {
    /// The write collides with the unique constraint on the case number.
    #[error("case number already exists")]
    DuplicateCaseNumber,

    /// Another store constraint rejected the write.
    #[error("data integrity constraint violated: {message}")]
    Integrity {
        /// Constraint description from the store.
        message: String,
    },

    /// Repository connection could not be established.
    #[error("case repository connection failed: {message}")]
    Connection {
        /// Underlying connection failure.
        message: String,
    },

    /// Query or mutation failed during execution.
    #[error("case repository query failed: {message}")]
    Query {
        /// Underlying query failure.
        message: String,
    },
}

impl CaseRepositoryError {
    /// Create an integrity error with the given message.
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity {
            message: message.into(),
        }
    }

    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for reading and writing case records.
///
/// `find_all` returns records ordered by identifier; `find_recent` returns
/// records created on or after the cutoff, newest first. Uniqueness of the
/// case number is the store's responsibility and surfaces as
/// [`CaseRepositoryError::DuplicateCaseNumber`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// Persist a new case; the store assigns the identifier.
    async fn insert(&self, new_case: &NewCase) -> Result<Case, CaseRepositoryError>;

    /// Find a case by its identifier.
    async fn find_by_id(&self, id: CaseId) -> Result<Option<Case>, CaseRepositoryError>;

    /// All cases ordered by identifier.
    async fn find_all(&self) -> Result<Vec<Case>, CaseRepositoryError>;

    /// Write back a merged case record.
    async fn update(&self, case: &Case) -> Result<Case, CaseRepositoryError>;

    /// Delete a case, reporting whether a record was removed.
    async fn delete_by_id(&self, id: CaseId) -> Result<bool, CaseRepositoryError>;

    /// Find a case by its unique case number.
    async fn find_by_case_number(
        &self,
        case_number: &str,
    ) -> Result<Option<Case>, CaseRepositoryError>;

    /// Cases with the given status.
    async fn find_by_status(&self, status: CaseStatus) -> Result<Vec<Case>, CaseRepositoryError>;

    /// Cases whose status is in the given set.
    async fn find_by_status_in(
        &self,
        statuses: &[CaseStatus],
    ) -> Result<Vec<Case>, CaseRepositoryError>;

    /// Cases whose title contains the fragment, case-insensitively.
    async fn find_by_title_contains(
        &self,
        fragment: &str,
    ) -> Result<Vec<Case>, CaseRepositoryError>;

    /// Cases created within the inclusive date range.
    async fn find_by_created_date_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Case>, CaseRepositoryError>;

    /// Cases whose title, description, or case number contains the term,
    /// case-insensitively.
    async fn search(&self, term: &str) -> Result<Vec<Case>, CaseRepositoryError>;

    /// Number of cases with the given status.
    async fn count_by_status(&self, status: CaseStatus) -> Result<i64, CaseRepositoryError>;

    /// Cases created on or after the cutoff, newest first.
    async fn find_recent(&self, since: DateTime<Utc>) -> Result<Vec<Case>, CaseRepositoryError>;
}
