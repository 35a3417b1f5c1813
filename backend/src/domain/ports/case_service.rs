//! Driving port consumed by the HTTP adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Case, CaseCandidate, CaseError, CasePage, CasePatch, CaseStatus};

/// Port exposing the case operations the boundary drives.
///
/// Identifier-taking operations accept the raw path segment; translating it
/// to the internal key (and folding parse failures into the not-found
/// outcome) is the service's job, not the caller's.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaseService: Send + Sync {
    /// Persist a validated candidate, stamping both audit timestamps from a
    /// single clock reading.
    async fn create_case(&self, candidate: CaseCandidate) -> Result<Case, CaseError>;

    /// Fetch a case by its raw identifier string.
    async fn get_case_by_id(&self, raw_id: &str) -> Result<Case, CaseError>;

    /// All cases wrapped in the unpaged envelope.
    async fn fetch_case_list(&self) -> Result<CasePage, CaseError>;

    /// Merge a partial payload into an existing case and persist the result.
    async fn update_case(&self, patch: CasePatch, raw_id: &str) -> Result<Case, CaseError>;

    /// Delete a case; absent-but-parseable identifiers succeed.
    async fn delete_case_by_id(&self, raw_id: &str) -> Result<(), CaseError>;

    /// Cases with the given status.
    async fn get_cases_by_status(&self, status: CaseStatus) -> Result<Vec<Case>, CaseError>;

    /// Cases whose status is in the given set.
    async fn get_cases_by_status_in(
        &self,
        statuses: Vec<CaseStatus>,
    ) -> Result<Vec<Case>, CaseError>;

    /// Cases whose title contains the fragment, case-insensitively.
    async fn get_cases_by_title(&self, fragment: &str) -> Result<Vec<Case>, CaseError>;

    /// Cases created within the inclusive date range.
    async fn get_cases_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Case>, CaseError>;

    /// Cases matching the term across title, description, and case number.
    async fn search_cases(&self, term: &str) -> Result<Vec<Case>, CaseError>;

    /// Number of cases with the given status.
    async fn count_cases_by_status(&self, status: CaseStatus) -> Result<i64, CaseError>;

    /// Cases created on or after the cutoff, newest first.
    async fn get_recent_cases(&self, since: DateTime<Utc>) -> Result<Vec<Case>, CaseError>;
}
