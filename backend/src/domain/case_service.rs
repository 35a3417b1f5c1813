//! Case tracking service implementing the driving port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::ports::{CaseRepository, CaseRepositoryError, CaseService};
use crate::domain::{
    Case, CaseCandidate, CaseError, CaseId, CasePage, CasePatch, CaseStatus, NewCase,
};

/// Map repository failures into the domain error taxonomy.
///
/// Constraint collisions become conflicts; infrastructure failures are
/// logged with their cause and surfaced as the generic internal error so no
/// store detail leaks to callers.
fn map_repository_error(error: CaseRepositoryError) -> CaseError {
    match error {
        CaseRepositoryError::DuplicateCaseNumber => {
            CaseError::conflict("Case number already exists")
        }
        CaseRepositoryError::Integrity { message } => {
            debug!(%message, "store rejected write with integrity violation");
            CaseError::conflict("Data integrity constraint violation")
        }
        CaseRepositoryError::Connection { message } | CaseRepositoryError::Query { message } => {
            error!(%message, "case repository failure");
            CaseError::internal("An unexpected error occurred")
        }
    }
}

/// Case service over any repository adapter.
///
/// Timestamps come from the injected clock; each mutation takes a single
/// reading, so a freshly created case has equal creation and update stamps.
#[derive(Clone)]
pub struct CaseTrackingService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CaseTrackingService<R> {
    /// Create a service over the given repository and clock.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Parse a raw identifier, folding failures into the not-found outcome.
    ///
    /// The identifier namespace is opaque to callers: an unparseable id is
    /// indistinguishable from a missing record.
    fn parse_id(raw_id: &str) -> Result<CaseId, CaseError> {
        raw_id
            .parse::<i32>()
            .map(CaseId::new)
            .map_err(|_| CaseError::case_not_found(raw_id))
    }
}

#[async_trait]
impl<R> CaseService for CaseTrackingService<R>
where
    R: CaseRepository,
{
    async fn create_case(&self, candidate: CaseCandidate) -> Result<Case, CaseError> {
        let now = self.clock.utc();
        let new_case = NewCase {
            case_number: candidate.case_number,
            title: candidate.title,
            description: candidate.description,
            status: candidate.status,
            due_date: candidate.due_date,
            created_date: now,
            updated_date: now,
        };

        let created = self
            .repo
            .insert(&new_case)
            .await
            .map_err(map_repository_error)?;

        info!(case_id = %created.id, case_number = %created.case_number, "case created");
        Ok(created)
    }

    async fn get_case_by_id(&self, raw_id: &str) -> Result<Case, CaseError> {
        let id = Self::parse_id(raw_id)?;
        debug!(%id, "fetching case");

        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| CaseError::case_not_found(raw_id))
    }

    async fn fetch_case_list(&self) -> Result<CasePage, CaseError> {
        let cases = self.repo.find_all().await.map_err(map_repository_error)?;
        Ok(CasePage::unpaged(cases))
    }

    async fn update_case(&self, patch: CasePatch, raw_id: &str) -> Result<Case, CaseError> {
        let id = Self::parse_id(raw_id)?;

        let mut existing = self
            .repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| CaseError::case_not_found(raw_id))?;

        patch.apply_to(&mut existing);
        existing.updated_date = self.clock.utc();

        let updated = self
            .repo
            .update(&existing)
            .await
            .map_err(map_repository_error)?;

        info!(case_id = %updated.id, "case updated");
        Ok(updated)
    }

    async fn delete_case_by_id(&self, raw_id: &str) -> Result<(), CaseError> {
        let id = Self::parse_id(raw_id)?;

        let removed = self
            .repo
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;

        // Deleting an absent record is not an error at this layer.
        if removed {
            info!(case_id = %id, "case deleted");
        } else {
            debug!(case_id = %id, "delete targeted an absent case");
        }
        Ok(())
    }

    async fn get_cases_by_status(&self, status: CaseStatus) -> Result<Vec<Case>, CaseError> {
        self.repo
            .find_by_status(status)
            .await
            .map_err(map_repository_error)
    }

    async fn get_cases_by_status_in(
        &self,
        statuses: Vec<CaseStatus>,
    ) -> Result<Vec<Case>, CaseError> {
        self.repo
            .find_by_status_in(&statuses)
            .await
            .map_err(map_repository_error)
    }

    async fn get_cases_by_title(&self, fragment: &str) -> Result<Vec<Case>, CaseError> {
        self.repo
            .find_by_title_contains(fragment)
            .await
            .map_err(map_repository_error)
    }

    async fn get_cases_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Case>, CaseError> {
        self.repo
            .find_by_created_date_between(start, end)
            .await
            .map_err(map_repository_error)
    }

    async fn search_cases(&self, term: &str) -> Result<Vec<Case>, CaseError> {
        self.repo.search(term).await.map_err(map_repository_error)
    }

    async fn count_cases_by_status(&self, status: CaseStatus) -> Result<i64, CaseError> {
        self.repo
            .count_by_status(status)
            .await
            .map_err(map_repository_error)
    }

    async fn get_recent_cases(&self, since: DateTime<Utc>) -> Result<Vec<Case>, CaseError> {
        self.repo
            .find_recent(since)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "case_service_tests.rs"]
mod tests;
