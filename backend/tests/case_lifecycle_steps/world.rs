//! Shared world state for case lifecycle BDD scenarios.

use std::sync::Arc;

use casetrack::domain::{Case, CaseCandidate, CaseError, CaseStatus, CaseTrackingService};
use casetrack::outbound::persistence::InMemoryCaseRepository;
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestCaseService = CaseTrackingService<InMemoryCaseRepository>;

/// Scenario world for case lifecycle behaviour tests.
pub struct CaseWorld {
    /// The case service under test.
    pub service: TestCaseService,
    /// Case created during scenario setup.
    pub stored: Option<Case>,
    /// Result of the last create or update call.
    pub last_result: Option<Result<Case, CaseError>>,
    /// Result of the last fetch call.
    pub last_fetched: Option<Result<Case, CaseError>>,
    /// Result of the last delete call.
    pub last_delete: Option<Result<(), CaseError>>,
}

impl CaseWorld {
    /// Creates a world with an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let service = CaseTrackingService::new(
            Arc::new(InMemoryCaseRepository::new()),
            Arc::new(DefaultClock),
        );
        Self {
            service,
            stored: None,
            last_result: None,
            last_fetched: None,
            last_delete: None,
        }
    }
}

impl Default for CaseWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CaseWorld {
    CaseWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a creation candidate from a case number and title.
pub fn build_candidate(case_number: &str, title: &str) -> CaseCandidate {
    CaseCandidate {
        case_number: case_number.to_owned(),
        title: title.to_owned(),
        description: Some("Filed for behaviour testing".to_owned()),
        status: CaseStatus::Open,
        due_date: Utc::now() + Duration::days(7),
    }
}
