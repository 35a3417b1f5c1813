//! In-memory implementation of the case repository port.
//!
//! Used when no database is configured and by handler-level tests. The store
//! is an ordered map guarded by a read-write lock, with a monotonic counter
//! standing in for the serial id sequence. The unique constraint on the
//! case number is enforced on insert and update, matching the database
//! schema.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{CaseRepository, CaseRepositoryError};
use crate::domain::{Case, CaseId, CaseStatus, NewCase};

#[derive(Debug, Default)]
struct MemoryState {
    cases: BTreeMap<CaseId, Case>,
    next_id: i32,
}

impl MemoryState {
    fn case_number_taken(&self, case_number: &str, except: Option<CaseId>) -> bool {
        self.cases
            .values()
            .any(|c| c.case_number == case_number && Some(c.id) != except)
    }
}

/// Thread-safe in-memory case repository.
#[derive(Debug, Default)]
pub struct InMemoryCaseRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryCaseRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, MemoryState>, CaseRepositoryError> {
        self.state
            .read()
            .map_err(|err| CaseRepositoryError::connection(err.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, MemoryState>, CaseRepositoryError> {
        self.state
            .write()
            .map_err(|err| CaseRepositoryError::connection(err.to_string()))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl CaseRepository for InMemoryCaseRepository {
    async fn insert(&self, new_case: &NewCase) -> Result<Case, CaseRepositoryError> {
        let mut state = self.write()?;

        if state.case_number_taken(&new_case.case_number, None) {
            return Err(CaseRepositoryError::DuplicateCaseNumber);
        }

        state.next_id += 1;
        let id = CaseId::new(state.next_id);
        let case = Case {
            id,
            case_number: new_case.case_number.clone(),
            title: new_case.title.clone(),
            description: new_case.description.clone(),
            status: new_case.status,
            due_date: new_case.due_date,
            created_date: new_case.created_date,
            updated_date: new_case.updated_date,
        };
        state.cases.insert(id, case.clone());
        Ok(case)
    }

    async fn find_by_id(&self, id: CaseId) -> Result<Option<Case>, CaseRepositoryError> {
        Ok(self.read()?.cases.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Case>, CaseRepositoryError> {
        Ok(self.read()?.cases.values().cloned().collect())
    }

    async fn update(&self, case: &Case) -> Result<Case, CaseRepositoryError> {
        let mut state = self.write()?;

        if !state.cases.contains_key(&case.id) {
            return Err(CaseRepositoryError::query("record not found"));
        }
        if state.case_number_taken(&case.case_number, Some(case.id)) {
            return Err(CaseRepositoryError::DuplicateCaseNumber);
        }

        state.cases.insert(case.id, case.clone());
        Ok(case.clone())
    }

    async fn delete_by_id(&self, id: CaseId) -> Result<bool, CaseRepositoryError> {
        Ok(self.write()?.cases.remove(&id).is_some())
    }

    async fn find_by_case_number(
        &self,
        case_number: &str,
    ) -> Result<Option<Case>, CaseRepositoryError> {
        Ok(self
            .read()?
            .cases
            .values()
            .find(|c| c.case_number == case_number)
            .cloned())
    }

    async fn find_by_status(&self, status: CaseStatus) -> Result<Vec<Case>, CaseRepositoryError> {
        Ok(self
            .read()?
            .cases
            .values()
            .filter(|c| c.status == status)
            .cloned()
            .collect())
    }

    async fn find_by_status_in(
        &self,
        statuses: &[CaseStatus],
    ) -> Result<Vec<Case>, CaseRepositoryError> {
        Ok(self
            .read()?
            .cases
            .values()
            .filter(|c| statuses.contains(&c.status))
            .cloned()
            .collect())
    }

    async fn find_by_title_contains(
        &self,
        fragment: &str,
    ) -> Result<Vec<Case>, CaseRepositoryError> {
        Ok(self
            .read()?
            .cases
            .values()
            .filter(|c| contains_ignore_case(&c.title, fragment))
            .cloned()
            .collect())
    }

    async fn find_by_created_date_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Case>, CaseRepositoryError> {
        Ok(self
            .read()?
            .cases
            .values()
            .filter(|c| c.created_date >= start && c.created_date <= end)
            .cloned()
            .collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<Case>, CaseRepositoryError> {
        Ok(self
            .read()?
            .cases
            .values()
            .filter(|c| {
                contains_ignore_case(&c.title, term)
                    || c.description
                        .as_deref()
                        .is_some_and(|d| contains_ignore_case(d, term))
                    || contains_ignore_case(&c.case_number, term)
            })
            .cloned()
            .collect())
    }

    async fn count_by_status(&self, status: CaseStatus) -> Result<i64, CaseRepositoryError> {
        let count = self
            .read()?
            .cases
            .values()
            .filter(|c| c.status == status)
            .count();
        i64::try_from(count).map_err(|err| CaseRepositoryError::query(err.to_string()))
    }

    async fn find_recent(&self, since: DateTime<Utc>) -> Result<Vec<Case>, CaseRepositoryError> {
        let mut recent: Vec<Case> = self
            .read()?
            .cases
            .values()
            .filter(|c| c.created_date >= since)
            .cloned()
            .collect();
        recent.sort_by(|a, b| {
            b.created_date
                .cmp(&a.created_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(recent)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rstest::{fixture, rstest};

    use super::*;

    fn new_case(number: &str, title: &str, status: CaseStatus, created: DateTime<Utc>) -> NewCase {
        NewCase {
            case_number: number.to_owned(),
            title: title.to_owned(),
            description: None,
            status,
            due_date: created + Duration::days(7),
            created_date: created,
            updated_date: created,
        }
    }

    #[fixture]
    fn repo() -> InMemoryCaseRepository {
        InMemoryCaseRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_sequential_ids(repo: InMemoryCaseRepository) {
        let now = Utc::now();
        let first = repo
            .insert(&new_case("AAA111", "First matter", CaseStatus::Open, now))
            .await
            .expect("insert first");
        let second = repo
            .insert(&new_case("BBB222", "Second matter", CaseStatus::Open, now))
            .await
            .expect("insert second");

        assert_eq!(first.id.as_i32(), 1);
        assert_eq!(second.id.as_i32(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_case_number_is_rejected_and_first_kept(repo: InMemoryCaseRepository) {
        let now = Utc::now();
        let first = repo
            .insert(&new_case("AAA111", "First matter", CaseStatus::Open, now))
            .await
            .expect("insert first");

        let error = repo
            .insert(&new_case("AAA111", "Second matter", CaseStatus::Open, now))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(error, CaseRepositoryError::DuplicateCaseNumber);

        let kept = repo
            .find_by_id(first.id)
            .await
            .expect("lookup")
            .expect("first remains");
        assert_eq!(kept.title, "First matter");
    }

    #[rstest]
    #[tokio::test]
    async fn update_detects_case_number_collision(repo: InMemoryCaseRepository) {
        let now = Utc::now();
        repo.insert(&new_case("AAA111", "First matter", CaseStatus::Open, now))
            .await
            .expect("insert first");
        let second = repo
            .insert(&new_case("BBB222", "Second matter", CaseStatus::Open, now))
            .await
            .expect("insert second");

        let mut renamed = second.clone();
        renamed.case_number = "AAA111".to_owned();
        let error = repo.update(&renamed).await.expect_err("collision");
        assert_eq!(error, CaseRepositoryError::DuplicateCaseNumber);

        // Writing back under its own number is no collision.
        repo.update(&second).await.expect("self update");
    }

    #[rstest]
    #[tokio::test]
    async fn find_all_is_ordered_by_id(repo: InMemoryCaseRepository) {
        let now = Utc::now();
        for (number, title) in [("CCC333", "Gamma matter"), ("AAA111", "Alpha matter")] {
            repo.insert(&new_case(number, title, CaseStatus::Open, now))
                .await
                .expect("insert");
        }

        let all = repo.find_all().await.expect("list");
        let ids: Vec<i32> = all.iter().map(|c| c.id.as_i32()).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_record_was_removed(repo: InMemoryCaseRepository) {
        let now = Utc::now();
        let case = repo
            .insert(&new_case("AAA111", "First matter", CaseStatus::Open, now))
            .await
            .expect("insert");

        assert!(repo.delete_by_id(case.id).await.expect("delete"));
        assert!(!repo.delete_by_id(case.id).await.expect("second delete"));
    }

    #[rstest]
    #[tokio::test]
    async fn status_filters_and_counts(repo: InMemoryCaseRepository) {
        let now = Utc::now();
        repo.insert(&new_case("AAA111", "Open matter", CaseStatus::Open, now))
            .await
            .expect("insert");
        repo.insert(&new_case("BBB222", "Closed matter", CaseStatus::Closed, now))
            .await
            .expect("insert");
        repo.insert(&new_case(
            "CCC333",
            "Cancelled matter",
            CaseStatus::Cancelled,
            now,
        ))
        .await
        .expect("insert");

        let open = repo
            .find_by_status(CaseStatus::Open)
            .await
            .expect("by status");
        assert_eq!(open.len(), 1);

        let closed_or_cancelled = repo
            .find_by_status_in(&[CaseStatus::Closed, CaseStatus::Cancelled])
            .await
            .expect("by statuses");
        assert_eq!(closed_or_cancelled.len(), 2);

        assert_eq!(
            repo.count_by_status(CaseStatus::Open).await.expect("count"),
            1
        );
        assert_eq!(
            repo.count_by_status(CaseStatus::InProgress)
                .await
                .expect("count"),
            0
        );
    }

    #[rstest]
    #[tokio::test]
    async fn title_search_is_case_insensitive(repo: InMemoryCaseRepository) {
        let now = Utc::now();
        repo.insert(&new_case(
            "AAA111",
            "Contract Dispute",
            CaseStatus::Open,
            now,
        ))
        .await
        .expect("insert");

        let hits = repo
            .find_by_title_contains("DISPUTE")
            .await
            .expect("search");
        assert_eq!(hits.len(), 1);

        let misses = repo.find_by_title_contains("probate").await.expect("search");
        assert!(misses.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn multi_field_search_spans_title_description_and_number(repo: InMemoryCaseRepository) {
        let now = Utc::now();
        let mut described = new_case("AAA111", "Quiet matter", CaseStatus::Open, now);
        described.description = Some("Urgent shipment claim".to_owned());
        repo.insert(&described).await.expect("insert");
        repo.insert(&new_case("URG900", "Another matter", CaseStatus::Open, now))
            .await
            .expect("insert");

        let by_description = repo.search("urgent").await.expect("search");
        assert_eq!(by_description.len(), 1);

        let by_number = repo.search("urg9").await.expect("search");
        assert_eq!(by_number.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn date_range_bounds_are_inclusive(repo: InMemoryCaseRepository) {
        let base = Utc::now();
        repo.insert(&new_case("AAA111", "First matter", CaseStatus::Open, base))
            .await
            .expect("insert");
        repo.insert(&new_case(
            "BBB222",
            "Later matter",
            CaseStatus::Open,
            base + Duration::days(2),
        ))
        .await
        .expect("insert");

        let in_range = repo
            .find_by_created_date_between(base, base + Duration::days(2))
            .await
            .expect("range");
        assert_eq!(in_range.len(), 2);

        let narrow = repo
            .find_by_created_date_between(base + Duration::days(1), base + Duration::days(1))
            .await
            .expect("range");
        assert!(narrow.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn recent_cases_come_newest_first(repo: InMemoryCaseRepository) {
        let base = Utc::now();
        repo.insert(&new_case("AAA111", "Old matter", CaseStatus::Open, base))
            .await
            .expect("insert");
        repo.insert(&new_case(
            "BBB222",
            "New matter",
            CaseStatus::Open,
            base + Duration::days(1),
        ))
        .await
        .expect("insert");

        let recent = repo.find_recent(base).await.expect("recent");
        let numbers: Vec<&str> = recent.iter().map(|c| c.case_number.as_str()).collect();
        assert_eq!(numbers, ["BBB222", "AAA111"]);

        let none = repo
            .find_recent(base + Duration::days(2))
            .await
            .expect("recent");
        assert!(none.is_empty());
    }
}
