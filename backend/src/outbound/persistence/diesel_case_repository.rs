//! PostgreSQL-backed [`CaseRepository`] implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CaseRepository, CaseRepositoryError};
use crate::domain::{Case, CaseId, CaseStatus, NewCase};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CaseChangeset, CaseRow, NewCaseRow};
use super::pool::DbPool;
use super::schema::cases;

/// Diesel-backed implementation of the case repository port.
#[derive(Clone)]
pub struct DieselCaseRepository {
    pool: DbPool,
}

impl DieselCaseRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_case(row: CaseRow) -> Result<Case, CaseRepositoryError> {
    row.into_domain().map_err(CaseRepositoryError::query)
}

fn rows_to_cases(rows: Vec<CaseRow>) -> Result<Vec<Case>, CaseRepositoryError> {
    rows.into_iter().map(row_to_case).collect()
}

/// Build an `ILIKE` substring pattern with LIKE metacharacters escaped.
fn contains_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl CaseRepository for DieselCaseRepository {
    async fn insert(&self, new_case: &NewCase) -> Result<Case, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewCaseRow {
            case_number: &new_case.case_number,
            title: &new_case.title,
            description: new_case.description.as_deref(),
            status: new_case.status.as_str(),
            due_date: new_case.due_date,
            created_date: new_case.created_date,
            updated_date: new_case.updated_date,
        };

        let inserted: CaseRow = diesel::insert_into(cases::table)
            .values(&row)
            .returning(CaseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_case(inserted)
    }

    async fn find_by_id(&self, id: CaseId) -> Result<Option<Case>, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = cases::table
            .find(id.as_i32())
            .select(CaseRow::as_select())
            .first::<CaseRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_case).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Case>, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = cases::table
            .order(cases::id.asc())
            .select(CaseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_cases(rows)
    }

    async fn update(&self, case: &Case) -> Result<Case, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = CaseChangeset {
            case_number: &case.case_number,
            title: &case.title,
            description: case.description.as_deref(),
            status: case.status.as_str(),
            due_date: case.due_date,
            updated_date: case.updated_date,
        };

        let updated: CaseRow = diesel::update(cases::table.find(case.id.as_i32()))
            .set(&changeset)
            .returning(CaseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_case(updated)
    }

    async fn delete_by_id(&self, id: CaseId) -> Result<bool, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(cases::table.find(id.as_i32()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn find_by_case_number(
        &self,
        case_number: &str,
    ) -> Result<Option<Case>, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = cases::table
            .filter(cases::case_number.eq(case_number))
            .select(CaseRow::as_select())
            .first::<CaseRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_case).transpose()
    }

    async fn find_by_status(&self, status: CaseStatus) -> Result<Vec<Case>, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = cases::table
            .filter(cases::status.eq(status.as_str()))
            .order(cases::id.asc())
            .select(CaseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_cases(rows)
    }

    async fn find_by_status_in(
        &self,
        statuses: &[CaseStatus],
    ) -> Result<Vec<Case>, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let names: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
        let rows = cases::table
            .filter(cases::status.eq_any(names))
            .order(cases::id.asc())
            .select(CaseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_cases(rows)
    }

    async fn find_by_title_contains(
        &self,
        fragment: &str,
    ) -> Result<Vec<Case>, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = cases::table
            .filter(cases::title.ilike(contains_pattern(fragment)))
            .order(cases::id.asc())
            .select(CaseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_cases(rows)
    }

    async fn find_by_created_date_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Case>, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = cases::table
            .filter(cases::created_date.between(start, end))
            .order(cases::id.asc())
            .select(CaseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_cases(rows)
    }

    async fn search(&self, term: &str) -> Result<Vec<Case>, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let pattern = contains_pattern(term);
        let rows = cases::table
            .filter(
                cases::title
                    .ilike(pattern.clone())
                    .or(cases::description.ilike(pattern.clone()))
                    .or(cases::case_number.ilike(pattern)),
            )
            .order(cases::id.asc())
            .select(CaseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_cases(rows)
    }

    async fn count_by_status(&self, status: CaseStatus) -> Result<i64, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        cases::table
            .filter(cases::status.eq(status.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn find_recent(&self, since: DateTime<Utc>) -> Result<Vec<Case>, CaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = cases::table
            .filter(cases::created_date.ge(since))
            .order((cases::created_date.desc(), cases::id.desc()))
            .select(CaseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_cases(rows)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("dispute", "%dispute%")]
    #[case("100%", "%100\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("back\\slash", "%back\\\\slash%")]
    fn contains_pattern_escapes_like_metacharacters(
        #[case] fragment: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(contains_pattern(fragment), expected);
    }
}
