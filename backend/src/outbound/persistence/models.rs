//! Internal Diesel row structs for the cases table.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversion into [`Case`](crate::domain::Case) re-parses the
//! stored status so rows with an unknown status fail loudly instead of
//! leaking malformed data.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Case, CaseId};

use super::schema::cases;

/// Row struct for reading from the cases table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cases)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CaseRow {
    pub id: i32,
    pub case_number: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub due_date: DateTime<Utc>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl CaseRow {
    /// Convert the row into a domain case, rejecting unknown status values.
    pub(crate) fn into_domain(self) -> Result<Case, String> {
        let status = self
            .status
            .parse()
            .map_err(|err| format!("stored case {}: {err}", self.id))?;

        Ok(Case {
            id: CaseId::new(self.id),
            case_number: self.case_number,
            title: self.title,
            description: self.description,
            status,
            due_date: self.due_date,
            created_date: self.created_date,
            updated_date: self.updated_date,
        })
    }
}

/// Insertable struct for creating new case records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cases)]
pub(crate) struct NewCaseRow<'a> {
    pub case_number: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub due_date: DateTime<Utc>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

/// Changeset struct for updating existing case records.
///
/// `treat_none_as_null` keeps a cleared description writable as NULL; the
/// creation timestamp is deliberately absent so no update can touch it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = cases)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CaseChangeset<'a> {
    pub case_number: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub due_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}
