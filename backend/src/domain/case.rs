//! The case entity, creation validation, and the partial-update merge policy.
//!
//! Validation mirrors the constraints enforced by the database schema:
//! case numbers are 3-20 uppercase alphanumerics and unique, titles are
//! 5-100 characters, descriptions are capped at 500 characters, and due
//! dates must sit strictly in the future at creation time. Violations are
//! collected in full rather than short-circuiting so callers can report
//! every problem in one response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::status::CaseStatus;

/// Opaque case identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct CaseId(i32);

impl CaseId {
    /// Wrap a raw database identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw database value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted case record.
///
/// Doubles as the HTTP response body; field names serialise in camelCase to
/// match the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    /// Store-assigned identifier, immutable after creation.
    #[schema(example = 1)]
    pub id: CaseId,
    /// Globally unique case number (3-20 uppercase alphanumerics).
    #[schema(example = "ABC12345")]
    pub case_number: String,
    /// Case title (5-100 characters).
    #[schema(example = "Contract Dispute Resolution")]
    pub title: String,
    /// Optional free-text description (up to 500 characters).
    pub description: Option<String>,
    /// Current lifecycle status.
    pub status: CaseStatus,
    /// Deadline for the case; strictly in the future at creation.
    pub due_date: DateTime<Utc>,
    /// Stamped once at creation, never changed.
    pub created_date: DateTime<Utc>,
    /// Refreshed on every mutation; always >= `created_date`.
    pub updated_date: DateTime<Utc>,
}

/// A validated, timestamped case awaiting insertion.
///
/// Produced by the service from a [`CaseCandidate`] and a clock reading; the
/// store assigns the identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCase {
    /// Globally unique case number.
    pub case_number: String,
    /// Case title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Initial status.
    pub status: CaseStatus,
    /// Deadline for the case.
    pub due_date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_date: DateTime<Utc>,
    /// Equal to `created_date` at insertion.
    pub updated_date: DateTime<Utc>,
}

/// A creation payload that has passed validation but not yet been stamped.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseCandidate {
    /// Globally unique case number.
    pub case_number: String,
    /// Case title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Initial status.
    pub status: CaseStatus,
    /// Deadline for the case.
    pub due_date: DateTime<Utc>,
}

/// Unvalidated creation input with every field optional.
///
/// Keeping fields optional lets [`CaseDraft::validate`] report missing-field
/// violations alongside format violations instead of failing at
/// deserialisation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseDraft {
    /// Proposed case number.
    pub case_number: Option<String>,
    /// Proposed title.
    pub title: Option<String>,
    /// Proposed description.
    pub description: Option<String>,
    /// Proposed status.
    pub status: Option<CaseStatus>,
    /// Proposed due date.
    pub due_date: Option<DateTime<Utc>>,
}

fn is_case_number_charset(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

fn validate_case_number(value: Option<&str>, violations: &mut Vec<String>) {
    let Some(number) = value.filter(|v| !v.trim().is_empty()) else {
        violations.push("caseNumber: Case number is required".to_owned());
        return;
    };
    if !(3..=20).contains(&number.chars().count()) {
        violations.push("caseNumber: Case number must be between 3 and 20 characters".to_owned());
    }
    if !is_case_number_charset(number) {
        violations.push(
            "caseNumber: Case number must contain only uppercase letters and numbers".to_owned(),
        );
    }
}

fn validate_title(value: Option<&str>, violations: &mut Vec<String>) {
    let Some(title) = value.filter(|v| !v.trim().is_empty()) else {
        violations.push("title: Title is required".to_owned());
        return;
    };
    if !(5..=100).contains(&title.chars().count()) {
        violations.push("title: Title must be between 5 and 100 characters".to_owned());
    }
}

fn validate_description(value: Option<&str>, violations: &mut Vec<String>) {
    if value.is_some_and(|d| d.chars().count() > 500) {
        violations.push("description: Description cannot exceed 500 characters".to_owned());
    }
}

impl CaseDraft {
    /// Validate the draft against the creation constraints.
    ///
    /// Returns the candidate when every constraint holds, or the full list of
    /// `field: message` violations otherwise. `now` anchors the future-date
    /// check on the due date.
    ///
    /// # Errors
    ///
    /// Returns every violated constraint; the list is never empty on the
    /// error path.
    pub fn validate(self, now: DateTime<Utc>) -> Result<CaseCandidate, Vec<String>> {
        let mut violations = Vec::new();

        validate_case_number(self.case_number.as_deref(), &mut violations);
        validate_title(self.title.as_deref(), &mut violations);
        validate_description(self.description.as_deref(), &mut violations);

        if self.status.is_none() {
            violations.push("status: Status is required".to_owned());
        }

        match self.due_date {
            None => violations.push("dueDate: Due date is required".to_owned()),
            Some(due) if due <= now => {
                violations.push("dueDate: Due date must be in the future".to_owned());
            }
            Some(_) => {}
        }

        match (self.case_number, self.title, self.status, self.due_date) {
            (Some(case_number), Some(title), Some(status), Some(due_date))
                if violations.is_empty() =>
            {
                Ok(CaseCandidate {
                    case_number,
                    title,
                    description: self.description,
                    status,
                    due_date,
                })
            }
            _ => Err(violations),
        }
    }
}

/// Partial update payload applied under the field-merge policy.
///
/// A string field overwrites the stored value only when it is present and not
/// exactly the empty string; a whitespace-only value counts as provided. The
/// status, being no string, overwrites whenever present. The due date, the
/// identifier, and the creation timestamp are never touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CasePatch {
    /// Replacement title, when provided and non-empty.
    pub title: Option<String>,
    /// Replacement description, when provided and non-empty.
    pub description: Option<String>,
    /// Replacement case number, when provided and non-empty.
    pub case_number: Option<String>,
    /// Replacement status, when provided.
    pub status: Option<CaseStatus>,
}

fn provided(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl CasePatch {
    /// Merge the patch into `existing` per the field-merge policy.
    pub fn apply_to(&self, existing: &mut Case) {
        if let Some(title) = provided(self.title.as_deref()) {
            existing.title = title.to_owned();
        }
        if let Some(description) = provided(self.description.as_deref()) {
            existing.description = Some(description.to_owned());
        }
        if let Some(status) = self.status {
            existing.status = status;
        }
        if let Some(case_number) = provided(self.case_number.as_deref()) {
            existing.case_number = case_number.to_owned();
        }
    }

    /// Whether the patch carries no effective change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        provided(self.title.as_deref()).is_none()
            && provided(self.description.as_deref()).is_none()
            && provided(self.case_number.as_deref()).is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
#[path = "case_tests.rs"]
mod tests;
