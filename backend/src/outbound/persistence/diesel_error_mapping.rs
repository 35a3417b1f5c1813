//! Shared Diesel-to-port error mapping for the case repository.

use tracing::debug;

use crate::domain::ports::CaseRepositoryError;

use super::pool::PoolError;

/// Map pool errors into the repository connection error.
pub(crate) fn map_pool_error(error: PoolError) -> CaseRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    CaseRepositoryError::connection(message)
}

/// Map Diesel errors into port errors.
///
/// Unique violations on the case number constraint become
/// [`CaseRepositoryError::DuplicateCaseNumber`]; other database constraint
/// failures map to the integrity variant so the service can surface them as
/// conflicts. Everything else funnels into query/connection errors with the
/// detail logged rather than propagated.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> CaseRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(
            error_type = %std::any::type_name_of_val(other),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info.constraint_name().unwrap_or_default();
            if constraint.contains("case_number") || info.message().contains("case_number") {
                CaseRepositoryError::DuplicateCaseNumber
            } else {
                CaseRepositoryError::integrity(info.message().to_owned())
            }
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation,
            info,
        ) => CaseRepositoryError::integrity(info.message().to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CaseRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => CaseRepositoryError::query("record not found"),
        _ => CaseRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    use super::*;

    /// Minimal database error information for synthesising Diesel errors.
    struct FakeErrorInformation {
        message: String,
        constraint: Option<String>,
    }

    impl diesel::result::DatabaseErrorInformation for FakeErrorInformation {
        fn message(&self) -> &str {
            &self.message
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint.as_deref()
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(
        kind: DatabaseErrorKind,
        message: &str,
        constraint: Option<&str>,
    ) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(FakeErrorInformation {
                message: message.to_owned(),
                constraint: constraint.map(str::to_owned),
            }),
        )
    }

    #[rstest]
    fn case_number_unique_violation_maps_to_duplicate() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint",
            Some("cases_case_number_key"),
        );
        assert_eq!(
            map_diesel_error(error),
            CaseRepositoryError::DuplicateCaseNumber
        );
    }

    #[rstest]
    fn unique_violation_without_constraint_name_falls_back_to_message() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"idx_case_number\"",
            None,
        );
        assert_eq!(
            map_diesel_error(error),
            CaseRepositoryError::DuplicateCaseNumber
        );
    }

    #[rstest]
    fn other_unique_violation_maps_to_integrity() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"cases_pkey\"",
            Some("cases_pkey"),
        );
        assert!(matches!(
            map_diesel_error(error),
            CaseRepositoryError::Integrity { .. }
        ));
    }

    #[rstest]
    fn not_null_violation_maps_to_integrity() {
        let error = database_error(
            DatabaseErrorKind::NotNullViolation,
            "null value in column \"status\"",
            None,
        );
        assert!(matches!(
            map_diesel_error(error),
            CaseRepositoryError::Integrity { .. }
        ));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let mapped = map_diesel_error(DieselError::NotFound);
        assert!(matches!(mapped, CaseRepositoryError::Query { .. }));
        assert!(mapped.to_string().contains("record not found"));
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(mapped, CaseRepositoryError::Connection { .. }));
        assert!(mapped.to_string().contains("connection refused"));
    }
}
