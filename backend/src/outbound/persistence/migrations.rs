//! Embedded schema migrations applied at startup.
//!
//! Diesel's migration harness is synchronous, so migrations run on a
//! blocking task over a dedicated connection before the pool is built.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying embedded migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not establish the migration connection.
    #[error("failed to connect for migrations: {message}")]
    Connection {
        /// Underlying connection failure.
        message: String,
    },

    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply {
        /// Underlying migration failure.
        message: String,
    },

    /// The blocking migration task was cancelled or panicked.
    #[error("migration task failed: {message}")]
    Task {
        /// Join failure description.
        message: String,
    },
}

/// Apply all pending embedded migrations against the given database.
///
/// # Errors
///
/// Returns a [`MigrationError`] when the connection cannot be established,
/// a migration fails, or the blocking task is cancelled.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url).map_err(|err| MigrationError::Connection {
            message: err.to_string(),
        })?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Apply {
                message: err.to_string(),
            })?;
        Ok(())
    })
    .await
    .map_err(|err| MigrationError::Task {
        message: err.to_string(),
    })?
}
