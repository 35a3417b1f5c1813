//! Persistence adapters for the case repository port.
//!
//! Two implementations exist: a PostgreSQL adapter built on Diesel with
//! async execution via `diesel-async` and `bb8` pooling, and an in-memory
//! adapter used when no database is configured and by handler-level tests.
//! Row structs and table definitions are internal to this module; the domain
//! only ever sees [`crate::domain::Case`] values and port errors.

mod diesel_case_repository;
mod diesel_error_mapping;
mod memory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_case_repository::DieselCaseRepository;
pub use memory::InMemoryCaseRepository;
pub use migrations::{run_migrations, MigrationError};
pub use pool::{DbPool, PoolConfig, PoolError};
