//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Case records.
    ///
    /// `case_number` carries a unique constraint; `status` stores the wire
    /// name of the status enum as text.
    cases (id) {
        /// Primary key, assigned by the serial sequence.
        id -> Int4,
        /// Unique case number (max 20 characters).
        #[max_length = 20]
        case_number -> Varchar,
        /// Case title (max 100 characters).
        #[max_length = 100]
        title -> Varchar,
        /// Optional description (max 500 characters).
        #[max_length = 500]
        description -> Nullable<Varchar>,
        /// Status wire name, e.g. `OPEN`.
        #[max_length = 20]
        status -> Varchar,
        /// Case deadline.
        due_date -> Timestamptz,
        /// Record creation timestamp, never updated.
        created_date -> Timestamptz,
        /// Last modification timestamp.
        updated_date -> Timestamptz,
    }
}
