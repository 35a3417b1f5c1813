//! Domain ports for the hexagonal boundary.
//!
//! The driven port ([`CaseRepository`]) is implemented by persistence
//! adapters; the driving port ([`CaseService`]) is implemented by the domain
//! service and consumed by the HTTP adapter.

mod case_repository;
mod case_service;

#[cfg(test)]
pub use case_repository::MockCaseRepository;
pub use case_repository::{CaseRepository, CaseRepositoryError};
#[cfg(test)]
pub use case_service::MockCaseService;
pub use case_service::CaseService;
