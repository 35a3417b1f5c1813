//! Case-tracking domain: entity, validation, error taxonomy, and service.
//!
//! Types here are transport and storage agnostic. Inbound adapters translate
//! HTTP requests into [`CaseDraft`]/[`CasePatch`] values and render
//! [`CaseError`] into the wire error payload; outbound adapters implement
//! [`ports::CaseRepository`].

mod case;
mod case_service;
mod error;
mod page;
pub mod ports;
mod status;

pub use case::{Case, CaseCandidate, CaseDraft, CaseId, CasePatch, NewCase};
pub use case_service::CaseTrackingService;
pub use error::{CaseError, ErrorKind};
pub use page::CasePage;
pub use status::{CaseStatus, ParseCaseStatusError};
