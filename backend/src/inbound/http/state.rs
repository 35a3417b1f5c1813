//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the domain service port and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::CaseService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cases: Arc<dyn CaseService>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    pub fn new(cases: Arc<dyn CaseService>, clock: Arc<dyn Clock>) -> Self {
        Self { cases, clock }
    }
}
