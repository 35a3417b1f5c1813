//! Builders selecting the repository backing for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use crate::domain::CaseTrackingService;
use crate::domain::ports::CaseService;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{DieselCaseRepository, InMemoryCaseRepository};

use super::ServerConfig;

/// Build the shared HTTP state, using the Diesel repository when a pool is
/// configured and the in-memory repository otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let cases: Arc<dyn CaseService> = match &config.db_pool {
        Some(pool) => {
            info!(backend = "postgres", "case repository selected");
            Arc::new(CaseTrackingService::new(
                Arc::new(DieselCaseRepository::new(pool.clone())),
                clock.clone(),
            ))
        }
        None => {
            info!(backend = "memory", "case repository selected");
            Arc::new(CaseTrackingService::new(
                Arc::new(InMemoryCaseRepository::new()),
                clock.clone(),
            ))
        }
    };
    web::Data::new(HttpState::new(cases, clock))
}
