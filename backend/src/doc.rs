//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates the case management and health endpoints with their
//! request/response schemas. The generated document backs Swagger UI in
//! debug builds.

use utoipa::OpenApi;

use crate::domain::{Case, CaseId, CasePage, CaseStatus};
use crate::inbound::http::cases::{CreateCaseRequest, ExampleCaseResponse, UpdateCaseRequest};
use crate::inbound::http::error::ErrorBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Case tracking API",
        description = "HTTP interface for managing cases and health probes.",
        license(name = "ISC")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::cases::list_cases,
        crate::inbound::http::cases::get_case,
        crate::inbound::http::cases::create_case,
        crate::inbound::http::cases::update_case,
        crate::inbound::http::cases::delete_case,
        crate::inbound::http::cases::get_cases_by_status,
        crate::inbound::http::cases::list_case_statuses,
        crate::inbound::http::cases::get_example_case,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Case,
        CaseId,
        CaseStatus,
        CasePage,
        CreateCaseRequest,
        UpdateCaseRequest,
        ExampleCaseResponse,
        ErrorBody,
    )),
    tags(
        (name = "cases", description = "Case management operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
