//! Case management HTTP handlers.
//!
//! ```text
//! GET    /cases
//! GET    /cases/{id}
//! POST   /cases
//! PUT    /cases/{id}
//! DELETE /cases/{id}
//! GET    /cases/status/{status}
//! GET    /case-statuses
//! GET    /get-example-case
//! ```

use std::str::FromStr;

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Case, CaseDraft, CasePage, CasePatch, CaseStatus};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiError, ApiResult};

/// Request payload for creating a case.
///
/// Every field is optional at the wire level so missing-field violations are
/// reported by validation rather than rejected at deserialisation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    #[schema(example = "ABC12345")]
    pub case_number: Option<String>,
    #[schema(example = "Contract Dispute Resolution")]
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<CaseStatus>,
    #[schema(format = "date-time")]
    pub due_date: Option<DateTime<Utc>>,
}

impl From<CreateCaseRequest> for CaseDraft {
    fn from(body: CreateCaseRequest) -> Self {
        Self {
            case_number: body.case_number,
            title: body.title,
            description: body.description,
            status: body.status,
            due_date: body.due_date,
        }
    }
}

/// Request payload for partially updating a case.
///
/// Absent fields (and string fields sent as `""`) leave the stored value
/// untouched; the due date and audit timestamps are never updatable.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub case_number: Option<String>,
    pub status: Option<CaseStatus>,
}

impl From<UpdateCaseRequest> for CasePatch {
    fn from(body: UpdateCaseRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            case_number: body.case_number,
            status: body.status,
        }
    }
}

/// Query parameters accepted by the list endpoint.
///
/// The page parameter is accepted for wire compatibility but the listing is
/// always unpaged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
}

/// The canned sample case served by `/get-example-case`.
///
/// Its status is a free string rather than the lifecycle enum.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExampleCaseResponse {
    pub id: i32,
    pub case_number: String,
    pub title: String,
    pub description: String,
    pub status: String,
    #[schema(format = "date-time")]
    pub created_date: DateTime<Utc>,
}

/// List every case in the unpaged envelope.
#[utoipa::path(
    get,
    path = "/cases",
    params(("page" = Option<u32>, Query, description = "Accepted and ignored")),
    responses(
        (status = 200, description = "All cases", body = CasePage),
        (status = 500, description = "Unexpected failure", body = ErrorBody)
    ),
    tags = ["cases"],
    operation_id = "listCases"
)]
#[get("/cases")]
pub async fn list_cases(
    req: HttpRequest,
    state: web::Data<HttpState>,
    _query: web::Query<ListQuery>,
) -> ApiResult<web::Json<CasePage>> {
    let page = state
        .cases
        .fetch_case_list()
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;
    Ok(web::Json(page))
}

/// Fetch one case by identifier.
#[utoipa::path(
    get,
    path = "/cases/{id}",
    params(("id" = String, Path, description = "Case identifier")),
    responses(
        (status = 200, description = "The case", body = Case),
        (status = 404, description = "No such case", body = ErrorBody)
    ),
    tags = ["cases"],
    operation_id = "getCaseById"
)]
#[get("/cases/{id}")]
pub async fn get_case(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Case>> {
    let case = state
        .cases
        .get_case_by_id(&id)
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;
    Ok(web::Json(case))
}

/// Create a case.
///
/// The payload is validated in full before the service runs; both audit
/// timestamps are stamped server-side from one clock reading.
#[utoipa::path(
    post,
    path = "/cases",
    request_body = CreateCaseRequest,
    responses(
        (status = 201, description = "Case created", body = Case),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 409, description = "Case number already exists", body = ErrorBody)
    ),
    tags = ["cases"],
    operation_id = "createCase"
)]
#[post("/cases")]
pub async fn create_case(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<CreateCaseRequest>,
) -> ApiResult<HttpResponse> {
    let draft = CaseDraft::from(payload.into_inner());
    let candidate = draft
        .validate(state.clock.utc())
        .map_err(|violations| ApiError::validation_failed(violations, req.path()))?;

    let case = state
        .cases
        .create_case(candidate)
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;
    Ok(HttpResponse::Created().json(case))
}

/// Partially update a case.
#[utoipa::path(
    put,
    path = "/cases/{id}",
    params(("id" = String, Path, description = "Case identifier")),
    request_body = UpdateCaseRequest,
    responses(
        (status = 200, description = "Updated case", body = Case),
        (status = 404, description = "No such case", body = ErrorBody),
        (status = 409, description = "Case number already exists", body = ErrorBody)
    ),
    tags = ["cases"],
    operation_id = "updateCase"
)]
#[put("/cases/{id}")]
pub async fn update_case(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<UpdateCaseRequest>,
) -> ApiResult<web::Json<Case>> {
    let patch = CasePatch::from(payload.into_inner());
    let case = state
        .cases
        .update_case(patch, &id)
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;
    Ok(web::Json(case))
}

/// Delete a case. Deleting an absent-but-parseable identifier still succeeds.
#[utoipa::path(
    delete,
    path = "/cases/{id}",
    params(("id" = String, Path, description = "Case identifier")),
    responses(
        (status = 204, description = "Case deleted (or already absent)"),
        (status = 404, description = "Unparseable identifier", body = ErrorBody)
    ),
    tags = ["cases"],
    operation_id = "deleteCase"
)]
#[delete("/cases/{id}")]
pub async fn delete_case(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .cases
        .delete_case_by_id(&id)
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;
    Ok(HttpResponse::NoContent().finish())
}

/// List cases with the given lifecycle status.
#[utoipa::path(
    get,
    path = "/cases/status/{status}",
    params(("status" = String, Path, description = "Lifecycle status value")),
    responses(
        (status = 200, description = "Cases with that status", body = Vec<Case>),
        (status = 400, description = "Unknown status value", body = ErrorBody)
    ),
    tags = ["cases"],
    operation_id = "getCasesByStatus"
)]
#[get("/cases/status/{status}")]
pub async fn get_cases_by_status(
    req: HttpRequest,
    state: web::Data<HttpState>,
    status: web::Path<String>,
) -> ApiResult<web::Json<Vec<Case>>> {
    let status = CaseStatus::from_str(&status).map_err(|_| ApiError::bad_payload(req.path()))?;
    let cases = state
        .cases
        .get_cases_by_status(status)
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;
    Ok(web::Json(cases))
}

/// Enumerate the lifecycle status values.
#[utoipa::path(
    get,
    path = "/case-statuses",
    responses(
        (status = 200, description = "All status values", body = Vec<String>)
    ),
    tags = ["cases"],
    operation_id = "listCaseStatuses"
)]
#[get("/case-statuses")]
pub async fn list_case_statuses() -> web::Json<Vec<&'static str>> {
    web::Json(CaseStatus::values().iter().map(|s| s.as_str()).collect())
}

/// Serve a canned sample case.
#[utoipa::path(
    get,
    path = "/get-example-case",
    responses(
        (status = 200, description = "Sample case", body = ExampleCaseResponse)
    ),
    tags = ["cases"],
    operation_id = "getExampleCase"
)]
#[get("/get-example-case")]
pub async fn get_example_case(state: web::Data<HttpState>) -> web::Json<ExampleCaseResponse> {
    web::Json(ExampleCaseResponse {
        id: 1,
        case_number: "ABC12345".to_owned(),
        title: "Case Title".to_owned(),
        description: "Case Description".to_owned(),
        status: "Case Status".to_owned(),
        created_date: state.clock.utc(),
    })
}

#[cfg(test)]
#[path = "cases_tests.rs"]
mod tests;
