//! Maintenance request endpoints: lifecycle, assignment and audit trail

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorResponse},
    models::{
        history::HistoryEntry,
        request::{
            AssignRequest, CreateRequest, RequestDetails, RequestQuery, UpdateRequestFields,
            UpdateStage,
        },
    },
    policy::Action,
};

use super::{ApiJson, ApiPath, ApiQuery, AuthenticatedUser, MessageResponse};

#[derive(Serialize, ToSchema)]
pub struct RequestResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub request: RequestDetails,
}

impl RequestResponse {
    fn with_message(message: &str, request: RequestDetails) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.to_string()),
            request,
        })
    }
}

/// A request with its audit trail embedded
#[derive(Serialize, ToSchema)]
pub struct RequestWithHistoryResponse {
    pub success: bool,
    pub request: RequestDetails,
    pub history: Vec<HistoryEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct RequestsResponse {
    pub success: bool,
    pub count: usize,
    pub requests: Vec<RequestDetails>,
}

impl RequestsResponse {
    pub fn of(requests: Vec<RequestDetails>) -> Json<Self> {
        Json(Self {
            success: true,
            count: requests.len(),
            requests,
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct HistoryResponse {
    pub success: bool,
    pub count: usize,
    pub history: Vec<HistoryEntry>,
}

/// Raise a maintenance request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created in stage new", body = RequestResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Equipment, category or team not found", body = ErrorResponse)
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateRequest>,
) -> AppResult<(StatusCode, Json<RequestResponse>)> {
    claims.require(Action::CreateRequest)?;
    let request = state.services.requests.create(&claims, data).await?;
    Ok((
        StatusCode::CREATED,
        RequestResponse::with_message("Maintenance request created", request),
    ))
}

/// List visible requests
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(RequestQuery),
    responses((status = 200, description = "Requests, newest first", body = RequestsResponse))
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiQuery(query): ApiQuery<RequestQuery>,
) -> AppResult<Json<RequestsResponse>> {
    let requests = state.services.requests.list(&claims, &query).await?;
    Ok(RequestsResponse::of(requests))
}

/// Get a request with its history
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request", body = RequestWithHistoryResponse),
        (status = 403, description = "Not visible to the caller", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<RequestWithHistoryResponse>> {
    let (request, history) = state.services.requests.get_with_history(&claims, id).await?;
    Ok(Json(RequestWithHistoryResponse {
        success: true,
        request,
        history,
    }))
}

/// Edit descriptive fields of a request
#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateRequestFields,
    responses(
        (status = 200, description = "Request updated", body = RequestResponse),
        (status = 400, description = "Invalid or unknown field", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateRequestFields>,
) -> AppResult<Json<RequestResponse>> {
    claims.require(Action::UpdateRequestFields)?;
    let request = state.services.requests.update_fields(&claims, id, data).await?;
    Ok(RequestResponse::with_message("Maintenance request updated", request))
}

/// Move a request to another stage
#[utoipa::path(
    patch,
    path = "/requests/{id}/stage",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateStage,
    responses(
        (status = 200, description = "Stage updated", body = RequestResponse),
        (status = 400, description = "Invalid stage", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_stage(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateStage>,
) -> AppResult<Json<RequestResponse>> {
    claims.require(Action::UpdateStage)?;
    let request = state.services.requests.update_stage(&claims, id, data).await?;
    Ok(RequestResponse::with_message("Stage updated", request))
}

/// Assign a request to a technician
#[utoipa::path(
    patch,
    path = "/requests/{id}/assign",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Request assigned", body = RequestResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Request or assignee not found", body = ErrorResponse)
    )
)]
pub async fn assign_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<AssignRequest>,
) -> AppResult<Json<RequestResponse>> {
    claims.require(Action::AssignRequest)?;
    let request = state.services.assignment.assign(&claims, id, data).await?;
    Ok(RequestResponse::with_message("Request assigned", request))
}

/// Delete a request and its history
#[utoipa::path(
    delete,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request deleted", body = MessageResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    claims.require(Action::DeleteRequest)?;
    state.services.requests.delete(&claims, id).await?;
    Ok(MessageResponse::ok("Maintenance request deleted"))
}

/// Audit trail of a request, newest first
#[utoipa::path(
    get,
    path = "/requests/{id}/history",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "History", body = HistoryResponse),
        (status = 403, description = "Not visible to the caller", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<HistoryResponse>> {
    let history = state.services.requests.history(&claims, id).await?;
    Ok(Json(HistoryResponse {
        success: true,
        count: history.len(),
        history,
    }))
}
