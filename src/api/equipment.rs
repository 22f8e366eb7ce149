//! Equipment endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorResponse},
    models::equipment::{CreateEquipment, EquipmentDetails, EquipmentQuery, UpdateEquipment},
    policy::Action,
};

use super::{
    requests::RequestsResponse, ApiJson, ApiPath, ApiQuery, AuthenticatedUser, MessageResponse,
};

#[derive(Serialize, ToSchema)]
pub struct EquipmentResponse {
    pub success: bool,
    pub equipment: EquipmentDetails,
}

#[derive(Serialize, ToSchema)]
pub struct EquipmentListResponse {
    pub success: bool,
    pub count: usize,
    pub equipment: Vec<EquipmentDetails>,
}

/// List equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(EquipmentQuery),
    responses((status = 200, description = "Equipment list", body = EquipmentListResponse))
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ApiQuery(query): ApiQuery<EquipmentQuery>,
) -> AppResult<Json<EquipmentListResponse>> {
    let equipment = state.services.equipment.list(&query).await?;
    Ok(Json(EquipmentListResponse {
        success: true,
        count: equipment.len(),
        equipment,
    }))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = EquipmentResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<EquipmentResponse>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(EquipmentResponse { success: true, equipment }))
}

/// Maintenance requests raised against a piece of equipment
#[utoipa::path(
    get,
    path = "/equipment/{id}/requests",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Requests", body = RequestsResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn list_equipment_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<RequestsResponse>> {
    let requests = state.services.requests.list_for_equipment(&claims, id).await?;
    Ok(RequestsResponse::of(requests))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = EquipmentResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 409, description = "Duplicate serial number", body = ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateEquipment>,
) -> AppResult<(StatusCode, Json<EquipmentResponse>)> {
    claims.require(Action::ManageEquipment)?;
    let equipment = state.services.equipment.create(&data).await?;
    Ok((StatusCode::CREATED, Json(EquipmentResponse { success: true, equipment })))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = EquipmentResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateEquipment>,
) -> AppResult<Json<EquipmentResponse>> {
    claims.require(Action::ManageEquipment)?;
    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(EquipmentResponse { success: true, equipment }))
}

/// Delete equipment
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment deleted", body = MessageResponse),
        (status = 400, description = "Open requests reference the equipment", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    claims.require(Action::DeleteEquipment)?;
    state.services.equipment.delete(id).await?;
    Ok(MessageResponse::ok("Equipment deleted"))
}
