//! Department endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorResponse},
    models::department::{CreateDepartment, Department, UpdateDepartment},
    policy::Action,
};

use super::{ApiJson, ApiPath, AuthenticatedUser, MessageResponse};

#[derive(Serialize, ToSchema)]
pub struct DepartmentResponse {
    pub success: bool,
    pub department: Department,
}

#[derive(Serialize, ToSchema)]
pub struct DepartmentsResponse {
    pub success: bool,
    pub count: usize,
    pub departments: Vec<Department>,
}

/// List departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "organisation",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Departments", body = DepartmentsResponse))
)]
pub async fn list_departments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<DepartmentsResponse>> {
    let departments = state.services.departments.list().await?;
    Ok(Json(DepartmentsResponse {
        success: true,
        count: departments.len(),
        departments,
    }))
}

/// Get department by ID
#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = "organisation",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department", body = DepartmentResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<DepartmentResponse>> {
    let department = state.services.departments.get_by_id(id).await?;
    Ok(Json(DepartmentResponse { success: true, department }))
}

/// Create department
#[utoipa::path(
    post,
    path = "/departments",
    tag = "organisation",
    security(("bearer_auth" = [])),
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 409, description = "Duplicate name", body = ErrorResponse)
    )
)]
pub async fn create_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateDepartment>,
) -> AppResult<(StatusCode, Json<DepartmentResponse>)> {
    claims.require(Action::ManageDepartments)?;
    let department = state.services.departments.create(&data).await?;
    Ok((StatusCode::CREATED, Json(DepartmentResponse { success: true, department })))
}

/// Update department
#[utoipa::path(
    put,
    path = "/departments/{id}",
    tag = "organisation",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    request_body = UpdateDepartment,
    responses(
        (status = 200, description = "Department updated", body = DepartmentResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateDepartment>,
) -> AppResult<Json<DepartmentResponse>> {
    claims.require(Action::ManageDepartments)?;
    let department = state.services.departments.update(id, &data).await?;
    Ok(Json(DepartmentResponse { success: true, department }))
}

/// Delete department
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    tag = "organisation",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department deleted", body = MessageResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    claims.require(Action::ManageDepartments)?;
    state.services.departments.delete(id).await?;
    Ok(MessageResponse::ok("Department deleted"))
}
