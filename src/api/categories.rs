//! Equipment category endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorResponse},
    models::category::{CreateCategory, EquipmentCategory, UpdateCategory},
    policy::Action,
};

use super::{ApiJson, ApiPath, AuthenticatedUser, MessageResponse};

#[derive(Serialize, ToSchema)]
pub struct CategoryResponse {
    pub success: bool,
    pub category: EquipmentCategory,
}

#[derive(Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub success: bool,
    pub count: usize,
    pub categories: Vec<EquipmentCategory>,
}

/// List categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "organisation",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Categories", body = CategoriesResponse))
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<CategoriesResponse>> {
    let categories = state.services.categories.list().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        count: categories.len(),
        categories,
    }))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "organisation",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.services.categories.get_by_id(id).await?;
    Ok(Json(CategoryResponse { success: true, category }))
}

/// Create category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "organisation",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 409, description = "Duplicate name", body = ErrorResponse)
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    claims.require(Action::ManageCategories)?;
    let category = state.services.categories.create(&data).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse { success: true, category })))
}

/// Update category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "organisation",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateCategory>,
) -> AppResult<Json<CategoryResponse>> {
    claims.require(Action::ManageCategories)?;
    let category = state.services.categories.update(id, &data).await?;
    Ok(Json(CategoryResponse { success: true, category }))
}

/// Delete category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "organisation",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    claims.require(Action::ManageCategories)?;
    state.services.categories.delete(id).await?;
    Ok(MessageResponse::ok("Category deleted"))
}
