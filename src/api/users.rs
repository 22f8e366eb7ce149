//! User management endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppResult, ErrorResponse},
    models::user::{Role, UpdateProfile, UpdateRole, User, UserShort},
    policy::Action,
};

use super::{ApiJson, ApiPath, ApiQuery, AuthenticatedUser, MessageResponse};

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: User,
}

impl UserResponse {
    pub fn of(user: User) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            user,
        })
    }

    pub fn with_message(message: &str, user: User) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.to_string()),
            user,
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct UsersResponse {
    pub success: bool,
    pub count: usize,
    pub users: Vec<UserShort>,
}

#[derive(Deserialize, IntoParams)]
pub struct UserListQuery {
    pub role: Option<Role>,
}

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(UserListQuery),
    responses(
        (status = 200, description = "List of users", body = UsersResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> AppResult<Json<UsersResponse>> {
    claims.require(Action::ListUsers)?;

    let users = state.services.users.list(query.role).await?;
    Ok(Json(UsersResponse {
        success: true,
        count: users.len(),
        users,
    }))
}

/// Get user details by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.get(&claims, id).await?;
    Ok(UserResponse::of(user))
}

/// Update own profile
#[utoipa::path(
    put,
    path = "/auth/profile",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    )
)]
pub async fn update_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<UpdateProfile>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.update_profile(&claims, data).await?;
    Ok(UserResponse::with_message("Profile updated", user))
}

/// Change a user's role
#[utoipa::path(
    put,
    path = "/users/{id}/role",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateRole,
    responses(
        (status = 200, description = "Role updated", body = UserResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_role(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateRole>,
) -> AppResult<Json<UserResponse>> {
    claims.require(Action::ChangeUserRole)?;

    let user = state.services.users.update_role(&claims, id, data.role).await?;
    Ok(UserResponse::with_message("Role updated", user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Own account, or user owns records", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    // self-deletion and role are both checked by the service, in that order
    state.services.users.delete(&claims, id).await?;
    Ok(MessageResponse::ok("User deleted"))
}
