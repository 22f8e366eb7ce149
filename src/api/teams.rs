//! Maintenance team endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorResponse},
    models::team::{AddTeamMember, CreateTeam, MaintenanceTeam, TeamDetails, TeamMember, UpdateTeam},
    policy::Action,
};

use super::{ApiJson, ApiPath, AuthenticatedUser, MessageResponse};

#[derive(Serialize, ToSchema)]
pub struct TeamResponse {
    pub success: bool,
    pub team: MaintenanceTeam,
}

#[derive(Serialize, ToSchema)]
pub struct TeamDetailsResponse {
    pub success: bool,
    pub team: TeamDetails,
}

#[derive(Serialize, ToSchema)]
pub struct TeamsResponse {
    pub success: bool,
    pub count: usize,
    pub teams: Vec<MaintenanceTeam>,
}

#[derive(Serialize, ToSchema)]
pub struct MembersResponse {
    pub success: bool,
    pub members: Vec<TeamMember>,
}

/// List maintenance teams
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Teams", body = TeamsResponse))
)]
pub async fn list_teams(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<TeamsResponse>> {
    let teams = state.services.teams.list().await?;
    Ok(Json(TeamsResponse {
        success: true,
        count: teams.len(),
        teams,
    }))
}

/// Get a team with its members
#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team", body = TeamDetailsResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<TeamDetailsResponse>> {
    let team = state.services.teams.get(id).await?;
    Ok(Json(TeamDetailsResponse { success: true, team }))
}

/// Create team
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    security(("bearer_auth" = [])),
    request_body = CreateTeam,
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 409, description = "Duplicate name", body = ErrorResponse)
    )
)]
pub async fn create_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateTeam>,
) -> AppResult<(StatusCode, Json<TeamResponse>)> {
    claims.require(Action::ManageTeams)?;
    let team = state.services.teams.create(&data).await?;
    Ok((StatusCode::CREATED, Json(TeamResponse { success: true, team })))
}

/// Update team
#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    request_body = UpdateTeam,
    responses(
        (status = 200, description = "Team updated", body = TeamResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateTeam>,
) -> AppResult<Json<TeamResponse>> {
    claims.require(Action::ManageTeams)?;
    let team = state.services.teams.update(id, &data).await?;
    Ok(Json(TeamResponse { success: true, team }))
}

/// Delete team
#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team deleted", body = MessageResponse),
        (status = 400, description = "Team still owns equipment or requests", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    )
)]
pub async fn delete_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    claims.require(Action::DeleteTeam)?;
    state.services.teams.delete(id).await?;
    Ok(MessageResponse::ok("Team deleted"))
}

/// Add a member to a team
#[utoipa::path(
    post,
    path = "/teams/{id}/members",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    request_body = AddTeamMember,
    responses(
        (status = 201, description = "Member added", body = MembersResponse),
        (status = 404, description = "Team or user not found", body = ErrorResponse),
        (status = 409, description = "Already a member", body = ErrorResponse)
    )
)]
pub async fn add_member(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<AddTeamMember>,
) -> AppResult<(StatusCode, Json<MembersResponse>)> {
    claims.require(Action::ManageTeams)?;
    let members = state.services.teams.add_member(id, &data).await?;
    Ok((StatusCode::CREATED, Json(MembersResponse { success: true, members })))
}

/// Remove a member from a team
#[utoipa::path(
    delete,
    path = "/teams/{id}/members/{user_id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Team ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Member removed", body = MembersResponse),
        (status = 404, description = "Not a member", body = ErrorResponse)
    )
)]
pub async fn remove_member(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath((id, user_id)): ApiPath<(i32, i32)>,
) -> AppResult<Json<MembersResponse>> {
    claims.require(Action::ManageTeams)?;
    let members = state.services.teams.remove_member(id, user_id).await?;
    Ok(Json(MembersResponse { success: true, members }))
}
