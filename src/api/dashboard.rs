//! Dashboard endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorResponse},
    models::request::RequestSummary,
    policy::Action,
};

use super::AuthenticatedUser;

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub success: bool,
    pub requests: RequestSummary,
}

/// Request counts by stage, with overdue and unassigned totals
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Summary", body = DashboardResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    )
)]
pub async fn get_dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<DashboardResponse>> {
    claims.require(Action::ViewDashboard)?;
    let requests = state.services.requests.summary().await?;
    Ok(Json(DashboardResponse { success: true, requests }))
}
