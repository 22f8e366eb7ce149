//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, categories, dashboard, departments, equipment, health, requests, teams, users,
    MessageResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GearGuard API",
        version = "1.0.0",
        description = "Maintenance request lifecycle and equipment management REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Users
        users::list_users,
        users::get_user,
        users::update_profile,
        users::update_role,
        users::delete_user,
        // Organisation
        departments::list_departments,
        departments::get_department,
        departments::create_department,
        departments::update_department,
        departments::delete_department,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        teams::list_teams,
        teams::get_team,
        teams::create_team,
        teams::update_team,
        teams::delete_team,
        teams::add_member,
        teams::remove_member,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::list_equipment_requests,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Requests
        requests::create_request,
        requests::list_requests,
        requests::get_request,
        requests::update_request,
        requests::update_stage,
        requests::assign_request,
        requests::delete_request,
        requests::get_history,
        // Dashboard
        dashboard::get_dashboard,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Users
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::Role,
            crate::models::user::AuthProvider,
            crate::models::user::RegisterUser,
            crate::models::user::UpdateProfile,
            crate::models::user::UpdateRole,
            users::UserResponse,
            users::UsersResponse,
            // Organisation
            crate::models::department::Department,
            crate::models::department::CreateDepartment,
            crate::models::department::UpdateDepartment,
            departments::DepartmentResponse,
            departments::DepartmentsResponse,
            crate::models::category::EquipmentCategory,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            categories::CategoryResponse,
            categories::CategoriesResponse,
            crate::models::team::MaintenanceTeam,
            crate::models::team::TeamMember,
            crate::models::team::TeamDetails,
            crate::models::team::CreateTeam,
            crate::models::team::UpdateTeam,
            crate::models::team::AddTeamMember,
            teams::TeamResponse,
            teams::TeamDetailsResponse,
            teams::TeamsResponse,
            teams::MembersResponse,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentDetails,
            crate::models::equipment::EquipmentStatus,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            equipment::EquipmentResponse,
            equipment::EquipmentListResponse,
            // Requests
            crate::models::request::MaintenanceRequest,
            crate::models::request::RequestDetails,
            crate::models::request::Stage,
            crate::models::request::Priority,
            crate::models::request::RequestType,
            crate::models::request::CreateRequest,
            crate::models::request::UpdateRequestFields,
            crate::models::request::UpdateStage,
            crate::models::request::AssignRequest,
            crate::models::request::RequestSummary,
            crate::models::history::HistoryEntry,
            requests::RequestResponse,
            requests::RequestWithHistoryResponse,
            requests::RequestsResponse,
            requests::HistoryResponse,
            dashboard::DashboardResponse,
            // Health
            health::HealthResponse,
            // Common
            MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management"),
        (name = "organisation", description = "Departments and equipment categories"),
        (name = "teams", description = "Maintenance teams and membership"),
        (name = "equipment", description = "Equipment registry"),
        (name = "requests", description = "Maintenance request lifecycle"),
        (name = "dashboard", description = "Request statistics")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
