//! Business logic services

pub mod assignment;
pub mod auth;
pub mod categories;
pub mod departments;
pub mod equipment;
pub mod requests;
pub mod teams;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub users: users::UsersService,
    pub departments: departments::DepartmentsService,
    pub categories: categories::CategoriesService,
    pub teams: teams::TeamsService,
    pub equipment: equipment::EquipmentService,
    pub requests: requests::RequestsService,
    pub assignment: assignment::AssignmentService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            users: users::UsersService::new(repository.clone()),
            departments: departments::DepartmentsService::new(repository.clone()),
            categories: categories::CategoriesService::new(repository.clone()),
            teams: teams::TeamsService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone()),
            assignment: assignment::AssignmentService::new(repository),
        }
    }
}
