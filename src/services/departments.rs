//! Departments service

use validator::Validate;

use crate::{
    error::AppResult,
    models::department::{CreateDepartment, Department, UpdateDepartment},
    repository::Repository,
};

#[derive(Clone)]
pub struct DepartmentsService {
    repository: Repository,
}

impl DepartmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Department>> {
        self.repository.departments.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Department> {
        self.repository.departments.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateDepartment) -> AppResult<Department> {
        data.validate()?;
        self.repository.departments.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateDepartment) -> AppResult<Department> {
        data.validate()?;
        self.repository.departments.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.departments.delete(id).await
    }
}
