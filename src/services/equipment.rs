//! Equipment service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, EquipmentDetails, EquipmentQuery, UpdateEquipment},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentDetails>> {
        self.repository.equipment.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentDetails> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<EquipmentDetails> {
        data.validate()?;
        let id = self.repository.equipment.create(data).await?;
        tracing::info!(equipment_id = id, serial = %data.serial_number, "equipment created");
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<EquipmentDetails> {
        data.validate()?;
        self.repository.equipment.update(id, data).await?;
        self.repository.equipment.get_by_id(id).await
    }

    /// Delete equipment, refused while open requests reference it.
    ///
    /// The check and the delete run in one transaction holding the equipment
    /// row lock, so a request raised meanwhile either blocks the delete or
    /// waits and then fails on the missing equipment.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        self.repository.equipment.lock(&mut *tx, id).await?;

        let open = self.repository.equipment.count_open_requests(&mut *tx, id).await?;
        if open > 0 {
            return Err(AppError::Validation(format!(
                "Equipment has {} open maintenance request(s) and cannot be deleted",
                open
            )));
        }

        let closed = self
            .repository
            .equipment
            .delete_closed_requests(&mut *tx, id)
            .await?;
        self.repository.equipment.delete(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!(equipment_id = id, closed_requests = closed, "equipment deleted");
        Ok(())
    }
}
