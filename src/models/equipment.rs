//! Equipment model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Equipment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Active,
    UnderMaintenance,
    Scrapped,
}

text_enum!(EquipmentStatus, "equipment status" {
    Active => "active",
    UnderMaintenance => "under_maintenance",
    Scrapped => "scrapped",
});

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub serial_number: String,
    pub category_id: i32,
    pub department_id: Option<i32>,
    /// Employee the asset is assigned to
    pub assigned_to_user_id: Option<i32>,
    pub team_id: i32,
    pub default_technician_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub location: Option<String>,
    pub status: EquipmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equipment with resolved reference names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub equipment: Equipment,
    pub category_name: String,
    pub department_name: Option<String>,
    pub team_name: String,
    pub assigned_to_name: Option<String>,
    pub default_technician_name: Option<String>,
}

/// Equipment query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentQuery {
    pub department_id: Option<i32>,
    pub category_id: Option<i32>,
    pub team_id: Option<i32>,
    pub status: Option<EquipmentStatus>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Equipment name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: String,
    pub category_id: i32,
    pub department_id: Option<i32>,
    pub assigned_to_user_id: Option<i32>,
    pub team_id: i32,
    pub default_technician_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub location: Option<String>,
    pub status: Option<EquipmentStatus>,
}

/// Update equipment request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "Equipment name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Serial number cannot be empty"))]
    pub serial_number: Option<String>,
    pub category_id: Option<i32>,
    pub department_id: Option<i32>,
    pub assigned_to_user_id: Option<i32>,
    pub team_id: Option<i32>,
    pub default_technician_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub location: Option<String>,
    pub status: Option<EquipmentStatus>,
}
