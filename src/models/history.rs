//! Request history (audit trail) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::request::Stage;

/// Audit row as read back, with display names resolved
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i32,
    pub request_id: i32,
    pub changed_by_user_id: i32,
    pub changed_by_name: String,
    /// `stage` or `assigned_to`
    pub field_name: Option<String>,
    pub old_assigned_to: Option<i32>,
    pub old_assigned_to_name: Option<String>,
    pub new_assigned_to: Option<i32>,
    pub new_assigned_to_name: Option<String>,
    pub old_stage: Stage,
    pub new_stage: Stage,
    pub note: Option<String>,
    pub changed_at: DateTime<Utc>,
}

/// Audit row to append
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryEntry {
    pub request_id: i32,
    pub changed_by_user_id: i32,
    pub field_name: Option<String>,
    pub old_assigned_to: Option<i32>,
    pub new_assigned_to: Option<i32>,
    pub old_stage: Stage,
    pub new_stage: Stage,
    pub note: Option<String>,
}
