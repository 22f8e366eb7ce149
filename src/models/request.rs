//! Maintenance request model, stage lifecycle and overdue evaluation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::history::NewHistoryEntry;
use crate::error::{AppError, AppResult};

/// Lifecycle stage of a maintenance request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    New,
    InProgress,
    Repaired,
    Scrapped,
}

text_enum!(Stage, "stage" {
    New => "new",
    InProgress => "in_progress",
    Repaired => "repaired",
    Scrapped => "scrapped",
});

impl Stage {
    /// No further work is expected once a request is repaired or scrapped
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Repaired | Stage::Scrapped)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

text_enum!(Priority, "priority" {
    Low => "low",
    Medium => "medium",
    High => "high",
    Urgent => "urgent",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Corrective,
    Preventive,
}

text_enum!(RequestType, "request type" {
    Corrective => "corrective",
    Preventive => "preventive",
});

/// A request is overdue when it has a scheduled date in the past and is not
/// yet repaired or scrapped.
pub fn is_overdue(scheduled_date: Option<DateTime<Utc>>, stage: Stage, now: DateTime<Utc>) -> bool {
    match scheduled_date {
        Some(scheduled) if !stage.is_terminal() => now > scheduled,
        _ => false,
    }
}

/// Maintenance request row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: i32,
    pub subject: String,
    pub description: Option<String>,
    pub equipment_id: i32,
    pub category_id: i32,
    pub team_id: i32,
    pub request_type: RequestType,
    pub priority: Priority,
    pub stage: Stage,
    pub created_by_user_id: i32,
    pub assigned_to_user_id: Option<i32>,
    pub scheduled_date: Option<DateTime<Utc>>,
    /// Set exactly when the stage is terminal
    pub completed_date: Option<DateTime<Utc>>,
    pub duration_hours: Option<Decimal>,
    pub notes: Option<String>,
    /// Cached; reconciled on every read
    pub is_overdue: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRequest {
    /// Recompute the cached overdue flag. Returns true when it changed.
    pub fn reconcile_overdue(&mut self, now: DateTime<Utc>) -> bool {
        let computed = is_overdue(self.scheduled_date, self.stage, now);
        if computed == self.is_overdue {
            return false;
        }
        self.is_overdue = computed;
        true
    }
}

/// Request with resolved reference names, as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: MaintenanceRequest,
    pub equipment_name: String,
    pub category_name: String,
    pub team_name: String,
    pub created_by_name: String,
    pub assigned_to_name: Option<String>,
}

/// Request list filters
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestQuery {
    pub stage: Option<Stage>,
    pub priority: Option<Priority>,
    pub team_id: Option<i32>,
    pub assigned_to_user_id: Option<i32>,
    pub equipment_id: Option<i32>,
}

/// Visibility restriction applied on top of `RequestQuery`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScope {
    All,
    /// Assigned to the user or owned by one of their teams
    Technician(i32),
    CreatedBy(i32),
}

/// Request counts for the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    pub total: i64,
    pub new: i64,
    pub in_progress: i64,
    pub repaired: i64,
    pub scrapped: i64,
    pub overdue: i64,
    pub unassigned: i64,
}

/// Create request body.
///
/// Required fields are optional here so that a missing one surfaces as a
/// validation error with a readable message.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateRequest {
    #[validate(
        required(message = "Subject is required"),
        length(min = 1, message = "Subject is required")
    )]
    pub subject: Option<String>,
    pub description: Option<String>,
    #[validate(required(message = "Equipment is required"))]
    pub equipment_id: Option<i32>,
    #[validate(required(message = "Category is required"))]
    pub category_id: Option<i32>,
    #[validate(required(message = "Maintenance team is required"))]
    pub team_id: Option<i32>,
    #[validate(required(message = "Request type is required"))]
    pub request_type: Option<RequestType>,
    pub priority: Option<Priority>,
    /// Accepted but ignored: requests always start in `new`
    pub stage: Option<Stage>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub duration_hours: Option<Decimal>,
    pub notes: Option<String>,
}

/// Validated insert data for a new request
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub subject: String,
    pub description: Option<String>,
    pub equipment_id: i32,
    pub category_id: i32,
    pub team_id: i32,
    pub request_type: RequestType,
    pub priority: Priority,
    pub stage: Stage,
    pub created_by_user_id: i32,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub duration_hours: Option<Decimal>,
    pub notes: Option<String>,
    pub is_overdue: bool,
}

impl CreateRequest {
    pub fn into_new(self, created_by_user_id: i32, now: DateTime<Utc>) -> AppResult<NewRequest> {
        self.validate()?;

        let missing = || AppError::Validation("Missing required request fields".to_string());
        let subject = self.subject.map(|s| s.trim().to_string()).ok_or_else(missing)?;
        if subject.is_empty() {
            return Err(AppError::Validation("Subject is required".to_string()));
        }

        Ok(NewRequest {
            subject,
            description: self.description,
            equipment_id: self.equipment_id.ok_or_else(missing)?,
            category_id: self.category_id.ok_or_else(missing)?,
            team_id: self.team_id.ok_or_else(missing)?,
            request_type: self.request_type.ok_or_else(missing)?,
            priority: self.priority.unwrap_or_default(),
            stage: Stage::New,
            created_by_user_id,
            scheduled_date: self.scheduled_date,
            duration_hours: normalize_duration(self.duration_hours)?,
            notes: self.notes,
            is_overdue: is_overdue(self.scheduled_date, Stage::New, now),
        })
    }
}

/// Editable request fields. Stage, assignee and completion are not here:
/// they only move through stage updates and assignment.
///
/// Description, schedule, duration and notes may be sent as `null` to clear
/// them; an absent key leaves the stored value alone.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateRequestFields {
    #[validate(length(min = 1, message = "Subject cannot be empty"))]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub request_type: Option<RequestType>,
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub scheduled_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[schema(value_type = Option<f64>)]
    pub duration_hours: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

/// Descriptive fields after applying an edit to the stored request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestFieldsChange {
    pub request_id: i32,
    pub subject: String,
    pub description: Option<String>,
    pub request_type: RequestType,
    pub priority: Priority,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub duration_hours: Option<Decimal>,
    pub notes: Option<String>,
    pub is_overdue: bool,
}

impl RequestFieldsChange {
    pub fn plan(
        request: &MaintenanceRequest,
        data: UpdateRequestFields,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        let subject = match data.subject {
            Some(subject) if subject.trim().is_empty() => {
                return Err(AppError::Validation("Subject cannot be empty".to_string()));
            }
            Some(subject) => subject.trim().to_string(),
            None => request.subject.clone(),
        };
        let duration_hours = match data.duration_hours {
            Some(hours) => normalize_duration(hours)?,
            None => request.duration_hours,
        };
        let scheduled_date = data.scheduled_date.unwrap_or(request.scheduled_date);

        Ok(RequestFieldsChange {
            request_id: request.id,
            subject,
            description: data.description.unwrap_or_else(|| request.description.clone()),
            request_type: data.request_type.unwrap_or(request.request_type),
            priority: data.priority.unwrap_or(request.priority),
            scheduled_date,
            duration_hours,
            notes: data.notes.unwrap_or_else(|| request.notes.clone()),
            is_overdue: is_overdue(scheduled_date, request.stage, now),
        })
    }
}

/// Stage update body; `stage` stays a string so that a bad value is a 400
/// with the list of valid stages.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateStage {
    pub stage: String,
    pub notes: Option<String>,
    pub duration_hours: Option<Decimal>,
}

impl UpdateStage {
    pub fn parse_stage(&self) -> AppResult<Stage> {
        self.stage.parse().map_err(AppError::Validation)
    }
}

/// Assignment body
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssignRequest {
    pub assigned_to_user_id: Option<i32>,
}

/// Round a duration to two decimals, rejecting negative values.
pub fn normalize_duration(hours: Option<Decimal>) -> AppResult<Option<Decimal>> {
    match hours {
        Some(h) if h.is_sign_negative() && !h.is_zero() => Err(AppError::Validation(
            "Duration cannot be negative".to_string(),
        )),
        Some(h) => Ok(Some(h.round_dp(2))),
        None => Ok(None),
    }
}

/// Everything a stage update writes, computed before touching the database
#[derive(Debug, Clone, PartialEq)]
pub struct StageChange {
    pub request_id: i32,
    pub old_stage: Stage,
    pub new_stage: Stage,
    pub completed_date: Option<DateTime<Utc>>,
    pub old_assigned_to: Option<i32>,
    pub assigned_to: Option<i32>,
    pub notes: Option<String>,
    pub duration_hours: Option<Decimal>,
    pub is_overdue: bool,
    pub history_note: String,
}

impl StageChange {
    pub fn plan(
        request: &MaintenanceRequest,
        new_stage: Stage,
        actor_id: i32,
        notes: Option<String>,
        duration_hours: Option<Decimal>,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        let duration_hours = normalize_duration(duration_hours)?;
        let notes = notes.filter(|n| !n.trim().is_empty());

        // Reaching a terminal stage always stamps completion, even when the
        // request was already in that stage.
        let (completed_date, assigned_to) = if new_stage.is_terminal() {
            (Some(now), request.assigned_to_user_id.or(Some(actor_id)))
        } else {
            (None, request.assigned_to_user_id)
        };

        let history_note = notes.clone().unwrap_or_else(|| {
            format!("Stage changed from {} to {}", request.stage, new_stage)
        });

        Ok(StageChange {
            request_id: request.id,
            old_stage: request.stage,
            new_stage,
            completed_date,
            old_assigned_to: request.assigned_to_user_id,
            assigned_to,
            notes: notes.or_else(|| request.notes.clone()),
            duration_hours: duration_hours.or(request.duration_hours),
            is_overdue: is_overdue(request.scheduled_date, new_stage, now),
            history_note,
        })
    }

    pub fn auto_assigned(&self) -> bool {
        self.old_assigned_to.is_none() && self.assigned_to.is_some()
    }

    pub fn history(&self, actor_id: i32) -> NewHistoryEntry {
        let (old_assigned_to, new_assigned_to) = if self.auto_assigned() {
            (self.old_assigned_to, self.assigned_to)
        } else {
            (None, None)
        };
        NewHistoryEntry {
            request_id: self.request_id,
            changed_by_user_id: actor_id,
            field_name: Some("stage".to_string()),
            old_assigned_to,
            new_assigned_to,
            old_stage: self.old_stage,
            new_stage: self.new_stage,
            note: Some(self.history_note.clone()),
        }
    }
}

/// Everything an assignment writes
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentChange {
    pub request_id: i32,
    pub old_assigned_to: Option<i32>,
    pub new_assigned_to: i32,
    pub old_stage: Stage,
    pub new_stage: Stage,
    pub is_overdue: bool,
    pub history_note: String,
}

impl AssignmentChange {
    /// Assigning a `new` request starts the work; other stages are kept.
    pub fn plan(
        request: &MaintenanceRequest,
        assignee_id: i32,
        assignee_name: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let new_stage = if request.stage == Stage::New {
            Stage::InProgress
        } else {
            request.stage
        };

        let history_note = match request.assigned_to_user_id {
            Some(_) => format!("Request reassigned to {}", assignee_name),
            None => format!("Request assigned to {}", assignee_name),
        };

        AssignmentChange {
            request_id: request.id,
            old_assigned_to: request.assigned_to_user_id,
            new_assigned_to: assignee_id,
            old_stage: request.stage,
            new_stage,
            is_overdue: is_overdue(request.scheduled_date, new_stage, now),
            history_note,
        }
    }

    pub fn history(&self, actor_id: i32) -> NewHistoryEntry {
        NewHistoryEntry {
            request_id: self.request_id,
            changed_by_user_id: actor_id,
            field_name: Some("assigned_to".to_string()),
            old_assigned_to: self.old_assigned_to,
            new_assigned_to: Some(self.new_assigned_to),
            old_stage: self.old_stage,
            new_stage: self.new_stage,
            note: Some(self.history_note.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request(stage: Stage) -> MaintenanceRequest {
        let now = Utc::now();
        MaintenanceRequest {
            id: 1,
            subject: "Leaking hydraulic press".to_string(),
            description: None,
            equipment_id: 10,
            category_id: 20,
            team_id: 30,
            request_type: RequestType::Corrective,
            priority: Priority::Medium,
            stage,
            created_by_user_id: 100,
            assigned_to_user_id: None,
            scheduled_date: None,
            completed_date: None,
            duration_hours: None,
            notes: None,
            is_overdue: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_overdue_without_schedule_is_false() {
        let now = Utc::now();
        for stage in Stage::ALL {
            assert!(!is_overdue(None, *stage, now));
        }
    }

    #[test]
    fn test_overdue_terminal_is_false() {
        let now = Utc::now();
        let yesterday = Some(now - Duration::days(1));
        assert!(!is_overdue(yesterday, Stage::Repaired, now));
        assert!(!is_overdue(yesterday, Stage::Scrapped, now));
    }

    #[test]
    fn test_overdue_non_terminal_compares_with_now() {
        let now = Utc::now();
        assert!(is_overdue(Some(now - Duration::days(1)), Stage::InProgress, now));
        assert!(is_overdue(Some(now - Duration::seconds(1)), Stage::New, now));
        assert!(!is_overdue(Some(now + Duration::days(1)), Stage::New, now));
        // strictly after
        assert!(!is_overdue(Some(now), Stage::New, now));
    }

    #[test]
    fn test_reconcile_overdue_corrects_stale_flag() {
        let now = Utc::now();
        let mut req = request(Stage::InProgress);
        req.scheduled_date = Some(now - Duration::days(1));

        assert!(req.reconcile_overdue(now));
        assert!(req.is_overdue);
        assert!(!req.reconcile_overdue(now));
    }

    #[test]
    fn test_stage_parse_error_lists_valid_values() {
        let err = "done".parse::<Stage>().unwrap_err();
        assert!(err.contains("new, in_progress, repaired, scrapped"));
    }

    #[test]
    fn test_create_forces_new_stage_and_default_priority() {
        let input = CreateRequest {
            subject: Some("  Replace belt ".to_string()),
            equipment_id: Some(1),
            category_id: Some(2),
            team_id: Some(3),
            request_type: Some(RequestType::Preventive),
            stage: Some(Stage::Repaired),
            ..CreateRequest::default()
        };
        let new = input.into_new(42, Utc::now()).unwrap();
        assert_eq!(new.stage, Stage::New);
        assert_eq!(new.priority, Priority::Medium);
        assert_eq!(new.subject, "Replace belt");
        assert_eq!(new.created_by_user_id, 42);
    }

    #[test]
    fn test_create_requires_fields() {
        let input = CreateRequest {
            subject: Some("Noise".to_string()),
            equipment_id: Some(1),
            ..CreateRequest::default()
        };
        match input.into_new(1, Utc::now()) {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("Category is required"));
                assert!(msg.contains("Request type is required"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_rejects_blank_subject() {
        let input = CreateRequest {
            subject: Some("   ".to_string()),
            equipment_id: Some(1),
            category_id: Some(2),
            team_id: Some(3),
            request_type: Some(RequestType::Corrective),
            ..CreateRequest::default()
        };
        assert!(matches!(input.into_new(1, Utc::now()), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_stage_to_terminal_sets_completion_and_auto_assigns() {
        let now = Utc::now();
        let req = request(Stage::InProgress);
        let change = StageChange::plan(&req, Stage::Repaired, 7, None, None, now).unwrap();

        assert_eq!(change.completed_date, Some(now));
        assert_eq!(change.assigned_to, Some(7));
        assert!(change.auto_assigned());
        assert_eq!(change.history_note, "Stage changed from in_progress to repaired");

        let entry = change.history(7);
        assert_eq!(entry.old_stage, Stage::InProgress);
        assert_eq!(entry.new_stage, Stage::Repaired);
        assert_eq!(entry.new_assigned_to, Some(7));
    }

    #[test]
    fn test_stage_to_terminal_keeps_existing_assignee() {
        let mut req = request(Stage::InProgress);
        req.assigned_to_user_id = Some(5);
        let change = StageChange::plan(&req, Stage::Scrapped, 9, None, None, Utc::now()).unwrap();
        assert_eq!(change.assigned_to, Some(5));
        assert!(!change.auto_assigned());
        assert_eq!(change.history(9).new_assigned_to, None);
    }

    #[test]
    fn test_non_terminal_stage_clears_completion() {
        let mut req = request(Stage::Repaired);
        req.completed_date = Some(Utc::now() - Duration::days(2));
        let change = StageChange::plan(&req, Stage::InProgress, 1, None, None, Utc::now()).unwrap();
        assert_eq!(change.completed_date, None);
    }

    #[test]
    fn test_restage_same_terminal_refreshes_completion() {
        let now = Utc::now();
        let mut req = request(Stage::Repaired);
        req.completed_date = Some(now - Duration::days(3));
        req.assigned_to_user_id = Some(2);
        let change = StageChange::plan(&req, Stage::Repaired, 2, None, None, now).unwrap();
        assert_eq!(change.completed_date, Some(now));
        assert_eq!(change.history_note, "Stage changed from repaired to repaired");
    }

    #[test]
    fn test_explicit_note_and_duration() {
        let req = request(Stage::New);
        let hours = Decimal::new(2456, 3);
        let change = StageChange::plan(
            &req,
            Stage::InProgress,
            1,
            Some("Parts ordered".to_string()),
            Some(hours),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(change.history_note, "Parts ordered");
        assert_eq!(change.notes.as_deref(), Some("Parts ordered"));
        assert_eq!(change.duration_hours, Some(Decimal::new(246, 2)));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let req = request(Stage::New);
        let negative = Some(Decimal::new(-1, 0));
        let result = StageChange::plan(&req, Stage::InProgress, 1, None, negative, Utc::now());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_stage_change_recomputes_overdue() {
        let now = Utc::now();
        let mut req = request(Stage::InProgress);
        req.scheduled_date = Some(now - Duration::days(1));
        req.is_overdue = true;
        let change = StageChange::plan(&req, Stage::Repaired, 1, None, None, now).unwrap();
        assert!(!change.is_overdue);
    }

    #[test]
    fn test_field_edit_clears_explicit_nulls() {
        let now = Utc::now();
        let mut req = request(Stage::InProgress);
        req.description = Some("Drips at night".to_string());
        req.notes = Some("Check seals".to_string());
        req.scheduled_date = Some(now - Duration::days(1));
        req.is_overdue = true;

        let data: UpdateRequestFields = serde_json::from_str(
            r#"{"description": null, "scheduledDate": null, "notes": null}"#,
        )
        .unwrap();
        let change = RequestFieldsChange::plan(&req, data, now).unwrap();

        assert_eq!(change.description, None);
        assert_eq!(change.scheduled_date, None);
        assert_eq!(change.notes, None);
        assert!(!change.is_overdue);
        assert_eq!(change.subject, req.subject);
    }

    #[test]
    fn test_field_edit_keeps_absent_fields() {
        let now = Utc::now();
        let mut req = request(Stage::New);
        req.description = Some("Drips at night".to_string());
        req.duration_hours = Some(Decimal::new(15, 1));

        let data: UpdateRequestFields =
            serde_json::from_str(r#"{"subject": "  Seal leak ", "priority": "high"}"#).unwrap();
        let change = RequestFieldsChange::plan(&req, data, now).unwrap();

        assert_eq!(change.subject, "Seal leak");
        assert_eq!(change.priority, Priority::High);
        assert_eq!(change.description.as_deref(), Some("Drips at night"));
        assert_eq!(change.duration_hours, Some(Decimal::new(15, 1)));
    }

    #[test]
    fn test_field_edit_past_schedule_marks_overdue() {
        let now = Utc::now();
        let req = request(Stage::New);
        let data = UpdateRequestFields {
            scheduled_date: Some(Some(now - Duration::hours(2))),
            ..UpdateRequestFields::default()
        };
        assert!(RequestFieldsChange::plan(&req, data, now).unwrap().is_overdue);
    }

    #[test]
    fn test_field_edit_rejects_blank_subject() {
        let data = UpdateRequestFields {
            subject: Some("  ".to_string()),
            ..UpdateRequestFields::default()
        };
        let result = RequestFieldsChange::plan(&request(Stage::New), data, Utc::now());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_assignment_advances_new_request() {
        let req = request(Stage::New);
        let change = AssignmentChange::plan(&req, 8, "Tom Technician", Utc::now());
        assert_eq!(change.new_stage, Stage::InProgress);

        let entry = change.history(1);
        assert_eq!(entry.old_assigned_to, None);
        assert_eq!(entry.new_assigned_to, Some(8));
        assert_eq!(entry.note.as_deref(), Some("Request assigned to Tom Technician"));
    }

    #[test]
    fn test_reassignment_keeps_stage() {
        for stage in [Stage::InProgress, Stage::Repaired, Stage::Scrapped] {
            let mut req = request(stage);
            req.assigned_to_user_id = Some(3);
            let change = AssignmentChange::plan(&req, 4, "Ann", Utc::now());
            assert_eq!(change.new_stage, stage);
            assert_eq!(change.old_assigned_to, Some(3));
            assert_eq!(change.history_note, "Request reassigned to Ann");
        }
    }
}
