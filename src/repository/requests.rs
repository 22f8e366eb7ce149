//! Maintenance requests repository
//!
//! Stage, assignee, completion and the overdue cache are only written through
//! `apply_stage_change`, `apply_assignment`, `update_fields` and
//! `set_overdue`, all driven by the request services.

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::request::{
        AssignmentChange, MaintenanceRequest, NewRequest, RequestDetails, RequestQuery,
        RequestFieldsChange, RequestScope, RequestSummary, StageChange,
    },
};

const SELECT_DETAILS: &str = r#"
    SELECT r.*,
           e.name AS equipment_name,
           c.name AS category_name,
           t.name AS team_name,
           cu.name AS created_by_name,
           au.name AS assigned_to_name
    FROM maintenance_requests r
    JOIN equipment e ON e.id = r.equipment_id
    JOIN equipment_categories c ON c.id = r.category_id
    JOIN maintenance_teams t ON t.id = r.team_id
    JOIN users cu ON cu.id = r.created_by_user_id
    LEFT JOIN users au ON au.id = r.assigned_to_user_id
"#;

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Maintenance request {} not found", id))
}

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a request with reference names
    pub async fn get_details(&self, id: i32) -> AppResult<RequestDetails> {
        let sql = format!("{} WHERE r.id = $1", SELECT_DETAILS);
        sqlx::query_as::<_, RequestDetails>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Get the bare request row
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>("SELECT * FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// List requests matching the filters within the caller's scope, newest first
    pub async fn list(
        &self,
        query: &RequestQuery,
        scope: RequestScope,
    ) -> AppResult<Vec<RequestDetails>> {
        let (technician_id, creator_id) = match scope {
            RequestScope::All => (None, None),
            RequestScope::Technician(id) => (Some(id), None),
            RequestScope::CreatedBy(id) => (None, Some(id)),
        };

        let sql = format!(
            r#"
            {}
            WHERE ($1::text IS NULL OR r.stage = $1)
              AND ($2::text IS NULL OR r.priority = $2)
              AND ($3::int IS NULL OR r.team_id = $3)
              AND ($4::int IS NULL OR r.assigned_to_user_id = $4)
              AND ($5::int IS NULL OR r.equipment_id = $5)
              AND ($6::int IS NULL
                   OR r.assigned_to_user_id = $6
                   OR r.team_id IN (SELECT team_id FROM team_members WHERE user_id = $6))
              AND ($7::int IS NULL OR r.created_by_user_id = $7)
            ORDER BY r.created_at DESC
            "#,
            SELECT_DETAILS
        );

        let rows = sqlx::query_as::<_, RequestDetails>(&sql)
            .bind(query.stage)
            .bind(query.priority)
            .bind(query.team_id)
            .bind(query.assigned_to_user_id)
            .bind(query.equipment_id)
            .bind(technician_id)
            .bind(creator_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Insert a new request, returning its id
    pub async fn create(&self, data: &NewRequest) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO maintenance_requests (
                subject, description, equipment_id, category_id, team_id,
                request_type, priority, stage, created_by_user_id,
                scheduled_date, duration_hours, notes, is_overdue
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(&data.subject)
        .bind(&data.description)
        .bind(data.equipment_id)
        .bind(data.category_id)
        .bind(data.team_id)
        .bind(data.request_type)
        .bind(data.priority)
        .bind(data.stage)
        .bind(data.created_by_user_id)
        .bind(data.scheduled_date)
        .bind(data.duration_hours)
        .bind(&data.notes)
        .bind(data.is_overdue)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Load a request and lock its row until the transaction ends
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>(
            "SELECT * FROM maintenance_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| not_found(id))
    }

    pub async fn apply_stage_change(
        &self,
        conn: &mut PgConnection,
        change: &StageChange,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE maintenance_requests
            SET stage = $2,
                completed_date = $3,
                assigned_to_user_id = $4,
                notes = $5,
                duration_hours = $6,
                is_overdue = $7,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(change.request_id)
        .bind(change.new_stage)
        .bind(change.completed_date)
        .bind(change.assigned_to)
        .bind(&change.notes)
        .bind(change.duration_hours)
        .bind(change.is_overdue)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub async fn apply_assignment(
        &self,
        conn: &mut PgConnection,
        change: &AssignmentChange,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE maintenance_requests
            SET assigned_to_user_id = $2,
                stage = $3,
                is_overdue = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(change.request_id)
        .bind(change.new_assigned_to)
        .bind(change.new_stage)
        .bind(change.is_overdue)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub async fn update_fields(
        &self,
        conn: &mut PgConnection,
        change: &RequestFieldsChange,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE maintenance_requests
            SET subject = $2,
                description = $3,
                request_type = $4,
                priority = $5,
                scheduled_date = $6,
                duration_hours = $7,
                notes = $8,
                is_overdue = $9,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(change.request_id)
        .bind(&change.subject)
        .bind(&change.description)
        .bind(change.request_type)
        .bind(change.priority)
        .bind(change.scheduled_date)
        .bind(change.duration_hours)
        .bind(&change.notes)
        .bind(change.is_overdue)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Write corrected overdue flags found while reading
    pub async fn set_overdue(&self, ids: &[i32], is_overdue: bool) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result =
            sqlx::query("UPDATE maintenance_requests SET is_overdue = $2 WHERE id = ANY($1)")
                .bind(ids)
                .bind(is_overdue)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Counts per stage; overdue is evaluated against the current time
    pub async fn summary(&self) -> AppResult<RequestSummary> {
        let summary = sqlx::query_as::<_, RequestSummary>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE stage = 'new') AS new,
                   COUNT(*) FILTER (WHERE stage = 'in_progress') AS in_progress,
                   COUNT(*) FILTER (WHERE stage = 'repaired') AS repaired,
                   COUNT(*) FILTER (WHERE stage = 'scrapped') AS scrapped,
                   COUNT(*) FILTER (
                       WHERE scheduled_date < NOW() AND stage NOT IN ('repaired', 'scrapped')
                   ) AS overdue,
                   COUNT(*) FILTER (
                       WHERE assigned_to_user_id IS NULL AND stage NOT IN ('repaired', 'scrapped')
                   ) AS unassigned
            FROM maintenance_requests
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }

    /// Delete a request; its history goes with it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
