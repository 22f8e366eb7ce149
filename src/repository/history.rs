//! Request history (audit trail) repository. Append and read only.

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::AppResult,
    models::history::{HistoryEntry, NewHistoryEntry},
};

#[derive(Clone)]
pub struct HistoryRepository {
    pool: Pool<Postgres>,
}

impl HistoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append an audit row inside the caller's transaction
    pub async fn append(&self, conn: &mut PgConnection, entry: &NewHistoryEntry) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO request_history (
                request_id, changed_by_user_id, field_name,
                old_assigned_to, new_assigned_to, old_stage, new_stage, note
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(entry.request_id)
        .bind(entry.changed_by_user_id)
        .bind(&entry.field_name)
        .bind(entry.old_assigned_to)
        .bind(entry.new_assigned_to)
        .bind(entry.old_stage)
        .bind(entry.new_stage)
        .bind(&entry.note)
        .fetch_one(&mut *conn)
        .await?;
        Ok(id)
    }

    /// History of one request, newest first
    pub async fn list_for_request(&self, request_id: i32) -> AppResult<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT h.id, h.request_id, h.changed_by_user_id,
                   u.name AS changed_by_name,
                   h.field_name,
                   h.old_assigned_to, ou.name AS old_assigned_to_name,
                   h.new_assigned_to, nu.name AS new_assigned_to_name,
                   h.old_stage, h.new_stage, h.note, h.changed_at
            FROM request_history h
            JOIN users u ON u.id = h.changed_by_user_id
            LEFT JOIN users ou ON ou.id = h.old_assigned_to
            LEFT JOIN users nu ON nu.id = h.new_assigned_to
            WHERE h.request_id = $1
            ORDER BY h.changed_at DESC, h.id DESC
            "#,
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
