//! Equipment repository

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, EquipmentDetails, EquipmentQuery, EquipmentStatus, UpdateEquipment,
    },
};

const DUPLICATE_SERIAL: &str = "Equipment with this serial number already exists";

const SELECT_DETAILS: &str = r#"
    SELECT e.*,
           c.name AS category_name,
           d.name AS department_name,
           t.name AS team_name,
           au.name AS assigned_to_name,
           dt.name AS default_technician_name
    FROM equipment e
    JOIN equipment_categories c ON c.id = e.category_id
    LEFT JOIN departments d ON d.id = e.department_id
    JOIN maintenance_teams t ON t.id = e.team_id
    LEFT JOIN users au ON au.id = e.assigned_to_user_id
    LEFT JOIN users dt ON dt.id = e.default_technician_id
"#;

fn write_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => AppError::Validation(
            "Equipment references an unknown category, department, team or user".to_string(),
        ),
        _ => AppError::on_unique_violation(err, DUPLICATE_SERIAL),
    }
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment matching the filters
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentDetails>> {
        let sql = format!(
            r#"
            {}
            WHERE ($1::int IS NULL OR e.department_id = $1)
              AND ($2::int IS NULL OR e.category_id = $2)
              AND ($3::int IS NULL OR e.team_id = $3)
              AND ($4::text IS NULL OR e.status = $4)
            ORDER BY e.name
            "#,
            SELECT_DETAILS
        );
        let rows = sqlx::query_as::<_, EquipmentDetails>(&sql)
            .bind(query.department_id)
            .bind(query.category_id)
            .bind(query.team_id)
            .bind(query.status)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentDetails> {
        let sql = format!("{} WHERE e.id = $1", SELECT_DETAILS);
        sqlx::query_as::<_, EquipmentDetails>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipment WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO equipment (
                name, serial_number, category_id, department_id, assigned_to_user_id,
                team_id, default_technician_id, purchase_date, warranty_expiry, location, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(data.name.trim())
        .bind(data.serial_number.trim())
        .bind(data.category_id)
        .bind(data.department_id)
        .bind(data.assigned_to_user_id)
        .bind(data.team_id)
        .bind(data.default_technician_id)
        .bind(data.purchase_date)
        .bind(data.warranty_expiry)
        .bind(&data.location)
        .bind(data.status.unwrap_or(EquipmentStatus::Active))
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)
    }

    /// Update equipment; only the fields present in `data` are written
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<()> {
        // $1 is the id, field placeholders follow in order
        let mut sets = vec!["updated_at = NOW()".to_string()];

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, sets.len() + 1));
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.serial_number, "serial_number");
        add_field!(data.category_id, "category_id");
        add_field!(data.department_id, "department_id");
        add_field!(data.assigned_to_user_id, "assigned_to_user_id");
        add_field!(data.team_id, "team_id");
        add_field!(data.default_technician_id, "default_technician_id");
        add_field!(data.purchase_date, "purchase_date");
        add_field!(data.warranty_expiry, "warranty_expiry");
        add_field!(data.location, "location");
        add_field!(data.status, "status");

        let query = format!("UPDATE equipment SET {} WHERE id = $1", sets.join(", "));

        let mut builder = sqlx::query(&query).bind(id);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.serial_number);
        bind_field!(data.category_id);
        bind_field!(data.department_id);
        bind_field!(data.assigned_to_user_id);
        bind_field!(data.team_id);
        bind_field!(data.default_technician_id);
        bind_field!(data.purchase_date);
        bind_field!(data.warranty_expiry);
        bind_field!(data.location);
        bind_field!(data.status);

        let result = builder
            .execute(&self.pool)
            .await
            .map_err(write_error)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// Lock the equipment row until the transaction ends. New requests
    /// referencing it wait for the lock.
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT id FROM equipment WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;
        Ok(())
    }

    /// Requests on this equipment that are not yet repaired or scrapped
    pub async fn count_open_requests(&self, conn: &mut PgConnection, id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM maintenance_requests
            WHERE equipment_id = $1 AND stage NOT IN ('repaired', 'scrapped')
            "#,
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(count)
    }

    /// Remove the repaired and scrapped requests of this equipment, with their history
    pub async fn delete_closed_requests(&self, conn: &mut PgConnection, id: i32) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM maintenance_requests
            WHERE equipment_id = $1 AND stage IN ('repaired', 'scrapped')
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete equipment. Any request still referencing it blocks the delete.
    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::on_foreign_key_violation(
                    e,
                    "Equipment still has maintenance requests and cannot be deleted",
                )
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }
}
