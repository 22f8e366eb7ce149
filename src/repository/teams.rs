//! Maintenance teams repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::team::{CreateTeam, MaintenanceTeam, TeamMember, UpdateTeam},
};

const DUPLICATE_NAME: &str = "A team with this name already exists";

#[derive(Clone)]
pub struct TeamsRepository {
    pool: Pool<Postgres>,
}

impl TeamsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<MaintenanceTeam>> {
        let rows =
            sqlx::query_as::<_, MaintenanceTeam>("SELECT * FROM maintenance_teams ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceTeam> {
        sqlx::query_as::<_, MaintenanceTeam>("SELECT * FROM maintenance_teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))
    }

    pub async fn create(&self, data: &CreateTeam) -> AppResult<MaintenanceTeam> {
        sqlx::query_as::<_, MaintenanceTeam>(
            "INSERT INTO maintenance_teams (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(data.name.trim())
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::on_unique_violation(e, DUPLICATE_NAME))
    }

    pub async fn update(&self, id: i32, data: &UpdateTeam) -> AppResult<MaintenanceTeam> {
        sqlx::query_as::<_, MaintenanceTeam>(
            r#"
            UPDATE maintenance_teams
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.name.as_deref().map(str::trim))
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::on_unique_violation(e, DUPLICATE_NAME))?
        .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::on_foreign_key_violation(e, "Team still owns equipment or requests")
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }
        Ok(())
    }

    pub async fn members(&self, team_id: i32) -> AppResult<Vec<TeamMember>> {
        let members = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT u.id AS user_id, u.name, u.email, u.role, tm.is_lead, tm.joined_at
            FROM team_members tm
            JOIN users u ON u.id = tm.user_id
            WHERE tm.team_id = $1
            ORDER BY tm.is_lead DESC, u.name
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    pub async fn add_member(&self, team_id: i32, user_id: i32, is_lead: bool) -> AppResult<()> {
        sqlx::query("INSERT INTO team_members (team_id, user_id, is_lead) VALUES ($1, $2, $3)")
            .bind(team_id)
            .bind(user_id)
            .bind(is_lead)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::on_unique_violation(e, "User is already a member of this team")
            })?;
        Ok(())
    }

    pub async fn remove_member(&self, team_id: i32, user_id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND user_id = $2")
            .bind(team_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "User {} is not a member of team {}",
                user_id, team_id
            )));
        }
        Ok(())
    }

    pub async fn is_member(&self, team_id: i32, user_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM team_members WHERE team_id = $1 AND user_id = $2)",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
