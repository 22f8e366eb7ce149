//! Maintenance teams service

use validator::Validate;

use crate::{
    error::AppResult,
    models::team::{AddTeamMember, CreateTeam, MaintenanceTeam, TeamDetails, TeamMember, UpdateTeam},
    repository::Repository,
};

#[derive(Clone)]
pub struct TeamsService {
    repository: Repository,
}

impl TeamsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<MaintenanceTeam>> {
        self.repository.teams.list().await
    }

    /// Get a team with its members
    pub async fn get(&self, id: i32) -> AppResult<TeamDetails> {
        let team = self.repository.teams.get_by_id(id).await?;
        let members = self.repository.teams.members(id).await?;
        Ok(TeamDetails { team, members })
    }

    pub async fn create(&self, data: &CreateTeam) -> AppResult<MaintenanceTeam> {
        data.validate()?;
        self.repository.teams.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateTeam) -> AppResult<MaintenanceTeam> {
        data.validate()?;
        self.repository.teams.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.teams.delete(id).await?;
        tracing::info!(team_id = id, "team deleted");
        Ok(())
    }

    pub async fn add_member(
        &self,
        team_id: i32,
        data: &AddTeamMember,
    ) -> AppResult<Vec<TeamMember>> {
        self.repository.teams.get_by_id(team_id).await?;
        self.repository.users.get_by_id(data.user_id).await?;
        self.repository
            .teams
            .add_member(team_id, data.user_id, data.is_lead)
            .await?;
        self.repository.teams.members(team_id).await
    }

    pub async fn remove_member(&self, team_id: i32, user_id: i32) -> AppResult<Vec<TeamMember>> {
        self.repository.teams.remove_member(team_id, user_id).await?;
        self.repository.teams.members(team_id).await
    }
}
