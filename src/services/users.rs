//! User management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{normalize_email, Role, UpdateProfile, User, UserClaims, UserShort},
    policy::{Action, ResourceContext},
    repository::Repository,
};

use super::auth::hash_password;

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, role: Option<Role>) -> AppResult<Vec<UserShort>> {
        self.repository.users.list(role).await
    }

    /// Get a user; technicians and users may only read their own record
    pub async fn get(&self, claims: &UserClaims, id: i32) -> AppResult<User> {
        claims.authorize(Action::ViewUser, ResourceContext::owned_by(id))?;
        self.repository.users.get_by_id(id).await
    }

    pub async fn update_profile(
        &self,
        claims: &UserClaims,
        data: UpdateProfile,
    ) -> AppResult<User> {
        data.validate()?;

        let name = data.name.as_deref().map(str::trim);
        if name == Some("") {
            return Err(AppError::Validation("Name cannot be empty".to_string()));
        }
        let email = data.email.as_deref().map(normalize_email);
        let password_hash = match data.password {
            Some(ref password) => Some(hash_password(password)?),
            None => None,
        };

        self.repository
            .users
            .update_profile(claims.user_id, name, email.as_deref(), password_hash.as_deref())
            .await
    }

    pub async fn update_role(&self, claims: &UserClaims, id: i32, role: Role) -> AppResult<User> {
        let user = self.repository.users.update_role(id, role).await?;
        tracing::info!(
            user_id = id,
            role = %role,
            changed_by = claims.user_id,
            "user role changed"
        );
        Ok(user)
    }

    /// Delete a user account.
    ///
    /// Deleting one's own account is refused whatever the role, before the
    /// role check runs.
    pub async fn delete(&self, claims: &UserClaims, id: i32) -> AppResult<()> {
        if claims.user_id == id {
            return Err(AppError::SelfDeletion);
        }
        claims.require(Action::DeleteUser)?;

        self.repository.users.get_by_id(id).await?;
        if self.repository.users.has_owned_records(id).await? {
            return Err(AppError::Validation(
                "User still owns maintenance requests or equipment and cannot be deleted".to_string(),
            ));
        }

        self.repository.users.delete(id).await?;
        tracing::info!(user_id = id, deleted_by = claims.user_id, "user deleted");
        Ok(())
    }
}
