//! Authentication service: registration, login and token issuance

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{normalize_email, AuthProvider, RegisterUser, Role, User, UserClaims},
    repository::Repository,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash. Accounts without a hash never match.
pub fn verify_password(user: &User, password: &str) -> AppResult<bool> {
    let Some(ref hash) = user.password_hash else {
        return Ok(false);
    };
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Create a local account with the `user` role
    pub async fn register(&self, data: RegisterUser) -> AppResult<User> {
        data.validate()?;
        let name = data.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }

        let email = normalize_email(&data.email);
        let password_hash = hash_password(&data.password)?;
        let user = self
            .repository
            .users
            .create(name, &email, Some(&password_hash), AuthProvider::Local, Role::User)
            .await?;

        tracing::info!(user_id = user.id, "registered new user");
        Ok(user)
    }

    /// Verify credentials and return a signed token
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if user.auth_provider != AuthProvider::Local || !verify_password(&user, password)? {
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Check decoded token claims against the stored account, so a role change
    /// or a deletion applies to tokens already handed out
    pub async fn authenticate(&self, claims: UserClaims) -> AppResult<UserClaims> {
        let stored_role = self.repository.users.role_of(claims.user_id).await?;
        claims.refresh(stored_role)
    }

    pub async fn me(&self, claims: &UserClaims) -> AppResult<User> {
        self.repository.users.get_by_id(claims.user_id).await
    }

    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
            iat: now,
        };
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Create the configured admin account when no admin exists yet
    pub async fn ensure_admin(&self) -> AppResult<()> {
        let (Some(email), Some(password)) =
            (&self.config.admin_email, &self.config.admin_password)
        else {
            return Ok(());
        };
        if self.repository.users.admin_exists().await? {
            return Ok(());
        }

        let name = self.config.admin_name.as_deref().unwrap_or("Administrator");
        let password_hash = hash_password(password)?;
        let admin = self
            .repository
            .users
            .create(
                name,
                &normalize_email(email),
                Some(&password_hash),
                AuthProvider::Local,
                Role::Admin,
            )
            .await?;

        tracing::info!(user_id = admin.id, "created initial admin account");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_hash(password_hash: Option<String>) -> User {
        let now = Utc::now();
        User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash,
            auth_provider: AuthProvider::Local,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret!").unwrap();
        let user = user_with_hash(Some(hash));
        assert!(verify_password(&user, "s3cret!").unwrap());
        assert!(!verify_password(&user, "wrong").unwrap());
    }

    #[test]
    fn test_account_without_hash_never_matches() {
        let user = user_with_hash(None);
        assert!(!verify_password(&user, "").unwrap());
    }
}
