//! User service for registration, account maintenance and role profiles.

use std::sync::Arc;

use kloom_shared::utils::validation::{is_valid_email, normalize_email};

use super::config::UserServiceConfig;
use super::password::hash_password;
use crate::domain::entities::user::{NewUser, Profile, User, UserChanges, UserId, UserRole};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;

/// Registration input carrying the plain-text password
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
}

/// Partial account update; the role cannot be changed
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Service for managing users and their profiles
pub struct UserService<U>
where
    U: UserRepository,
{
    repository: Arc<U>,
    config: UserServiceConfig,
}

impl<U> UserService<U>
where
    U: UserRepository,
{
    /// Create a new user service
    pub fn new(repository: Arc<U>, config: UserServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user
    ///
    /// The email is normalized before the uniqueness check. The profile is
    /// created separately through [`UserService::upsert_profile`].
    pub async fn create_user(&self, input: CreateUser) -> DomainResult<User> {
        let email = checked_email(&input.email)?;
        if input.password.is_empty() {
            return Err(ValidationError::required("password").into());
        }

        if self.repository.exists_by_email(&email).await? {
            tracing::warn!(event = "duplicate_email", "Registration with an existing email");
            return Err(DomainError::conflict("Email already registered"));
        }

        let password_hash = hash_password(&input.password, self.config.bcrypt_cost).await?;
        let new_user = NewUser::new(email, password_hash, input.role)
            .with_name(input.name)
            .with_phone(input.phone);

        let user = self.repository.create(new_user).await?;
        tracing::info!(
            user_id = user.id,
            role = %user.role,
            event = "user_created",
            "Registered new user"
        );
        Ok(user)
    }

    /// Fetch an active user with profile attached
    pub async fn get_user(&self, id: UserId) -> DomainResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    /// Apply a partial update to the caller's own account
    pub async fn update_user(
        &self,
        caller: UserId,
        id: UserId,
        input: UpdateUser,
    ) -> DomainResult<User> {
        ensure_self(caller, id)?;

        let email = input.email.as_deref().map(checked_email).transpose()?;
        let password_hash = match input.password.as_deref() {
            Some("") => return Err(ValidationError::required("password").into()),
            Some(password) => Some(hash_password(password, self.config.bcrypt_cost).await?),
            None => None,
        };

        let changes = UserChanges {
            email,
            password_hash,
            name: input.name,
            phone: input.phone,
        };
        if changes.is_empty() {
            return self.get_user(id).await;
        }

        let user = self
            .repository
            .update(id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        tracing::info!(user_id = user.id, event = "user_updated", "Updated user");
        Ok(user)
    }

    /// Soft-delete the caller's own account
    pub async fn delete_user(&self, caller: UserId, id: UserId) -> DomainResult<()> {
        ensure_self(caller, id)?;

        if !self.repository.soft_delete(id).await? {
            return Err(DomainError::not_found("User"));
        }
        tracing::info!(user_id = id, event = "user_deleted", "Soft-deleted user");
        Ok(())
    }

    /// Create or replace the caller's role profile
    pub async fn upsert_profile(
        &self,
        caller: UserId,
        user_id: UserId,
        profile: Profile,
    ) -> DomainResult<Profile> {
        ensure_self(caller, user_id)?;

        let user = self.get_user(user_id).await?;
        profile.ensure_role(user.role)?;

        let profile = self.repository.save_profile(user_id, profile).await?;
        tracing::info!(
            user_id = user_id,
            role = %profile.role(),
            event = "profile_saved",
            "Saved user profile"
        );
        Ok(profile)
    }

    /// Fetch the profile of an active user
    pub async fn get_profile(&self, user_id: UserId) -> DomainResult<Profile> {
        self.get_user(user_id).await?;
        self.repository
            .find_profile(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Profile"))
    }
}

fn checked_email(raw: &str) -> DomainResult<String> {
    let email = normalize_email(raw);
    if is_valid_email(&email) {
        Ok(email)
    } else {
        Err(ValidationError::InvalidEmail.into())
    }
}

fn ensure_self(caller: UserId, id: UserId) -> DomainResult<()> {
    if caller == id {
        Ok(())
    } else {
        Err(DomainError::unauthorized(
            "Users can only modify their own account",
        ))
    }
}
