//! User repository trait defining the interface for user data persistence.
//!
//! This module defines the repository pattern interface for User entities
//! and their role-specific profiles. The trait is async-first and uses
//! Result types for proper error handling.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, Profile, User, UserChanges, UserId};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Every read excludes soft-deleted users. Implementations attach the
/// stored profile to the users they return.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use kloom_core::repositories::UserRepository;
/// use kloom_core::domain::entities::user::{NewUser, Profile, User, UserChanges, UserId};
/// use kloom_core::errors::DomainError;
///
/// struct PostgresUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for PostgresUserRepository {
///     async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn exists_by_email(&self, _: &str) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn create(&self, _: NewUser) -> Result<User, DomainError> { unimplemented!() }
/// #   async fn update(&self, _: UserId, _: UserChanges) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn soft_delete(&self, _: UserId) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn save_profile(&self, _: UserId, p: Profile) -> Result<Profile, DomainError> { Ok(p) }
/// #   async fn find_profile(&self, _: UserId) -> Result<Option<Profile>, DomainError> { Ok(None) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an active user by identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found, with profile attached when one exists
    /// * `Ok(None)` - No user with that id, or the user is soft-deleted
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Check whether any user, deleted or not, holds the email
    ///
    /// Emails stay reserved after soft deletion because the unique key
    /// covers every row.
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user with its generated id
    /// * `Err(DomainError::Conflict)` - The email is already registered
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Apply a partial update to an active user
    ///
    /// # Returns
    /// * `Ok(Some(User))` - The user after the update
    /// * `Ok(None)` - No active user with that id
    /// * `Err(DomainError::Conflict)` - The new email is already registered
    async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, DomainError>;

    /// Mark an active user as deleted
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found or already deleted
    async fn soft_delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// Create or replace the user's profile
    ///
    /// The caller is responsible for checking the variant against the
    /// user's role.
    async fn save_profile(&self, user_id: UserId, profile: Profile)
        -> Result<Profile, DomainError>;

    /// Load the profile of an active user
    async fn find_profile(&self, user_id: UserId) -> Result<Option<Profile>, DomainError>;
}
