//! In-memory implementation of UserRepository for tests and local wiring

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, Profile, User, UserChanges, UserId};
use crate::errors::DomainError;

use super::trait_::UserRepository;

#[derive(Default)]
struct Store {
    users: BTreeMap<UserId, User>,
    profiles: HashMap<UserId, Profile>,
    next_id: UserId,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn active(&self, id: UserId) -> Option<User> {
        self.users
            .get(&id)
            .filter(|u| !u.is_deleted())
            .cloned()
            .map(|mut user| {
                user.profile = self.profiles.get(&id).cloned();
                user
            })
    }
}

/// Mock user repository for testing
#[derive(Clone)]
pub struct MockUserRepository {
    store: Arc<RwLock<Store>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                next_id: 1,
                ..Default::default()
            })),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.active(id))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let store = self.store.read().await;
        Ok(store.email_taken(email, None))
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut store = self.store.write().await;

        if store.email_taken(&user.email, None) {
            return Err(DomainError::conflict("Email already registered"));
        }

        let id = store.next_id;
        store.next_id += 1;
        let user = user.into_user(id, Utc::now());
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, DomainError> {
        let mut store = self.store.write().await;

        if let Some(email) = &changes.email {
            if store.email_taken(email, Some(id)) {
                return Err(DomainError::conflict("Email already registered"));
            }
        }

        match store.users.get_mut(&id) {
            Some(user) if !user.is_deleted() => changes.apply_to(user),
            _ => return Ok(None),
        }
        Ok(store.active(id))
    }

    async fn soft_delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        match store.users.get_mut(&id) {
            Some(user) if !user.is_deleted() => {
                user.mark_deleted();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn save_profile(
        &self,
        user_id: UserId,
        profile: Profile,
    ) -> Result<Profile, DomainError> {
        let mut store = self.store.write().await;
        if store.active(user_id).is_none() {
            return Err(DomainError::not_found("User"));
        }
        store.profiles.insert(user_id, profile.clone());
        Ok(profile)
    }

    async fn find_profile(&self, user_id: UserId) -> Result<Option<Profile>, DomainError> {
        let store = self.store.read().await;
        Ok(store.active(user_id).and_then(|user| user.profile))
    }
}
