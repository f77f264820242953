//! User entity representing a registered user of the Kloom platform.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lifecycle::RecordState;
use crate::errors::ValidationError;

/// Store-generated user identifier
pub type UserId = i64;

/// Represents the role of a user in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A franchise looking for locations
    Franchise,
    /// A real-estate agent listing properties
    Agent,
    /// A property owner
    Owner,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Franchise => "franchise",
            UserRole::Agent => "agent",
            UserRole::Owner => "owner",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "franchise" => Ok(UserRole::Franchise),
            "agent" => Ok(UserRole::Agent),
            "owner" => Ok(UserRole::Owner),
            _ => Err(ValidationError::InvalidFormat {
                field: "role".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FranchiseProfile {
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub agency_name: Option<String>,
    pub license_number: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub interests: Option<String>,
}

/// Role-specific profile, tagged by the role it belongs to
///
/// Serialized as `{"role": "agent", "agency_name": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    Franchise(FranchiseProfile),
    Agent(AgentProfile),
    Owner(OwnerProfile),
}

impl Profile {
    /// Role this profile variant belongs to
    pub fn role(&self) -> UserRole {
        match self {
            Profile::Franchise(_) => UserRole::Franchise,
            Profile::Agent(_) => UserRole::Agent,
            Profile::Owner(_) => UserRole::Owner,
        }
    }

    /// Reject a profile whose variant does not match `role`
    pub fn ensure_role(&self, role: UserRole) -> Result<(), ValidationError> {
        if self.role() == role {
            Ok(())
        } else {
            Err(ValidationError::ProfileRoleMismatch {
                profile: self.role().to_string(),
                user: role.to_string(),
            })
        }
    }
}

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier assigned by the store
    pub id: UserId,

    /// Login email, unique across all users including deleted ones
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub name: Option<String>,

    pub phone: Option<String>,

    /// Role chosen at registration, immutable afterwards
    pub role: UserRole,

    pub state: RecordState,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Role-specific profile, when one has been saved
    pub profile: Option<Profile>,
}

impl User {
    /// Checks if the user has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.state.is_deleted()
    }

    /// Checks if the user is an agent
    pub fn is_agent(&self) -> bool {
        self.role == UserRole::Agent
    }

    /// Checks if the user is a franchise
    pub fn is_franchise(&self) -> bool {
        self.role == UserRole::Franchise
    }

    /// Marks the user as deleted
    pub fn mark_deleted(&mut self) {
        self.state = RecordState::Deleted;
    }
}

/// Data for a user that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
}

impl NewUser {
    pub fn new(email: String, password_hash: String, role: UserRole) -> Self {
        Self {
            email,
            password_hash,
            name: None,
            phone: None,
            role,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone;
        self
    }

    /// Materialize the stored entity once the store has assigned an id
    pub fn into_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            name: self.name,
            phone: self.phone,
            role: self.role,
            state: RecordState::Active,
            created_at,
            profile: None,
        }
    }
}

/// Partial update of a user; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password_hash.is_none()
            && self.name.is_none()
            && self.phone.is_none()
    }

    pub fn apply_to(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password_hash) = self.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(name) = self.name {
            user.name = Some(name);
        }
        if let Some(phone) = self.phone {
            user.phone = Some(phone);
        }
    }
}
