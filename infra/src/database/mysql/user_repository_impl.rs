//! MySQL implementation of the UserRepository trait.
//!
//! Users live in the `users` table; each role keeps its profile in a
//! dedicated table keyed by `user_id`.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use kloom_core::domain::entities::{
    AgentProfile, FranchiseProfile, NewUser, OwnerProfile, Profile, RecordState, User,
    UserChanges, UserId, UserRole,
};
use kloom_core::errors::DomainError;
use kloom_core::repositories::UserRepository;

use super::scope::{ActiveScope, USERS};
use super::{column, conflict_or_db_error, db_error, enum_column, inserted_id};

const USER_COLUMNS: &str =
    "u.id, u.email, u.password_hash, u.name, u.phone, u.role, u.is_deleted, u.created_at";

const EMAIL_TAKEN: &str = "Email is already registered";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity, without profile
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            id: column(row, "id")?,
            email: column(row, "email")?,
            password_hash: column(row, "password_hash")?,
            name: column(row, "name")?,
            phone: column(row, "phone")?,
            role: enum_column(row, "role")?,
            state: RecordState::from_deleted_flag(column(row, "is_deleted")?),
            created_at: column(row, "created_at")?,
            profile: None,
        })
    }

    async fn attach_profile(&self, row: Option<MySqlRow>) -> Result<Option<User>, DomainError> {
        let Some(row) = row else {
            return Ok(None);
        };
        let mut user = Self::row_to_user(&row)?;
        user.profile = self.load_profile(user.id, user.role).await?;
        Ok(Some(user))
    }

    /// Read the profile from the table belonging to `role`
    async fn load_profile(
        &self,
        user_id: UserId,
        role: UserRole,
    ) -> Result<Option<Profile>, DomainError> {
        let sql = match role {
            UserRole::Franchise => {
                "SELECT company_name, position, bio FROM franchise_profiles WHERE user_id = ?"
            }
            UserRole::Agent => {
                "SELECT agency_name, license_number, bio FROM agent_profiles WHERE user_id = ?"
            }
            UserRole::Owner => "SELECT interests FROM owner_profiles WHERE user_id = ?",
        };

        let row = sqlx::query(sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load profile"))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let profile = match role {
            UserRole::Franchise => Profile::Franchise(FranchiseProfile {
                company_name: column(&row, "company_name")?,
                position: column(&row, "position")?,
                bio: column(&row, "bio")?,
            }),
            UserRole::Agent => Profile::Agent(AgentProfile {
                agency_name: column(&row, "agency_name")?,
                license_number: column(&row, "license_number")?,
                bio: column(&row, "bio")?,
            }),
            UserRole::Owner => Profile::Owner(OwnerProfile {
                interests: column(&row, "interests")?,
            }),
        };
        Ok(Some(profile))
    }

    async fn active_role(&self, user_id: UserId) -> Result<Option<UserRole>, DomainError> {
        let mut query = USERS.select("u.role");
        query.push(" AND u.id = ").push_bind(user_id);

        let row = query
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find user role"))?;
        row.map(|row| enum_column(&row, "role")).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let mut query = USERS.select(USER_COLUMNS);
        query.push(" AND u.id = ").push_bind(id);

        let row = query
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find user by id"))?;
        self.attach_profile(row).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("check user email"))?;
        Ok(count > 0)
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, name, phone, role, is_deleted)
            VALUES (?, ?, ?, ?, ?, FALSE)
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(conflict_or_db_error("create user", EMAIL_TAKEN))?;

        let id = inserted_id(&result)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::internal("Created user could not be read back"))
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, DomainError> {
        let Some(current) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        if changes.is_empty() {
            return Ok(Some(current));
        }

        let mut query = USERS.update();
        {
            let mut set = query.separated(", ");
            if let Some(email) = changes.email {
                set.push("email = ").push_bind_unseparated(email);
            }
            if let Some(password_hash) = changes.password_hash {
                set.push("password_hash = ")
                    .push_bind_unseparated(password_hash);
            }
            if let Some(name) = changes.name {
                set.push("name = ").push_bind_unseparated(name);
            }
            if let Some(phone) = changes.phone {
                set.push("phone = ").push_bind_unseparated(phone);
            }
        }
        ActiveScope::push_active_id(&mut query, id);

        query
            .build()
            .execute(&self.pool)
            .await
            .map_err(conflict_or_db_error("update user", EMAIL_TAKEN))?;

        self.find_by_id(id).await
    }

    async fn soft_delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = USERS
            .soft_delete(id)
            .build()
            .execute(&self.pool)
            .await
            .map_err(db_error("delete user"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn save_profile(
        &self,
        user_id: UserId,
        profile: Profile,
    ) -> Result<Profile, DomainError> {
        if self.active_role(user_id).await?.is_none() {
            return Err(DomainError::not_found("User"));
        }

        let query = match &profile {
            Profile::Franchise(p) => sqlx::query(
                r#"
                INSERT INTO franchise_profiles (user_id, company_name, position, bio)
                VALUES (?, ?, ?, ?)
                ON DUPLICATE KEY UPDATE
                    company_name = VALUES(company_name),
                    position = VALUES(position),
                    bio = VALUES(bio)
                "#,
            )
            .bind(user_id)
            .bind(&p.company_name)
            .bind(&p.position)
            .bind(&p.bio),
            Profile::Agent(p) => sqlx::query(
                r#"
                INSERT INTO agent_profiles (user_id, agency_name, license_number, bio)
                VALUES (?, ?, ?, ?)
                ON DUPLICATE KEY UPDATE
                    agency_name = VALUES(agency_name),
                    license_number = VALUES(license_number),
                    bio = VALUES(bio)
                "#,
            )
            .bind(user_id)
            .bind(&p.agency_name)
            .bind(&p.license_number)
            .bind(&p.bio),
            Profile::Owner(p) => sqlx::query(
                r#"
                INSERT INTO owner_profiles (user_id, interests)
                VALUES (?, ?)
                ON DUPLICATE KEY UPDATE interests = VALUES(interests)
                "#,
            )
            .bind(user_id)
            .bind(&p.interests),
        };

        query
            .execute(&self.pool)
            .await
            .map_err(db_error("save profile"))?;

        Ok(profile)
    }

    async fn find_profile(&self, user_id: UserId) -> Result<Option<Profile>, DomainError> {
        match self.active_role(user_id).await? {
            Some(role) => self.load_profile(user_id, role).await,
            None => Ok(None),
        }
    }
}
