//! Configuration for the user service

/// Configuration for the user service
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// bcrypt work factor used when hashing passwords
    pub bcrypt_cost: u32,
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl UserServiceConfig {
    pub fn with_bcrypt_cost(bcrypt_cost: u32) -> Self {
        Self { bcrypt_cost }
    }
}
