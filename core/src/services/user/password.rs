//! Password hashing on the blocking thread pool

use tokio::task;

use crate::errors::{DomainError, DomainResult};

/// Hash a plain-text password with bcrypt at the given cost
pub async fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    let password = password.to_owned();
    task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
}

/// Check a plain-text password against a stored bcrypt hash
pub async fn verify_password(password: &str, hash: &str) -> DomainResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::internal(format!("Password check task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("Failed to verify password: {}", e)))
}
