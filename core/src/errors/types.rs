//! Field-level validation errors
//!
//! Raised by entity and service checks before anything reaches the store.

use thiserror::Error;

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Out of range: {field} (min: {min}, max: {max})")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Invalid length: {field} (max: {max}, actual: {actual})")]
    InvalidLength {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Inverted range: {min_field} is greater than {max_field}")]
    InvertedRange {
        min_field: String,
        max_field: String,
    },

    #[error("Profile for role {profile} cannot be attached to a {user} user")]
    ProfileRoleMismatch { profile: String, user: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::RequiredField {
            field: field.into(),
        }
    }

    /// Field name the error refers to, when it has one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidLength { field, .. } => Some(field),
            ValidationError::InvertedRange { min_field, .. } => Some(min_field),
            ValidationError::InvalidEmail => Some("email"),
            ValidationError::InvalidUrl => Some("url"),
            ValidationError::ProfileRoleMismatch { .. } => Some("role"),
        }
    }
}
