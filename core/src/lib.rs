//! # Kloom Core
//!
//! Core business logic and domain layer for the Kloom backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Profile, Property, PropertyDetail, PropertyRequest, PropertyStatus, RequestStatus, User,
    UserId, UserRole,
};
pub use errors::{DomainError, ValidationError};
pub use repositories::{PropertyRepository, PropertyRequestRepository, UserRepository};
pub use services::{PropertyRequestService, PropertyService, UserService, UserServiceConfig};
