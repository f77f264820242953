//! User service module: registration, account updates and profiles.

mod config;
mod password;
mod service;

pub use config::UserServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::{CreateUser, UpdateUser, UserService};
