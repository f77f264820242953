//! Configuration module with concern-specific sub-modules
//!
//! - `auth` - JWT verification and password hashing settings
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//!
//! Every struct implements `Default` and `from_env()`. The API binary layers
//! an optional configuration file on top of these (see `kloom_api::config`).

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};
