//! Kloom HTTP API
//!
//! actix-web routes over the core services, request DTOs, the JWT identity
//! middleware and the mapping of domain errors to HTTP responses. The binary
//! in `main.rs` wires these to the MySQL repositories; the integration tests
//! wire them to the in-memory ones.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{configure, AppState};
