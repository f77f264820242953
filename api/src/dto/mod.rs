//! Request and response bodies of the HTTP API
//!
//! Request DTOs derive `Validate`; handlers reject invalid input with 400
//! before calling a service. Response DTOs expose the soft-delete state as
//! `is_deleted`.

pub mod property;
pub mod property_request;
pub mod user;

pub use property::*;
pub use property_request::*;
pub use user::*;

use kloom_shared::types::DEFAULT_LIMIT;

pub(crate) fn default_limit() -> u64 {
    DEFAULT_LIMIT
}
