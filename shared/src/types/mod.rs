//! Type definitions module
//!
//! - `pagination` - Offset pagination for list endpoints
//! - `response` - API response envelope

pub mod pagination;
pub mod response;

pub use pagination::{Page, PageRequest, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
pub use response::ApiResponse;
