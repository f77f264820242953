//! HTTP handlers grouped by resource
//!
//! Handlers are generic over the repository implementations so the binary
//! can run them over MySQL and the tests over the in-memory mocks. Each one
//! validates its DTO, calls a service and wraps the result in
//! [`ApiResponse`](kloom_shared::types::ApiResponse).

pub mod properties;
pub mod property_requests;
pub mod users;

use actix_web::HttpResponse;
use validator::Validate;

use crate::handlers::error::validation_error_response;

/// Run DTO validation, producing the 400 response on failure
pub(crate) fn validate_body<T: Validate>(body: &T) -> Result<(), HttpResponse> {
    body.validate()
        .map_err(|errors| validation_error_response(&errors))
}
