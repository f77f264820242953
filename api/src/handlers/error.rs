//! Mapping of domain and request-parsing failures to HTTP responses
//!
//! | Failure | Status |
//! |---|---|
//! | `NotFound` | 404 |
//! | `Conflict` | 409 |
//! | `Unauthorized` (ownership, role) | 403 |
//! | `Validation` / `ValidationErr`, malformed body/query/path | 400 |
//! | `Database` / `Internal` | 500 |
//!
//! Missing or invalid bearer tokens never reach this module; the JWT
//! middleware answers them with 401.

use actix_web::{
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    Error, HttpRequest, HttpResponse,
};
use kloom_core::errors::DomainError;
use kloom_shared::errors::{error_codes, ErrorResponse};
use validator::{ValidationErrors, ValidationErrorsKind};

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, body) = match &error {
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource)),
        ),
        DomainError::Conflict { message } => (
            StatusCode::CONFLICT,
            ErrorResponse::new(error_codes::CONFLICT, message.clone()),
        ),
        DomainError::Unauthorized { message } => (
            StatusCode::FORBIDDEN,
            ErrorResponse::new(error_codes::FORBIDDEN, message.clone()),
        ),
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
        ),
        DomainError::ValidationErr(validation) => {
            let mut body =
                ErrorResponse::new(error_codes::VALIDATION_ERROR, validation.to_string());
            if let Some(field) = validation.field() {
                body = body.add_detail("field", field);
            }
            (StatusCode::BAD_REQUEST, body)
        }
        DomainError::Database { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(error_codes::DATABASE_ERROR, "A database error occurred"),
        ),
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred"),
        ),
    };

    if status.is_server_error() {
        log::error!("Domain Error: {:?}", error);
    } else {
        log::debug!("Domain Error: {:?}", error);
    }

    HttpResponse::build(status).json(body)
}

/// 400 listing the failing fields of a DTO
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.add_detail(field.to_string(), messages);
    }
    // nested DTOs (preference lists) report only the offending field
    for (field, kind) in errors.errors() {
        if !matches!(kind, ValidationErrorsKind::Field(_)) {
            body = body.add_detail(field.to_string(), vec!["invalid"]);
        }
    }

    log::debug!("Request validation failed: {:?}", body.details);
    HttpResponse::BadRequest().json(body)
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message))
}

/// Error handler for `web::JsonConfig`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let response = bad_request(format!("Invalid JSON body: {}", err));
    InternalError::from_response(err, response).into()
}

/// Error handler for `web::QueryConfig`
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let response = bad_request(format!("Invalid query string: {}", err));
    InternalError::from_response(err, response).into()
}

/// Error handler for `web::PathConfig`
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> Error {
    let response = bad_request(format!("Invalid path parameter: {}", err));
    InternalError::from_response(err, response).into()
}
