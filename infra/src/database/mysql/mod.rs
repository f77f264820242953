//! MySQL implementations of the core repository traits

mod property_repository_impl;
mod property_request_repository_impl;
mod scope;
mod user_repository_impl;

pub use property_repository_impl::MySqlPropertyRepository;
pub use property_request_repository_impl::MySqlPropertyRequestRepository;
pub use user_repository_impl::MySqlUserRepository;

use std::str::FromStr;

use kloom_core::errors::DomainError;
use sqlx::mysql::{MySqlQueryResult, MySqlRow};
use sqlx::{MySql, Row};

/// Map a sqlx failure to a domain database error, logging the cause
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(error = %e, context, "Database operation failed");
        DomainError::database(format!("Failed to {}: {}", context, e))
    }
}

/// Like [`db_error`], but a unique-key violation becomes a conflict
pub(crate) fn conflict_or_db_error(
    context: &'static str,
    conflict: &'static str,
) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            tracing::warn!(context, "Unique constraint violated");
            DomainError::conflict(conflict)
        }
        _ => db_error(context)(e),
    }
}

/// Read one column, reporting the column name on failure
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

/// Read a VARCHAR column holding an enum's wire name
pub(crate) fn enum_column<T>(row: &MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: FromStr,
{
    let raw: String = column(row, name)?;
    raw.parse()
        .map_err(|_| DomainError::database(format!("Unexpected {} value: {}", name, raw)))
}

/// Identifier generated by the last INSERT
pub(crate) fn inserted_id(result: &MySqlQueryResult) -> Result<i64, DomainError> {
    i64::try_from(result.last_insert_id())
        .map_err(|_| DomainError::database("Generated id out of range"))
}
