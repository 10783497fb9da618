//! SQLite repository implementations

mod session_repository_impl;
mod user_repository_impl;

pub use session_repository_impl::SqliteSessionRepository;
pub use user_repository_impl::SqliteUserRepository;

use ta_core::errors::DomainError;

/// Unique violations become `AlreadyExists`; everything else is a persistence failure
pub(crate) fn map_write_error(resource: &str, e: sqlx::Error) -> DomainError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::AlreadyExists {
            resource: resource.to_string(),
        },
        _ => DomainError::persistence(format!("Failed to write {}: {}", resource, e)),
    }
}
