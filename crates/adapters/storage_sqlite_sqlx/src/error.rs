//! Storage-specific error type wrapping sqlx errors.

use leavehub_domain::error::LeaveHubError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for LeaveHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_wrap_into_storage_variant_with_source() {
        let err: LeaveHubError = StorageError::Database(sqlx::Error::RowNotFound).into();

        assert!(matches!(err, LeaveHubError::Storage(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
