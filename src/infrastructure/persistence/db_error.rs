//! sqlx error classification.

use crate::domain::repositories::RepositoryError;

/// Name of the primary key constraint on `short_urls.code`.
pub const CODE_CONSTRAINT: &str = "short_urls_pkey";

pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(CODE_CONSTRAINT))
}

pub fn storage_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation_on_code(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation_on_code(&sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn test_storage_error_keeps_reason() {
        let err = storage_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Storage(ref reason) if !reason.is_empty()));
    }
}
