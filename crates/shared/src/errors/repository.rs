use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        if let SqlxError::RowNotFound = err {
            return RepositoryError::NotFound;
        }

        if let SqlxError::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();

            if db_err.is_unique_violation() {
                return RepositoryError::AlreadyExists(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return RepositoryError::ForeignKey(constraint);
            }
            if db_err.is_check_violation() {
                return RepositoryError::Conflict(constraint);
            }
        }

        RepositoryError::Sqlx(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = RepositoryError::from(SqlxError::RowNotFound);
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn pool_errors_stay_opaque() {
        let err = RepositoryError::from(SqlxError::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Sqlx(_)));
    }
}
