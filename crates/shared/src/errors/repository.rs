use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl RepositoryError {
    /// Maps a unique-constraint violation to `AlreadyExists`, anything else
    /// stays a plain database error.
    pub fn from_sqlx_unique(err: SqlxError, conflict_msg: impl Into<String>) -> Self {
        if let SqlxError::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return RepositoryError::AlreadyExists(conflict_msg.into());
            }
        }
        RepositoryError::Sqlx(err)
    }
}
