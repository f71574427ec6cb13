use crate::database::DatabaseError;
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error;

/// Coarse error category surfaced to callers of the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    Internal,
}

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database errors
    #[error("SQL error: {0}")]
    Sqlx(#[from] SqlxError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Business logic errors
    #[error("Business logic error: {0}")]
    BusinessLogic(String),

    /// A store failed to produce a record it should have
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Validation(_) | AppError::BusinessLogic(_) => ErrorKind::BadRequest,
            AppError::Database(_)
            | AppError::Sqlx(_)
            | AppError::Config(_)
            | AppError::Internal(_)
            | AppError::Serialization(_) => ErrorKind::Internal,
        }
    }

    /// Check if error is a database connection error
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            AppError::Database(DatabaseError::Connect(_))
                | AppError::Database(DatabaseError::ConnectionTimeout)
        )
    }

    /// Get HTTP status code for the error
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::NotFound => 404,
            ErrorKind::BadRequest => 400,
            ErrorKind::Internal => 500,
        }
    }
}

/// Repository-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database query error
    #[error("Query error: {0}")]
    Query(SqlxError),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Duplicate record
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Result type for store operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => AppError::NotFound(msg),
            RepositoryError::Query(e) => AppError::Sqlx(e),
            RepositoryError::Duplicate(msg) => {
                AppError::BusinessLogic(format!("Duplicate: {}", msg))
            }
            RepositoryError::ConstraintViolation(msg) => AppError::Validation(msg),
        }
    }
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match &err {
            SqlxError::RowNotFound => RepositoryError::NotFound("Record not found".to_string()),
            SqlxError::Database(db_err) => {
                // PostgreSQL error codes
                match db_err.code().as_deref() {
                    Some("23505") => RepositoryError::Duplicate(db_err.message().to_string()),
                    Some("23503") | Some("23514") => {
                        RepositoryError::ConstraintViolation(db_err.message().to_string())
                    }
                    _ => RepositoryError::Query(err),
                }
            }
            _ => RepositoryError::Query(err),
        }
    }
}

/// Convert Option<T> to Result<T, AppError>, treating None as not found
pub fn option_to_result<T>(opt: Option<T>, error_msg: &str) -> AppResult<T> {
    opt.ok_or_else(|| AppError::NotFound(error_msg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AppError::NotFound("Game not found".into()).kind(), ErrorKind::NotFound);
        assert_eq!(AppError::Validation("bad".into()).kind(), ErrorKind::BadRequest);
        assert_eq!(AppError::BusinessLogic("finished".into()).kind(), ErrorKind::BadRequest);
        assert_eq!(AppError::Internal("Game not created".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound("x".into()).status_code(), 404);
        assert_eq!(AppError::Validation("x".into()).status_code(), 400);
        assert_eq!(AppError::Sqlx(SqlxError::PoolClosed).status_code(), 500);
    }

    #[test]
    fn test_repository_error_conversion() {
        let err: AppError = RepositoryError::ConstraintViolation("amount_bet".into()).into();
        assert_eq!(err.kind(), ErrorKind::BadRequest);

        let err: RepositoryError = SqlxError::RowNotFound.into();
        assert!(matches!(err, RepositoryError::NotFound(_)));

        let err: AppError = RepositoryError::from(SqlxError::PoolTimedOut).into();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_option_to_result() {
        let err = option_to_result::<i64>(None, "Game not found").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(option_to_result(Some(7), "unused").unwrap(), 7);
    }

    #[test]
    fn test_connection_error_detection() {
        let err = AppError::Database(DatabaseError::ConnectionTimeout);
        assert!(err.is_connection_error());
        assert!(!AppError::Validation("x".into()).is_connection_error());
    }
}
