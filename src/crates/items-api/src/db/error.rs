//! Database error types and handling
//!
//! Classifies `sqlx` failures so callers can tell an unreachable store apart
//! from a failing statement.

use thiserror::Error;

/// Custom database error type
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The store could not be reached (I/O, TLS, bad connection options)
    #[error("Database connection failed: {0}")]
    ConnectionError(String),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Data type mismatch or conversion error
    #[error("Data type error: {0}")]
    TypeError(String),

    /// Query execution error reported by the store
    #[error("Query error: {0}")]
    QueryError(String),

    /// Row mapping error
    #[error("Row mapping error: {0}")]
    RowMappingError(String),

    /// Pool error
    #[error("Connection pool error: {0}")]
    PoolError(String),

    /// Unsupported connection string
    #[error("Unsupported database URL: {0}")]
    UnsupportedUrl(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Other(String),
}

impl DatabaseError {
    /// Create a new NotFound error with context
    pub fn not_found(context: impl Into<String>) -> Self {
        DatabaseError::NotFound(context.into())
    }

    /// Create a new QueryError error
    pub fn query_error(msg: impl Into<String>) -> Self {
        DatabaseError::QueryError(msg.into())
    }

    /// Whether the failure means the store is (currently) unreachable
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionError(_) | DatabaseError::PoolError(_)
        )
    }
}

/// Result type for database operations
pub type DbResult<T> = std::result::Result<T, DatabaseError>;

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => {
                DatabaseError::NotFound("No matching row found in database".to_string())
            }
            sqlx::Error::ColumnNotFound(col) => {
                DatabaseError::RowMappingError(format!("Column not found: {}", col))
            }
            sqlx::Error::ColumnIndexOutOfBounds { index, len } => {
                DatabaseError::RowMappingError(format!(
                    "Column index out of bounds: {} >= {}",
                    index, len
                ))
            }
            sqlx::Error::ColumnDecode { index, source } => {
                DatabaseError::TypeError(format!("Error decoding column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => {
                DatabaseError::TypeError(format!("Decode error: {}", source))
            }
            sqlx::Error::Configuration(msg) => {
                DatabaseError::ConnectionError(format!("Configuration error: {}", msg))
            }
            sqlx::Error::Io(err) => DatabaseError::ConnectionError(format!("IO error: {}", err)),
            sqlx::Error::Tls(err) => DatabaseError::ConnectionError(format!("TLS error: {}", err)),
            sqlx::Error::PoolTimedOut => {
                DatabaseError::PoolError("Connection pool timed out".to_string())
            }
            sqlx::Error::PoolClosed => {
                DatabaseError::PoolError("Connection pool is closed".to_string())
            }
            sqlx::Error::Database(db_err) => DatabaseError::QueryError(db_err.to_string()),
            err => DatabaseError::Other(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = DatabaseError::not_found("item id=123");
        assert!(matches!(err, DatabaseError::NotFound(_)));
        assert!(!err.is_connectivity());
    }

    #[test]
    fn test_error_display() {
        let err = DatabaseError::not_found("record");
        let msg = format!("{}", err);
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_sqlx_row_not_found_conversion() {
        let db_err: DatabaseError = sqlx::Error::RowNotFound.into();
        assert!(matches!(db_err, DatabaseError::NotFound(_)));
    }

    #[test]
    fn test_pool_timeout_is_connectivity() {
        let db_err: DatabaseError = sqlx::Error::PoolTimedOut.into();
        assert!(db_err.is_connectivity());
    }

    #[test]
    fn test_io_error_is_connectivity() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let db_err: DatabaseError = sqlx::Error::Io(io).into();
        assert!(db_err.is_connectivity());
        assert!(db_err.to_string().contains("refused"));
    }
}
