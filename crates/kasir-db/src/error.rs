//! # Database Error Types
//!
//! Error types for database operations and for the checkout unit of work.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       │      CoreError (kasir-core) ← stock / pricing rejections       │
//! │       │          │                                                      │
//! │       ▼          ▼                                                      │
//! │  CheckoutError { Rejected | Storage }                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (apps/api) ← { code, message } + HTTP status                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kasir_core::CoreError;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `fetch_one` returns no rows
    /// - UPDATE / DELETE by id affected zero rows
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Deleting a product that appears in transaction details
    /// - Referencing a category or product that doesn't exist
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK or NOT NULL constraint violation.
    ///
    /// ## When This Occurs
    /// - A write would make `stock` or `price` negative
    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    /// The database stayed locked longer than the busy timeout.
    #[error("Database is busy: {0}")]
    Busy(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Pool already closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Begin or commit of a transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Wraps a failure to begin or commit a transaction.
    ///
    /// Lock contention keeps its `Busy` classification.
    pub fn transaction(err: sqlx::Error) -> Self {
        match DbError::from(err) {
            busy @ DbError::Busy(_) => busy,
            other => DbError::TransactionFailed(other.to_string()),
        }
    }
}

/// SQLite primary result code for SQLITE_BUSY. Extended codes keep it in the
/// low byte.
const SQLITE_BUSY: i32 = 5;

fn is_busy(code: Option<&str>, message: &str) -> bool {
    let by_code = code
        .and_then(|c| c.parse::<i32>().ok())
        .map(|c| c & 0xff == SQLITE_BUSY)
        .unwrap_or(false);
    by_code || message.contains("database is locked")
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → by constraint kind / SQLITE_BUSY
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();

                match db_err.kind() {
                    // "UNIQUE constraint failed: <table>.<column>"
                    ErrorKind::UniqueViolation => {
                        let field = msg
                            .split("UNIQUE constraint failed: ")
                            .nth(1)
                            .unwrap_or("unknown")
                            .to_string();
                        DbError::UniqueViolation {
                            field,
                            value: "unknown".to_string(),
                        }
                    }
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation { message: msg },
                    ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                        DbError::ConstraintViolation { message: msg }
                    }
                    _ if is_busy(db_err.code().as_deref(), &msg) => DbError::Busy(msg),
                    _ => DbError::QueryFailed(msg),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Checkout Error
// =============================================================================

/// Why a checkout failed. Either way nothing was committed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart broke a business rule (bad input, unknown product, stock).
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The store failed (lock timeout, I/O, commit failure).
    #[error(transparent)]
    Storage(#[from] DbError),
}

/// Coarse classification of a failed checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutErrorKind {
    InvalidInput,
    ProductNotFound,
    InsufficientStock,
    StorageFailure,
}

impl CheckoutError {
    pub fn kind(&self) -> CheckoutErrorKind {
        match self {
            CheckoutError::Rejected(e) if e.is_invalid_input() => CheckoutErrorKind::InvalidInput,
            CheckoutError::Rejected(CoreError::ProductNotFound { .. }) => {
                CheckoutErrorKind::ProductNotFound
            }
            CheckoutError::Rejected(_) => CheckoutErrorKind::InsufficientStock,
            CheckoutError::Storage(_) => CheckoutErrorKind::StorageFailure,
        }
    }
}

/// Result type for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_busy() {
        assert!(is_busy(Some("5"), "database is locked"));
        assert!(is_busy(Some("517"), "whatever"));
        assert!(is_busy(None, "database is locked"));
        assert!(!is_busy(Some("19"), "CHECK constraint failed: stock >= 0"));
    }

    #[test]
    fn test_checkout_error_kind() {
        let err = CheckoutError::from(CoreError::EmptyCart);
        assert_eq!(err.kind(), CheckoutErrorKind::InvalidInput);

        let err = CheckoutError::from(CoreError::AmountOverflow { product_id: 7 });
        assert_eq!(err.kind(), CheckoutErrorKind::InvalidInput);

        let err = CheckoutError::from(CoreError::ProductNotFound { product_id: 999 });
        assert_eq!(err.kind(), CheckoutErrorKind::ProductNotFound);

        let err = CheckoutError::from(CoreError::InsufficientStock {
            product_id: 1,
            requested: 5,
            available: 2,
        });
        assert_eq!(err.kind(), CheckoutErrorKind::InsufficientStock);

        let err = CheckoutError::from(DbError::Busy("database is locked".to_string()));
        assert_eq!(err.kind(), CheckoutErrorKind::StorageFailure);
    }

    #[test]
    fn test_transaction_wrapper_classifies_failure() {
        let err = DbError::transaction(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DbError::TransactionFailed(_)));
    }
}
