// Error types for database operations

use thiserror::Error;

/// Error types for database connection and query operations
#[derive(Debug, Error)]
pub enum DbError {
    /// Error occurred during database connection attempt
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    QueryError(String),

    /// A referenced row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The requested write contradicts existing state (duplicate join
    /// request, full team)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A debit was attempted beyond the current balance. Raised inside the
    /// ledger transaction, while the balance row is still locked, so the
    /// check and the append cannot race.
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: i64, requested: i64 },
}

impl From<sea_orm::DbErr> for DbError {
    fn from(err: sea_orm::DbErr) -> Self {
        DbError::QueryError(err.to_string())
    }
}

impl From<sea_orm::TransactionError<DbError>> for DbError {
    fn from(err: sea_orm::TransactionError<DbError>) -> Self {
        match err {
            sea_orm::TransactionError::Connection(e) => e.into(),
            sea_orm::TransactionError::Transaction(e) => e,
        }
    }
}
