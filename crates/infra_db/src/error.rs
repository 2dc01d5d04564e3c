//! Database error types
//!
//! This module classifies low-level SQLx failures into variants the
//! adapter can act on, and maps the remainder onto the domain error
//! taxonomy.

use thiserror::Error;

use domain_ledger::LedgerError;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// No row matched the query
    #[error("record not found")]
    RowNotFound,

    /// Unique constraint violation
    #[error("duplicate entry: {message}")]
    DuplicateEntry {
        constraint: Option<String>,
        message: String,
    },

    /// Foreign key constraint violation
    #[error("foreign key violation: {message}")]
    ForeignKeyViolation {
        constraint: Option<String>,
        message: String,
    },

    /// The transaction lost a serialization or deadlock race and can be
    /// retried by the client
    #[error("transaction conflict: {0}")]
    TransactionConflict(String),

    /// Pool exhaustion, no available connections
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Migration error
    #[error("migration failed: {0}")]
    MigrationFailed(String),
}

impl DatabaseError {
    /// The violated constraint's name, when the database reported one.
    ///
    /// Call sites that expect a specific constraint (say, the unique phone
    /// index) use this to translate the violation into a precise domain
    /// error instead of an opaque storage failure.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            DatabaseError::DuplicateEntry { constraint, .. }
            | DatabaseError::ForeignKeyViolation { constraint, .. } => constraint.as_deref(),
            _ => None,
        }
    }

    /// Whether retrying the operation could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DatabaseError::TransactionConflict(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Converts SQLx errors to more specific DatabaseError variants based on
/// the PostgreSQL error code.
impl From<&sqlx::Error> for DatabaseError {
    fn from(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::RowNotFound,
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                match db_err.code().as_deref() {
                    Some("23505") => DatabaseError::DuplicateEntry {
                        constraint: db_err.constraint().map(str::to_string),
                        message: db_err.message().to_string(),
                    },
                    Some("23503") => DatabaseError::ForeignKeyViolation {
                        constraint: db_err.constraint().map(str::to_string),
                        message: db_err.message().to_string(),
                    },
                    Some("40001") | Some("40P01") => {
                        DatabaseError::TransactionConflict(db_err.message().to_string())
                    }
                    _ => DatabaseError::QueryFailed(db_err.message().to_string()),
                }
            }
            other => DatabaseError::QueryFailed(other.to_string()),
        }
    }
}

/// Maps classified database failures onto the domain error taxonomy.
///
/// Retryable races surface as `LedgerError::Conflict`; everything else is
/// an opaque storage failure. Constraint-specific translations (duplicate
/// phone, second meter for a customer) happen at the call sites that know
/// which constraint they expect.
impl From<DatabaseError> for LedgerError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::TransactionConflict(message) => LedgerError::Conflict(message),
            other => LedgerError::storage(other),
        }
    }
}

/// Shorthand for the classify-then-map path used on every query
pub fn to_ledger_error(error: sqlx::Error) -> LedgerError {
    DatabaseError::from(&error).into()
}
