use thiserror::Error;

use crate::field::DataType;

/// Errors surfaced by model registration and record operations.
#[derive(Debug, Error)]
pub enum OrmError {
    /// A non-primary-key field holds a value of the wrong type. Raised
    /// before any statement is executed.
    #[error("field '{field}' expects {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: DataType,
        actual: &'static str,
    },

    /// A record assignment or filter criterion named a column the table
    /// does not have.
    #[error("table '{table}' has no field '{field}'")]
    UnknownField { table: String, field: String },

    /// A type or field name that cannot be used as a bare SQL identifier.
    #[error("invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// `filter` was called without any criteria.
    #[error("filter on table '{table}' needs at least one criterion")]
    EmptyFilter { table: String },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, OrmError>;
