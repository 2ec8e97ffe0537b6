//! Error types for table construction and data refresh.
//!
//! Gesture operations never return errors. These are only produced when the
//! host hands the engine columns, rows or configuration that break an invariant.

use thiserror::Error;

/// Errors raised while building or refreshing a table engine.
#[derive(Debug, Error)]
pub enum TableError {
    /// Page size must be at least one row.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    /// Two columns share the same id.
    #[error("Duplicate column id '{0}'")]
    DuplicateColumn(String),

    /// The default sort names a column that does not exist.
    #[error("Sort column '{0}' not found")]
    UnknownSortColumn(String),

    /// A row record is missing its id field.
    #[error("Row {index} has no '{field}' field")]
    MissingRowId {
        /// Position of the row in the supplied data.
        index: usize,
        /// The configured row id field.
        field: String,
    },

    /// A row id is present but is an array or object.
    #[error("Row {index} has a non-scalar '{field}' value")]
    InvalidRowId {
        /// Position of the row in the supplied data.
        index: usize,
        /// The configured row id field.
        field: String,
    },

    /// Two rows share the same id.
    #[error("Duplicate row id '{0}'")]
    DuplicateRowId(String),

    /// A row record is not a JSON object.
    #[error("Row {index} is not an object")]
    NotAnObject {
        /// Position of the row in the supplied data.
        index: usize,
    },

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
