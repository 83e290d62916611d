//! Error types for provider domain validation.

use thiserror::Error;

/// Errors returned while constructing provider domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderDomainError {
    /// The provider identifier is empty after trimming.
    #[error("provider identifier must not be empty")]
    EmptyProviderId,

    /// The provider identifier contains characters outside `[a-z0-9_]`.
    #[error(
        "provider identifier '{0}' contains invalid characters (only lowercase alphanumeric and underscores allowed)"
    )]
    InvalidProviderId(String),

    /// The provider identifier exceeds the 64-character limit.
    #[error("provider identifier exceeds 64 character limit: {0}")]
    ProviderIdTooLong(String),

    /// A schema model names the same table twice.
    #[error("schema model defines table '{0}' more than once")]
    DuplicateTable(String),

    /// A table definition has no columns.
    #[error("table '{0}' has no columns")]
    EmptyTable(String),

    /// A primary key or foreign key refers to a column the table lacks.
    #[error("table '{table}' references unknown column '{column}'")]
    UnknownColumn {
        /// Table carrying the broken reference.
        table: String,
        /// Column name that could not be found.
        column: String,
    },

    /// A foreign key refers to a table missing from the model.
    #[error("table '{table}' references unknown table '{referenced}'")]
    UnknownReferencedTable {
        /// Table carrying the foreign key.
        table: String,
        /// Referenced table name that could not be found.
        referenced: String,
    },

    /// More values were bound than a positional placeholder can number.
    #[error("{count} parameters exceed the limit of {limit} per command")]
    TooManyParameters {
        /// Number of values supplied.
        count: usize,
        /// Highest position a placeholder can carry.
        limit: u16,
    },
}
