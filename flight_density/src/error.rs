//! Error types for schedule loading and density queries.

/// Result type for density operations
pub type DensityResult<T> = Result<T, DensityError>;

/// Error type for density operations
#[derive(Debug, thiserror::Error)]
pub enum DensityError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Unknown airport: {0}")]
    UnknownAirport(String),

    #[error("Malformed {column} at row {row}: {value:?}")]
    MalformedTimeOrDate {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Airport table has no usable airports")]
    EmptyAirportTable,
}

impl DensityError {
    pub(crate) fn malformed(row: usize, column: &str, value: impl ToString) -> Self {
        DensityError::MalformedTimeOrDate {
            row,
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}
