//! Error types for panel assembly, annotation and scoring.
//!
//! Schema errors (a required column is absent) and catalog/config errors are
//! surfaced immediately. Degenerate inputs such as an empty panel or an empty
//! shock catalog are not errors; they produce zero-valued results.

use polars::prelude::*;

/// Result type for panel operations
pub type PanelResult<T> = Result<T, PanelError>;

/// Error type for panel operations
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// A column the operation depends on is not present in the frame.
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    /// Reference data is internally inconsistent (inverted window, duplicate
    /// shock name, unknown severity, malformed country code).
    #[error("Invalid reference catalog: {0}")]
    InvalidCatalog(String),

    /// Configuration could not be read, parsed or failed validation.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl PanelError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Whether this error is a schema problem on the input panel.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::MissingColumn { .. })
    }
}
