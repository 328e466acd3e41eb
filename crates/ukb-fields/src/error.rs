//! Error types for field resolution and table loading.

use std::path::PathBuf;
use thiserror::Error;
use ukb_model::ModelError;

/// Errors that can occur while loading a table or building its field index.
#[derive(Debug, Error)]
pub enum FieldError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// None of the accepted subject identifier columns is present.
    #[error("no subject identifier column found (expected one of: {expected})")]
    MissingIdColumn { expected: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// Per-subject series built over different subject indexes.
    #[error("subject index mismatch: expected {expected} subjects, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Subject identity invariant violated.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<polars::prelude::PolarsError> for FieldError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldError::MissingIdColumn {
            expected: "eid, f.eid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no subject identifier column found (expected one of: eid, f.eid)"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("f.31.0.0".into());
        let field_err: FieldError = polars_err.into();
        assert!(matches!(field_err, FieldError::DataFrame { .. }));
    }

    #[test]
    fn test_duplicate_subject_is_transparent() {
        let err: FieldError = ModelError::DuplicateSubject {
            id: "1000".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "duplicate subject identifier: 1000");
    }
}
