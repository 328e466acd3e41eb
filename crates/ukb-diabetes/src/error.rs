//! Error types for the diabetes algorithms.

use chrono::NaiveDate;
use thiserror::Error;
use ukb_fields::FieldError;
use ukb_model::ModelError;

/// Invalid algorithm configuration. Raised at construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "prevalence baseline {baseline} is too unreliable: it must be after the UK Biobank start date ({start})"
    )]
    BaselineBeforeStart { baseline: NaiveDate, start: NaiveDate },

    #[error(
        "incidence baseline {baseline} is too unreliable: it must not precede the UK Biobank end of assessment ({end_of_assessment})"
    )]
    IncidenceBaselineBeforeAssessmentEnd {
        baseline: NaiveDate,
        end_of_assessment: NaiveDate,
    },

    #[error("end date {end_date} must be after baseline {baseline}")]
    EndDateNotAfterBaseline {
        baseline: NaiveDate,
        end_date: NaiveDate,
    },

    #[error("interval must be a positive number of days, got {days}")]
    NonPositiveInterval { days: i64 },
}

/// Errors raised while deriving diabetes phenotypes.
#[derive(Debug, Error)]
pub enum DiabetesError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// A completed prevalence pass left subjects without a category.
    #[error("{count} subjects left unclassified after a full prevalence pass")]
    Unclassified { count: usize },

    /// Series built for different subject indexes were combined.
    #[error("subject index mismatch: expected {expected} subjects, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, DiabetesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NonPositiveInterval { days: 0 };
        assert_eq!(
            err.to_string(),
            "interval must be a positive number of days, got 0"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: DiabetesError = ConfigError::NonPositiveInterval { days: -3 }.into();
        assert!(matches!(err, DiabetesError::Config(_)));
    }

    #[test]
    fn test_model_error_is_transparent() {
        let err: DiabetesError = ModelError::LengthMismatch {
            expected: 4,
            found: 3,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "subject index mismatch: expected 4 subjects, found 3"
        );
    }
}
