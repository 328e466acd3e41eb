use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("duplicate subject identifier: {id}")]
    DuplicateSubject { id: String },
    #[error("empty subject identifier at row {row}")]
    EmptySubjectId { row: usize },
    #[error("unknown diabetes category: {0}")]
    UnknownCategory(String),
    #[error("unknown prevalence style: {0}")]
    UnknownStyle(String),
    #[error("subject index mismatch: expected {expected} subjects, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
