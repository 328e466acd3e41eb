//! Core types for UK Biobank phenotype derivation.
//!
//! Evidence is three-valued ([`TriValue`]) and stored column-wise
//! ([`TriColumn`]) over a shared [`SubjectIndex`].

pub mod category;
pub mod column;
pub mod demographics;
pub mod error;
pub mod logic;
pub mod subject;
pub mod tri;

pub use category::{Category, PrevalenceStyle, StyledValue};
pub use column::TriColumn;
pub use demographics::{Ethnicity, Sex};
pub use error::{ModelError, Result};
pub use subject::SubjectIndex;
pub use tri::TriValue;
