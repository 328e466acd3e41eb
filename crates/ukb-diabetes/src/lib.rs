//! Diabetes phenotypes for UK Biobank after Eastwood et al. (2016),
//! "Algorithms for the capture and adjudication of prevalent and incident
//! diabetes in UK Biobank", PLoS ONE 11(9).
//!
//! The pipeline is:
//!
//! 1. [`Evidence::build`] derives per-subject signals from a
//!    [`ukb_fields::FieldSource`].
//! 2. [`PrevalenceClassifier::classify`] runs the prevalence flowchart
//!    (Fig 2) and assigns every subject a [`ukb_model::Category`].
//! 3. [`IncidenceCalculator::calculate`] finds first in-patient diagnoses
//!    after baseline for subjects not already prevalent (Fig 3, algorithm B).

pub mod codes;
pub mod config;
pub mod error;
pub mod evidence;
pub mod incidence;
pub mod prevalence;
pub mod rules;

pub use config::{IncidenceConfig, PrevalenceConfig, UKB_ASSESSMENT_END, UKB_START_DATE};
pub use error::{ConfigError, DiabetesError, Result};
pub use evidence::{Evidence, EvidenceRow, InpatientDates};
pub use incidence::{IncidenceCalculator, IncidenceResult, Subtype};
pub use prevalence::{
    PREVALENCE_COLUMN, PrevalenceClassifier, PrevalenceResult, RuleCount, prevalence,
};
pub use rules::{Rule, Stage};
