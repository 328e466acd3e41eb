//! Baseline, end date and output configuration.
//!
//! Bounds are checked when a configuration is built, so an algorithm never
//! runs with a baseline the data cannot support.

use chrono::{Duration, NaiveDate};
use tracing::warn;
use ukb_model::PrevalenceStyle;

use crate::error::ConfigError;

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

/// First day of UK Biobank recruitment.
pub const UKB_START_DATE: NaiveDate = ymd(2006, 1, 1);

/// End of the UK Biobank baseline assessment period.
pub const UKB_ASSESSMENT_END: NaiveDate = ymd(2010, 8, 1);

/// Prevalence algorithm settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrevalenceConfig {
    baseline: NaiveDate,
    style: PrevalenceStyle,
    debug_subject: Option<String>,
}

impl Default for PrevalenceConfig {
    fn default() -> Self {
        Self {
            baseline: UKB_ASSESSMENT_END,
            style: PrevalenceStyle::default(),
            debug_subject: None,
        }
    }
}

impl PrevalenceConfig {
    /// Fails when `baseline` is on or before the UK Biobank start; warns
    /// when it falls after the end of assessment.
    pub fn new(baseline: NaiveDate) -> Result<Self, ConfigError> {
        if baseline <= UKB_START_DATE {
            return Err(ConfigError::BaselineBeforeStart {
                baseline,
                start: UKB_START_DATE,
            });
        }
        if baseline > UKB_ASSESSMENT_END {
            warn!(
                %baseline,
                end_of_assessment = %UKB_ASSESSMENT_END,
                "prevalence after the end of assessment is less reliable"
            );
        }
        Ok(Self {
            baseline,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_style(mut self, style: PrevalenceStyle) -> Self {
        self.style = style;
        self
    }

    /// Log the evidence row and category of one subject at trace level.
    #[must_use]
    pub fn with_debug_subject(mut self, subject: impl Into<String>) -> Self {
        self.debug_subject = Some(subject.into());
        self
    }

    pub fn baseline(&self) -> NaiveDate {
        self.baseline
    }

    pub fn style(&self) -> PrevalenceStyle {
        self.style
    }

    pub fn debug_subject(&self) -> Option<&str> {
        self.debug_subject.as_deref()
    }
}

/// Incidence algorithm settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidenceConfig {
    baseline: NaiveDate,
    end_date: Option<NaiveDate>,
    interval: Option<Duration>,
}

impl IncidenceConfig {
    /// Fails when `baseline` precedes the end of assessment.
    pub fn new(baseline: NaiveDate) -> Result<Self, ConfigError> {
        if baseline < UKB_ASSESSMENT_END {
            return Err(ConfigError::IncidenceBaselineBeforeAssessmentEnd {
                baseline,
                end_of_assessment: UKB_ASSESSMENT_END,
            });
        }
        Ok(Self {
            baseline,
            end_date: None,
            interval: None,
        })
    }

    /// Events on or after `end_date` are ignored. Unbounded by default.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Result<Self, ConfigError> {
        if end_date <= self.baseline {
            return Err(ConfigError::EndDateNotAfterBaseline {
                baseline: self.baseline,
                end_date,
            });
        }
        self.end_date = Some(end_date);
        Ok(self)
    }

    /// Report events as 1-based interval indexes of `days` days each.
    pub fn with_interval(mut self, days: i64) -> Result<Self, ConfigError> {
        if days <= 0 {
            return Err(ConfigError::NonPositiveInterval { days });
        }
        self.interval = Some(Duration::days(days));
        Ok(self)
    }

    pub fn baseline(&self) -> NaiveDate {
        self.baseline
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }
}
