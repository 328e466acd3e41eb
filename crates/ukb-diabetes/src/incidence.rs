//! Incident diabetes after baseline (algorithm B of Eastwood et al. 2016).
//!
//! An incident event is the first in-patient diagnosis of a subtype strictly
//! after baseline and before the end date, for subjects who were not already
//! prevalent at baseline.

use std::fmt;

use chrono::NaiveDate;
use polars::prelude::{Column, IntoColumn, NamedFrom, Series};
use tracing::{info, warn};
use ukb_common::format_date;
use ukb_model::SubjectIndex;

use crate::config::IncidenceConfig;
use crate::error::{DiabetesError, Result};
use crate::evidence::InpatientDates;
use crate::prevalence::PrevalenceResult;

/// Diabetes subtype an incidence series is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subtype {
    Type1,
    Type2,
    /// Type 1, type 2, other or unspecified.
    Any,
}

impl Subtype {
    pub const ALL: [Subtype; 3] = [Subtype::Type1, Subtype::Type2, Subtype::Any];

    /// Name of the output column.
    pub fn column_name(&self) -> &'static str {
        match self {
            Subtype::Type1 => "Incidence_T1DM",
            Subtype::Type2 => "Incidence_T2DM",
            Subtype::Any => "Incidence_AnyDM",
        }
    }

    fn dates<'a>(&self, inpatient: &'a InpatientDates) -> &'a [Option<NaiveDate>] {
        match self {
            Subtype::Type1 => &inpatient.type1,
            Subtype::Type2 => &inpatient.type2,
            Subtype::Any => &inpatient.any,
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Subtype::Type1 => "Type-1 DM",
            Subtype::Type2 => "Type-2 DM",
            Subtype::Any => "Any DM",
        };
        f.write_str(label)
    }
}

/// Computes incident events from prevalence and in-patient dates.
#[derive(Debug, Clone)]
pub struct IncidenceCalculator {
    config: IncidenceConfig,
}

impl IncidenceCalculator {
    pub fn new(config: IncidenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IncidenceConfig {
        &self.config
    }

    /// # Errors
    ///
    /// Returns [`DiabetesError::LengthMismatch`] when `inpatient` was not
    /// built over the subjects of `prevalence`.
    pub fn calculate(
        &self,
        prevalence: &PrevalenceResult,
        inpatient: &InpatientDates,
    ) -> Result<IncidenceResult> {
        if inpatient.len() != prevalence.len() {
            return Err(DiabetesError::LengthMismatch {
                expected: prevalence.len(),
                found: inpatient.len(),
            });
        }
        if prevalence.baseline() != self.config.baseline() {
            warn!(
                prevalence_baseline = %prevalence.baseline(),
                incidence_baseline = %self.config.baseline(),
                "prevalence was classified at a different baseline"
            );
        }
        let prevalent = (0..prevalence.len())
            .filter(|&idx| prevalence.is_prevalent(idx))
            .count();
        info!(
            subjects = prevalent,
            baseline = %self.config.baseline(),
            "subjects with diabetes prior to baseline"
        );

        let mut events = Vec::with_capacity(Subtype::ALL.len());
        for subtype in Subtype::ALL {
            let dates: Vec<Option<NaiveDate>> = subtype
                .dates(inpatient)
                .iter()
                .enumerate()
                .map(|(idx, date)| {
                    date.filter(|date| !prevalence.is_prevalent(idx) && self.in_window(*date))
                })
                .collect();
            let subjects = dates.iter().filter(|date| date.is_some()).count();
            info!(%subtype, subjects, "incident diagnoses");
            events.push((subtype, dates));
        }
        Ok(IncidenceResult {
            subjects: prevalence.subjects().clone(),
            baseline: self.config.baseline(),
            interval_days: self.config.interval().map(|interval| interval.num_days()),
            events,
        })
    }

    fn in_window(&self, date: NaiveDate) -> bool {
        date > self.config.baseline() && self.config.end_date().is_none_or(|end| date < end)
    }
}

/// Event dates per subtype.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidenceResult {
    subjects: SubjectIndex,
    baseline: NaiveDate,
    interval_days: Option<i64>,
    events: Vec<(Subtype, Vec<Option<NaiveDate>>)>,
}

impl IncidenceResult {
    pub fn subjects(&self) -> &SubjectIndex {
        &self.subjects
    }

    pub fn baseline(&self) -> NaiveDate {
        self.baseline
    }

    /// Incident event date of every subject for `subtype`.
    pub fn events(&self, subtype: Subtype) -> &[Option<NaiveDate>] {
        self.events
            .iter()
            .find(|(candidate, _)| *candidate == subtype)
            .map(|(_, dates)| dates.as_slice())
            .unwrap_or_default()
    }

    /// Events as 1-based interval indexes, `floor((date - baseline) / interval) + 1`.
    /// `None` when no interval was configured.
    pub fn buckets(&self, subtype: Subtype) -> Option<Vec<Option<i64>>> {
        let days = self.interval_days?;
        Some(
            self.events(subtype)
                .iter()
                .map(|date| date.map(|date| bucket(self.baseline, date, days)))
                .collect(),
        )
    }

    /// Output columns: ISO dates, or interval indexes when an interval is set.
    pub fn columns(&self) -> Vec<Column> {
        Subtype::ALL
            .into_iter()
            .map(|subtype| {
                let name = subtype.column_name();
                match self.buckets(subtype) {
                    Some(buckets) => Series::new(name.into(), buckets).into_column(),
                    None => {
                        let dates: Vec<Option<String>> = self
                            .events(subtype)
                            .iter()
                            .map(|date| date.map(format_date))
                            .collect();
                        Series::new(name.into(), dates).into_column()
                    }
                }
            })
            .collect()
    }
}

fn bucket(baseline: NaiveDate, date: NaiveDate, interval_days: i64) -> i64 {
    (date - baseline).num_days().div_euclid(interval_days) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_bucket_boundaries() {
        let baseline = ymd(2011, 1, 1);
        assert_eq!(bucket(baseline, ymd(2011, 1, 2), 90), 1);
        assert_eq!(bucket(baseline, ymd(2011, 3, 31), 90), 1);
        assert_eq!(bucket(baseline, ymd(2011, 4, 1), 90), 2);
        assert_eq!(bucket(baseline, ymd(2012, 1, 1), 365), 2);
    }

    #[test]
    fn test_column_names() {
        let names: Vec<&str> = Subtype::ALL.iter().map(Subtype::column_name).collect();
        assert_eq!(names, ["Incidence_T1DM", "Incidence_T2DM", "Incidence_AnyDM"]);
    }
}
