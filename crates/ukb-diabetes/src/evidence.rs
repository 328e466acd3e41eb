//! Per-subject evidence consumed by the prevalence rules.
//!
//! Built once from a [`FieldSource`] and never updated; a change in the raw
//! data means building a new [`Evidence`]. No classification logic lives
//! here.

use chrono::NaiveDate;
use tracing::info;
use ukb_fields::{Earliest, FieldSource, InstanceFilter, Mean, ValueSet, earliest_of};
use ukb_model::logic::{collapsing, strict};
use ukb_model::{Ethnicity, Sex, SubjectIndex, TriColumn, TriValue};

use crate::codes;
use crate::error::Result;

/// First in-patient diagnosis date per diabetes subtype.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InpatientDates {
    pub type1: Vec<Option<NaiveDate>>,
    pub type2: Vec<Option<NaiveDate>>,
    pub other: Vec<Option<NaiveDate>>,
    pub unspecified: Vec<Option<NaiveDate>>,
    /// Earliest of the four above.
    pub any: Vec<Option<NaiveDate>>,
}

impl InpatientDates {
    pub fn build<S: FieldSource>(source: &S) -> Result<Self> {
        let block = |prefix: &str| {
            source.interpolate(
                codes::ICD10_DATES,
                codes::ICD10_DIAGNOSES,
                &ValueSet::new(codes::icd10_block(prefix)),
                &Earliest,
            )
        };
        let type1 = block(codes::ICD10_T1DM);
        let type2 = block(codes::ICD10_T2DM);
        let other = block(codes::ICD10_OTHER_DM);
        let unspecified = block(codes::ICD10_UNSPECIFIED_DM);
        let any = earliest_of(&[&type1, &type2, &other, &unspecified])?;
        Ok(Self {
            type1,
            type2,
            other,
            unspecified,
            any,
        })
    }

    /// Dates for subjects with no in-patient record.
    pub fn empty(len: usize) -> Self {
        Self {
            type1: vec![None; len],
            type2: vec![None; len],
            other: vec![None; len],
            unspecified: vec![None; len],
            any: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.any.len()
    }

    pub fn is_empty(&self) -> bool {
        self.any.is_empty()
    }
}

/// Evidence for one subject, as seen by a rule predicate.
///
/// In-patient diagnoses enter as "dated on or before baseline"; a missing
/// date compares as not before baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvidenceRow {
    /// Touchscreen gestational diabetes, female only.
    pub gdm_only_sr: TriValue,
    pub any_dm_ni: TriValue,
    /// Nurse-interview gestational diabetes, female only.
    pub gdm_ni: TriValue,
    pub t1dm_ni: TriValue,
    pub t2dm_ni: TriValue,
    /// Any of the four nurse-interview diabetes reports.
    pub diabetes_ni: TriValue,
    pub insulin_sr: TriValue,
    pub insulin_within_1yr: TriValue,
    pub insulin_ni: TriValue,
    pub metformin_ni: TriValue,
    pub non_metformin_oad_ni: TriValue,
    pub ethnicity: Option<Ethnicity>,
    /// Combined touchscreen / nurse-interview age at diagnosis.
    pub age_diagnosed: Option<f64>,
    /// Nurse-interview age at gestational diabetes diagnosis.
    pub age_gdm_ni: Option<f64>,
    pub t1dm_ip_by_baseline: bool,
    pub t2dm_ip_by_baseline: bool,
    pub any_dm_ip_by_baseline: bool,
}

impl Default for EvidenceRow {
    /// A subject with no data at all.
    fn default() -> Self {
        Self {
            gdm_only_sr: TriValue::Unknown,
            any_dm_ni: TriValue::Unknown,
            gdm_ni: TriValue::Unknown,
            t1dm_ni: TriValue::Unknown,
            t2dm_ni: TriValue::Unknown,
            diabetes_ni: TriValue::False,
            insulin_sr: TriValue::Unknown,
            insulin_within_1yr: TriValue::Unknown,
            insulin_ni: TriValue::Unknown,
            metformin_ni: TriValue::Unknown,
            non_metformin_oad_ni: TriValue::Unknown,
            ethnicity: None,
            age_diagnosed: None,
            age_gdm_ni: None,
            t1dm_ip_by_baseline: false,
            t2dm_ip_by_baseline: false,
            any_dm_ip_by_baseline: false,
        }
    }
}

/// Column-wise evidence over a subject index.
#[derive(Debug, Clone)]
pub struct Evidence {
    subjects: SubjectIndex,
    baseline: NaiveDate,
    gdm_only_sr: TriColumn,
    any_dm_ni: TriColumn,
    gdm_ni: TriColumn,
    t1dm_ni: TriColumn,
    t2dm_ni: TriColumn,
    diabetes_ni: TriColumn,
    insulin_sr: TriColumn,
    insulin_within_1yr: TriColumn,
    insulin_ni: TriColumn,
    metformin_ni: TriColumn,
    non_metformin_oad_ni: TriColumn,
    ethnicity: Vec<Option<Ethnicity>>,
    age_diagnosed: Vec<Option<f64>>,
    age_gdm_ni: Vec<Option<f64>>,
    inpatient: InpatientDates,
}

impl Evidence {
    /// Derive every signal from `source`.
    ///
    /// Survey answers count only from assessment visits on or before
    /// `baseline`; in-patient dates are kept whole so incidence can use them.
    pub fn build<S: FieldSource>(source: &S, baseline: NaiveDate) -> Result<Self> {
        let filter = InstanceFilter::assessed_on_or_before(source, baseline);
        let filter = filter.as_ref();
        let presence = |fields: &[&str], values: &[&str]| {
            source.presence(fields, &ValueSet::new(values), filter)
        };

        let female: TriColumn = source
            .sex()
            .into_iter()
            .map(|sex| TriValue::from(sex.map(|sex| sex == Sex::Female)))
            .collect();

        // Touchscreen
        let gdm_only_sr = TriColumn::combine(
            &[&presence(&[codes::GDM_ONLY_SR], &codes::YES), &female],
            strict::and,
        )?;

        // Nurse interview
        let any_dm_ni = presence(&[codes::ILLNESS_NI], &codes::ANY_DM_NI);
        let gdm_ni = TriColumn::combine(
            &[&presence(&[codes::ILLNESS_NI], &codes::GDM_NI), &female],
            strict::and,
        )?;
        let t1dm_ni = presence(&[codes::ILLNESS_NI], &codes::T1DM_NI);
        let t2dm_ni = presence(&[codes::ILLNESS_NI], &codes::T2DM_NI);
        let diabetes_ni =
            TriColumn::combine(&[&any_dm_ni, &gdm_ni, &t1dm_ni, &t2dm_ni], collapsing::any)?;

        // Medication
        let insulin_sr = presence(&codes::MEDICATION_SR, &codes::INSULIN_SR);
        let insulin_within_1yr = presence(&[codes::INSULIN_WITHIN_1YR], &codes::YES);
        let insulin_ni = presence(&[codes::TREATMENT_NI], &codes::INSULIN_NI);
        let metformin_ni = presence(&[codes::TREATMENT_NI], &codes::METFORMIN_NI);
        let non_metformin_oad: Vec<&str> = codes::non_metformin_oad().collect();
        let non_metformin_oad_ni = presence(&[codes::TREATMENT_NI], &non_metformin_oad);

        let ethnicity = ethnicity(source);
        let (age_diagnosed, age_gdm_ni) =
            ages_at_diagnosis(source, &any_dm_ni, &gdm_ni, &t1dm_ni, &t2dm_ni);
        let inpatient = InpatientDates::build(source)?;

        let evidence = Self {
            subjects: source.subjects().clone(),
            baseline,
            gdm_only_sr,
            any_dm_ni,
            gdm_ni,
            t1dm_ni,
            t2dm_ni,
            diabetes_ni,
            insulin_sr,
            insulin_within_1yr,
            insulin_ni,
            metformin_ni,
            non_metformin_oad_ni,
            ethnicity,
            age_diagnosed,
            age_gdm_ni,
            inpatient,
        };
        evidence.log_counts();
        Ok(evidence)
    }

    /// Assemble evidence from ready-made rows. In-patient dates are empty;
    /// the `*_ip_by_baseline` flags of each row are kept by pinning a date
    /// on the baseline itself.
    pub fn from_rows(subjects: SubjectIndex, baseline: NaiveDate, rows: &[EvidenceRow]) -> Self {
        let tri = |get: fn(&EvidenceRow) -> TriValue| rows.iter().map(get).collect::<TriColumn>();
        let dated = |get: fn(&EvidenceRow) -> bool| {
            rows.iter()
                .map(|row| get(row).then_some(baseline))
                .collect::<Vec<_>>()
        };
        let type1 = dated(|row| row.t1dm_ip_by_baseline);
        let type2 = dated(|row| row.t2dm_ip_by_baseline);
        let any = dated(|row| row.any_dm_ip_by_baseline);
        let mut inpatient = InpatientDates::empty(rows.len());
        inpatient.type1 = type1;
        inpatient.type2 = type2;
        inpatient.any = any;
        Self {
            subjects,
            baseline,
            gdm_only_sr: tri(|row| row.gdm_only_sr),
            any_dm_ni: tri(|row| row.any_dm_ni),
            gdm_ni: tri(|row| row.gdm_ni),
            t1dm_ni: tri(|row| row.t1dm_ni),
            t2dm_ni: tri(|row| row.t2dm_ni),
            diabetes_ni: tri(|row| row.diabetes_ni),
            insulin_sr: tri(|row| row.insulin_sr),
            insulin_within_1yr: tri(|row| row.insulin_within_1yr),
            insulin_ni: tri(|row| row.insulin_ni),
            metformin_ni: tri(|row| row.metformin_ni),
            non_metformin_oad_ni: tri(|row| row.non_metformin_oad_ni),
            ethnicity: rows.iter().map(|row| row.ethnicity).collect(),
            age_diagnosed: rows.iter().map(|row| row.age_diagnosed).collect(),
            age_gdm_ni: rows.iter().map(|row| row.age_gdm_ni).collect(),
            inpatient,
        }
    }

    pub fn subjects(&self) -> &SubjectIndex {
        &self.subjects
    }

    pub fn baseline(&self) -> NaiveDate {
        self.baseline
    }

    pub fn len(&self) -> usize {
        self.gdm_only_sr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn inpatient(&self) -> &InpatientDates {
        &self.inpatient
    }

    /// Evidence of subject `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    pub fn row(&self, idx: usize) -> EvidenceRow {
        let by_baseline = |dates: &[Option<NaiveDate>]| {
            dates[idx].is_some_and(|date| date <= self.baseline)
        };
        EvidenceRow {
            gdm_only_sr: self.gdm_only_sr[idx],
            any_dm_ni: self.any_dm_ni[idx],
            gdm_ni: self.gdm_ni[idx],
            t1dm_ni: self.t1dm_ni[idx],
            t2dm_ni: self.t2dm_ni[idx],
            diabetes_ni: self.diabetes_ni[idx],
            insulin_sr: self.insulin_sr[idx],
            insulin_within_1yr: self.insulin_within_1yr[idx],
            insulin_ni: self.insulin_ni[idx],
            metformin_ni: self.metformin_ni[idx],
            non_metformin_oad_ni: self.non_metformin_oad_ni[idx],
            ethnicity: self.ethnicity[idx],
            age_diagnosed: self.age_diagnosed[idx],
            age_gdm_ni: self.age_gdm_ni[idx],
            t1dm_ip_by_baseline: by_baseline(&self.inpatient.type1),
            t2dm_ip_by_baseline: by_baseline(&self.inpatient.type2),
            any_dm_ip_by_baseline: by_baseline(&self.inpatient.any),
        }
    }

    fn log_counts(&self) {
        let signals = [
            ("gdm_only_sr", &self.gdm_only_sr),
            ("any_dm_ni", &self.any_dm_ni),
            ("gdm_ni", &self.gdm_ni),
            ("t1dm_ni", &self.t1dm_ni),
            ("t2dm_ni", &self.t2dm_ni),
            ("diabetes_ni", &self.diabetes_ni),
            ("insulin_sr", &self.insulin_sr),
            ("insulin_within_1yr", &self.insulin_within_1yr),
            ("insulin_ni", &self.insulin_ni),
            ("metformin_ni", &self.metformin_ni),
            ("non_metformin_oad_ni", &self.non_metformin_oad_ni),
        ];
        for (signal, column) in signals {
            info!(
                signal,
                subjects = column.count_true(),
                unknown = column.count_unknown(),
                "evidence"
            );
        }
        for group in Ethnicity::ALL {
            let subjects = self
                .ethnicity
                .iter()
                .filter(|ethnicity| **ethnicity == Some(group))
                .count();
            info!(ethnicity = %group, subjects, "ethnic breakdown");
        }
        let aged = self
            .age_diagnosed
            .iter()
            .filter(|age| age.is_some_and(|age| age > 0.0))
            .count();
        info!(subjects = aged, "subjects with age at diagnosis");
        let ip = self.inpatient.any.iter().filter(|date| date.is_some()).count();
        info!(subjects = ip, "subjects with an in-patient diabetes diagnosis");
    }
}

/// Ethnic background grouped into four; a later group in the list wins when
/// a subject reported several.
fn ethnicity<S: FieldSource>(source: &S) -> Vec<Option<Ethnicity>> {
    let mut out = vec![None; source.subjects().len()];
    let groups: [(Ethnicity, &[&str]); 4] = [
        (Ethnicity::WhiteEuropean, &codes::WHITE_EUROPEAN),
        (Ethnicity::SouthAsian, &codes::SOUTH_ASIAN),
        (Ethnicity::AfricanCaribbean, &codes::AFRICAN_CARIBBEAN),
        (Ethnicity::MixedOther, &codes::MIXED_OTHER),
    ];
    for (group, values) in groups {
        let found = source.presence(&[codes::ETHNICITY], &ValueSet::new(values), None);
        for (slot, value) in out.iter_mut().zip(found.iter()) {
            if value.is_true() {
                *slot = Some(group);
            }
        }
    }
    out
}

/// Touchscreen age at diagnosis, replaced by the nurse-interview age of the
/// most specific diabetes report (any, then gestational, type 1, type 2)
/// wherever that report is affirmative.
fn ages_at_diagnosis<S: FieldSource>(
    source: &S,
    any_dm_ni: &TriColumn,
    gdm_ni: &TriColumn,
    t1dm_ni: &TriColumn,
    t2dm_ni: &TriColumn,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let interpolated = |values: &[&str]| {
        source.interpolate(
            codes::AGE_DIAGNOSED_NI,
            codes::ILLNESS_NI,
            &ValueSet::new(values),
            &Mean,
        )
    };
    let mut combined = source.summarize(
        codes::AGE_DIAGNOSED_SR,
        Some(codes::AGE_DIAGNOSED_SR_INSTANCE),
        &Mean,
    );
    let age_gdm_ni = interpolated(&codes::GDM_NI);
    let overrides = [
        (any_dm_ni, interpolated(&codes::ANY_DM_NI)),
        (gdm_ni, age_gdm_ni.clone()),
        (t1dm_ni, interpolated(&codes::T1DM_NI)),
        (t2dm_ni, interpolated(&codes::T2DM_NI)),
    ];
    for (flag, ages) in overrides {
        for (idx, age) in ages.into_iter().enumerate() {
            if flag[idx].is_true() {
                combined[idx] = age;
            }
        }
    }
    (combined, age_gdm_ni)
}
