//! The prevalence flowchart of Eastwood et al. (2016), Fig 2, as ordered
//! rule tables.
//!
//! Each predicate reads one [`EvidenceRow`] and fires only on an affirmative
//! answer. The three-valued combinator used in each rule is part of the
//! rule's definition; see [`ukb_model::logic`].

use ukb_model::logic::{collapsing, strict};
use ukb_model::{Category, TriValue};

use crate::evidence::EvidenceRow;

pub type Predicate = fn(&EvidenceRow) -> bool;

/// One step of the flowchart.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Flowchart step, e.g. `1.3`.
    pub id: &'static str,
    pub description: &'static str,
    /// Category assigned when the predicate fires.
    pub outcome: Category,
    pub predicate: Predicate,
}

impl Rule {
    pub const fn new(
        id: &'static str,
        description: &'static str,
        outcome: Category,
        predicate: Predicate,
    ) -> Self {
        Self {
            id,
            description,
            outcome,
            predicate,
        }
    }

    pub fn fires(&self, row: &EvidenceRow) -> bool {
        (self.predicate)(row)
    }
}

/// An ordered rule table applied to one pool of subjects.
#[derive(Debug, Clone)]
pub struct Stage {
    pub name: &'static str,
    /// Category a subject must hold to enter; `None` for unclassified.
    pub entry: Option<Category>,
    pub rules: Vec<Rule>,
    /// Flowchart step that assigns the default.
    pub default_id: &'static str,
    /// Category of every subject no rule matched.
    pub default: Category,
}

impl Stage {
    /// First matching outcome for a single subject, or the default.
    pub fn evaluate(&self, row: &EvidenceRow) -> Category {
        self.rules
            .iter()
            .find(|rule| rule.fires(row))
            .map_or(self.default, |rule| rule.outcome)
    }
}

/// Stage A: diabetes presence and a provisional type.
pub fn stage_a() -> Stage {
    Stage {
        name: "A",
        entry: None,
        rules: vec![
            Rule::new(
                "1.1",
                "no self-report, medication or nurse-interview diabetes and no in-patient diagnosis by baseline",
                Category::Negative,
                no_diabetes_evidence,
            ),
            Rule::new(
                "1.2",
                "gestational diabetes only, without evidence of current diabetes",
                Category::PossibleGestational,
                gestational_only,
            ),
            Rule::new(
                "1.3",
                "non-metformin oral anti-diabetic drug",
                Category::PossibleType2,
                non_metformin_oad,
            ),
            Rule::new(
                "1.4",
                "ethnicity-specific age at diagnosis",
                Category::PossibleType2,
                older_at_diagnosis,
            ),
            Rule::new(
                "1.5",
                "insulin, insulin within one year, nurse-interview or in-patient type 1",
                Category::PossibleType1,
                type1_indicators,
            ),
        ],
        default_id: "1.5",
        default: Category::PossibleType2,
    }
}

/// Stage B: possible type 1 refined to probable.
pub fn stage_b() -> Stage {
    Stage {
        name: "B",
        entry: Some(Category::PossibleType1),
        rules: vec![
            Rule::new(
                "2.1",
                "nurse-interview or in-patient type 1",
                Category::ProbableType1,
                reported_type1,
            ),
            Rule::new(
                "2.2",
                "insulin within one year and current insulin",
                Category::ProbableType1,
                early_and_current_insulin,
            ),
        ],
        default_id: "2.2",
        default: Category::PossibleType1,
    }
}

/// Stage C: possible type 2 refined to probable, or ruled out.
pub fn stage_c() -> Stage {
    Stage {
        name: "C",
        entry: Some(Category::PossibleType2),
        rules: vec![
            Rule::new(
                "3.2",
                "metformin only, no nurse-interview or in-patient diabetes",
                Category::Negative,
                metformin_only,
            ),
            Rule::new(
                "3.3",
                "non-metformin oral anti-diabetic drug or in-patient type 2",
                Category::ProbableType2,
                type2_indicators,
            ),
            Rule::new(
                "3.4",
                "no insulin",
                Category::ProbableType2,
                no_insulin,
            ),
            Rule::new(
                "3.5",
                "nurse-interview type 1",
                Category::ProbableType1,
                nurse_interview_type1,
            ),
        ],
        default_id: "3.5",
        default: Category::PossibleType2,
    }
}

/// All stages in execution order.
pub fn flowchart() -> [Stage; 3] {
    [stage_a(), stage_b(), stage_c()]
}

fn below(age: Option<f64>, limit: f64) -> bool {
    age.is_some_and(|age| age < limit)
}

fn above(age: Option<f64>, limit: f64) -> bool {
    age.is_some_and(|age| age > limit)
}

fn at_least(age: Option<f64>, limit: f64) -> bool {
    age.is_some_and(|age| age >= limit)
}

fn current_insulin(row: &EvidenceRow) -> TriValue {
    collapsing::any(&[row.insulin_sr, row.insulin_ni])
}

/// 1.1
fn no_diabetes_evidence(row: &EvidenceRow) -> bool {
    let reported = collapsing::any(&[
        row.gdm_only_sr,
        row.any_dm_ni,
        row.gdm_ni,
        row.t1dm_ni,
        row.t2dm_ni,
        row.insulin_ni,
        row.insulin_sr,
        row.metformin_ni,
        row.non_metformin_oad_ni,
    ]);
    !(reported.is_true() || row.any_dm_ip_by_baseline)
}

/// 1.2
fn gestational_only(row: &EvidenceRow) -> bool {
    let current = collapsing::any(&[
        row.insulin_ni,
        row.metformin_ni,
        row.non_metformin_oad_ni,
        row.insulin_sr,
        row.t1dm_ni,
        row.t2dm_ni,
    ]);
    let no_current = !current;
    let touchscreen = strict::and(&[row.gdm_only_sr, no_current]);
    let nurse = strict::and(&[
        row.gdm_ni,
        TriValue::from(below(row.age_gdm_ni, 50.0)),
        no_current,
    ]);
    collapsing::any(&[touchscreen, nurse]).is_true()
}

/// 1.3
fn non_metformin_oad(row: &EvidenceRow) -> bool {
    row.non_metformin_oad_ni.is_true()
}

/// 1.4
fn older_at_diagnosis(row: &EvidenceRow) -> bool {
    let higher_risk = row.ethnicity.is_some_and(|ethnicity| ethnicity.is_higher_risk());
    above(row.age_diagnosed, 36.0) || (at_least(row.age_diagnosed, 31.0) && higher_risk)
}

/// 1.5
fn type1_indicators(row: &EvidenceRow) -> bool {
    collapsing::any(&[
        row.insulin_sr,
        row.insulin_ni,
        row.insulin_within_1yr,
        row.t1dm_ni,
    ])
    .is_true()
        || row.t1dm_ip_by_baseline
}

/// 2.1
fn reported_type1(row: &EvidenceRow) -> bool {
    row.t1dm_ni.is_true() || row.t1dm_ip_by_baseline
}

/// 2.2
fn early_and_current_insulin(row: &EvidenceRow) -> bool {
    strict::and(&[row.insulin_within_1yr, current_insulin(row)]).is_true()
}

/// 3.1 and 3.2
fn metformin_only(row: &EvidenceRow) -> bool {
    let other_drugs = collapsing::any(&[row.insulin_sr, row.insulin_ni, row.non_metformin_oad_ni]);
    let only_metformin = strict::and(&[row.metformin_ni, !other_drugs]);
    strict::and(&[only_metformin, !row.diabetes_ni]).is_true() && !row.any_dm_ip_by_baseline
}

/// 3.3
fn type2_indicators(row: &EvidenceRow) -> bool {
    row.non_metformin_oad_ni.is_true() || row.t2dm_ip_by_baseline
}

/// 3.4
fn no_insulin(row: &EvidenceRow) -> bool {
    !current_insulin(row).is_true()
}

/// 3.5
fn nurse_interview_type1(row: &EvidenceRow) -> bool {
    row.t1dm_ni.is_true()
}
