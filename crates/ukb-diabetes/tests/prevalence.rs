//! Prevalence flowchart over hand-built evidence rows.

use proptest::prelude::*;
use ukb_diabetes::rules::{stage_a, stage_b, stage_c};
use ukb_diabetes::{
    Evidence, EvidenceRow, PrevalenceClassifier, PrevalenceConfig, PrevalenceResult,
    UKB_ASSESSMENT_END,
};
use ukb_model::TriValue::{False, True, Unknown};
use ukb_model::{Category, Ethnicity, PrevalenceStyle, SubjectIndex, TriValue};

fn subjects(len: usize) -> SubjectIndex {
    SubjectIndex::new((0..len).map(|idx| format!("S{idx}"))).unwrap()
}

fn classify(rows: &[EvidenceRow]) -> PrevalenceResult {
    let evidence = Evidence::from_rows(subjects(rows.len()), UKB_ASSESSMENT_END, rows);
    PrevalenceClassifier::new(PrevalenceConfig::default())
        .classify(&evidence)
        .unwrap()
}

fn classify_one(row: EvidenceRow) -> Category {
    classify(&[row]).get(0).unwrap()
}

/// Every survey question answered, nothing diabetic.
fn answered_no() -> EvidenceRow {
    EvidenceRow {
        gdm_only_sr: False,
        any_dm_ni: False,
        gdm_ni: False,
        t1dm_ni: False,
        t2dm_ni: False,
        diabetes_ni: False,
        insulin_sr: False,
        insulin_within_1yr: False,
        insulin_ni: False,
        metformin_ni: False,
        non_metformin_oad_ni: False,
        ethnicity: Some(Ethnicity::WhiteEuropean),
        ..EvidenceRow::default()
    }
}

#[test]
fn no_evidence_is_negative() {
    assert_eq!(classify_one(answered_no()), Category::Negative);
    assert_eq!(classify_one(EvidenceRow::default()), Category::Negative);
}

#[test]
fn nurse_interview_type1_is_probable_type1() {
    let row = EvidenceRow {
        any_dm_ni: False,
        t1dm_ni: True,
        diabetes_ni: True,
        age_diagnosed: Some(14.0),
        ..answered_no()
    };
    assert_eq!(stage_a().evaluate(&row), Category::PossibleType1);
    assert_eq!(classify_one(row), Category::ProbableType1);
}

#[test]
fn gestational_only_is_possible_gestational() {
    let row = EvidenceRow {
        gdm_only_sr: True,
        ..answered_no()
    };
    assert_eq!(classify_one(row), Category::PossibleGestational);
}

#[test]
fn non_metformin_oad_is_possible_type2_in_stage_a() {
    let rows = [
        EvidenceRow {
            non_metformin_oad_ni: True,
            ..answered_no()
        },
        EvidenceRow {
            non_metformin_oad_ni: True,
            insulin_sr: True,
            t1dm_ni: True,
            age_diagnosed: Some(10.0),
            ..answered_no()
        },
        EvidenceRow {
            non_metformin_oad_ni: True,
            gdm_only_sr: Unknown,
            ethnicity: None,
            ..EvidenceRow::default()
        },
    ];
    for row in &rows {
        assert_eq!(stage_a().evaluate(row), Category::PossibleType2);
    }
}

#[test]
fn in_patient_type1_by_baseline_is_probable_type1() {
    let row = EvidenceRow {
        t1dm_ip_by_baseline: true,
        any_dm_ip_by_baseline: true,
        ..EvidenceRow::default()
    };
    assert_eq!(classify_one(row), Category::ProbableType1);
}

#[test]
fn metformin_only_is_negative() {
    let row = EvidenceRow {
        metformin_ni: True,
        ..answered_no()
    };
    assert_eq!(classify_one(row), Category::Negative);
}

#[test]
fn type2_without_insulin_is_probable_type2() {
    let row = EvidenceRow {
        t2dm_ni: True,
        diabetes_ni: True,
        age_diagnosed: Some(52.0),
        ..answered_no()
    };
    assert_eq!(classify_one(row), Category::ProbableType2);
}

#[test]
fn insulin_treated_late_onset_type1_report() {
    // Late onset with insulin and a nurse-interview type 1 report.
    let row = EvidenceRow {
        t1dm_ni: True,
        diabetes_ni: True,
        insulin_ni: True,
        age_diagnosed: Some(45.0),
        ..answered_no()
    };
    assert_eq!(stage_a().evaluate(&row), Category::PossibleType2);
    assert_eq!(classify_one(row), Category::ProbableType1);
}

#[test]
fn insulin_without_type_report_stays_possible_type2() {
    let row = EvidenceRow {
        any_dm_ni: True,
        diabetes_ni: True,
        insulin_sr: True,
        age_diagnosed: Some(45.0),
        ..answered_no()
    };
    assert_eq!(classify_one(row), Category::PossibleType2);
}

#[test]
fn higher_risk_ethnicity_lowers_age_threshold() {
    let row = |ethnicity| EvidenceRow {
        any_dm_ni: True,
        diabetes_ni: True,
        insulin_ni: True,
        insulin_within_1yr: True,
        age_diagnosed: Some(33.0),
        ethnicity: Some(ethnicity),
        ..answered_no()
    };
    assert_eq!(
        stage_a().evaluate(&row(Ethnicity::SouthAsian)),
        Category::PossibleType2
    );
    assert_eq!(
        stage_a().evaluate(&row(Ethnicity::WhiteEuropean)),
        Category::PossibleType1
    );
    assert_eq!(
        classify_one(row(Ethnicity::WhiteEuropean)),
        Category::ProbableType1
    );
}

#[test]
fn trace_accounts_for_every_subject() {
    let rows = vec![
        answered_no(),
        EvidenceRow {
            gdm_only_sr: True,
            ..answered_no()
        },
        EvidenceRow {
            metformin_ni: True,
            ..answered_no()
        },
        EvidenceRow {
            t1dm_ni: True,
            diabetes_ni: True,
            age_diagnosed: Some(9.0),
            ..answered_no()
        },
    ];
    let result = classify(&rows);
    let stage_a_assigned: usize = result
        .trace()
        .iter()
        .filter(|count| count.stage == "A")
        .map(|count| count.assigned)
        .sum();
    assert_eq!(stage_a_assigned, rows.len());

    let first = &result.trace()[0];
    assert_eq!(first.rule, "1.1");
    assert_eq!(first.assigned, 1);
    assert_eq!(first.remaining, 3);

    let counts = result.counts();
    assert_eq!(counts[&Category::Negative], 2);
    assert_eq!(counts[&Category::PossibleGestational], 1);
    assert_eq!(counts[&Category::ProbableType1], 1);
    assert_eq!(counts[&Category::PossibleType2], 0);
    assert_eq!(result.category_of("S1"), Some(Category::PossibleGestational));
    assert!(result.is_prevalent(3));
}

#[test]
fn binary_styles_render_as_nullable_integers() {
    let rows = [
        answered_no(),
        EvidenceRow {
            t1dm_ip_by_baseline: true,
            any_dm_ip_by_baseline: true,
            ..answered_no()
        },
        EvidenceRow {
            non_metformin_oad_ni: True,
            ..answered_no()
        },
    ];
    let result = classify(&rows);

    let t1d = result.to_column(PrevalenceStyle::T1d);
    let values: Vec<Option<i32>> = t1d.i32().unwrap().into_iter().collect();
    assert_eq!(values, vec![Some(0), Some(1), None]);

    let t2d = result.to_column(PrevalenceStyle::T2d);
    let values: Vec<Option<i32>> = t2d.i32().unwrap().into_iter().collect();
    assert_eq!(values, vec![Some(0), None, Some(1)]);

    let labels = result.to_column(PrevalenceStyle::Eastwood);
    assert_eq!(labels.name().as_str(), "Prevalence");
    let labels: Vec<Option<&str>> = labels.str().unwrap().into_iter().collect();
    assert_eq!(
        labels,
        vec![
            Some("Diabetes_Unlikely"),
            Some("Probable_Type1"),
            Some("Probable_Type2")
        ]
    );
}

fn tri() -> impl Strategy<Value = TriValue> {
    prop_oneof![Just(True), Just(False), Just(Unknown)]
}

fn evidence_row() -> impl Strategy<Value = EvidenceRow> {
    (
        prop::collection::vec(tri(), 11),
        prop::option::of(prop::sample::select(Ethnicity::ALL.to_vec())),
        prop::option::of(0.0f64..90.0),
        prop::option::of(0.0f64..90.0),
        any::<[bool; 3]>(),
    )
        .prop_map(|(flags, ethnicity, age_diagnosed, age_gdm_ni, ip)| EvidenceRow {
            gdm_only_sr: flags[0],
            any_dm_ni: flags[1],
            gdm_ni: flags[2],
            t1dm_ni: flags[3],
            t2dm_ni: flags[4],
            diabetes_ni: flags[5],
            insulin_sr: flags[6],
            insulin_within_1yr: flags[7],
            insulin_ni: flags[8],
            metformin_ni: flags[9],
            non_metformin_oad_ni: flags[10],
            ethnicity,
            age_diagnosed,
            age_gdm_ni,
            t1dm_ip_by_baseline: ip[0],
            t2dm_ip_by_baseline: ip[1],
            any_dm_ip_by_baseline: ip[0] || ip[1] || ip[2],
        })
}

/// Single-subject walk through the three stages.
fn walk(row: &EvidenceRow) -> Category {
    match stage_a().evaluate(row) {
        Category::PossibleType1 => stage_b().evaluate(row),
        Category::PossibleType2 => stage_c().evaluate(row),
        terminal => terminal,
    }
}

proptest! {
    #[test]
    fn every_subject_gets_a_category(rows in prop::collection::vec(evidence_row(), 0..64)) {
        let result = classify(&rows);
        prop_assert_eq!(result.len(), rows.len());
        let total: usize = result.counts().values().sum();
        prop_assert_eq!(total, rows.len());
    }

    #[test]
    fn classification_is_idempotent(rows in prop::collection::vec(evidence_row(), 1..32)) {
        prop_assert_eq!(classify(&rows), classify(&rows));
    }

    #[test]
    fn bulk_pass_matches_single_subject_walk(rows in prop::collection::vec(evidence_row(), 1..32)) {
        let result = classify(&rows);
        for (idx, row) in rows.iter().enumerate() {
            prop_assert_eq!(result.get(idx), Some(walk(row)));
        }
    }

    #[test]
    fn stages_only_narrow(row in evidence_row()) {
        let provisional = stage_a().evaluate(&row);
        let category = classify_one(row);
        let allowed: &[Category] = match provisional {
            Category::PossibleType1 => &[Category::PossibleType1, Category::ProbableType1],
            Category::PossibleType2 => &[
                Category::PossibleType2,
                Category::ProbableType2,
                Category::ProbableType1,
                Category::Negative,
            ],
            terminal => &[terminal],
        };
        prop_assert!(allowed.contains(&category), "{provisional} became {category}");
    }
}
