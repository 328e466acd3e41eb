//! Round trip through a CSV extract on disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::TempDir;
use ukb_cli::pipeline::{load_table, output_frame, run_incidence, run_prevalence, write_csv};
use ukb_fields::FieldSource;
use ukb_diabetes::{IncidenceConfig, PrevalenceConfig, UKB_ASSESSMENT_END};
use ukb_model::{Category, PrevalenceStyle};

const EXTRACT: &str = "\
eid,31-0.0,53-0.0,4041-0.0,6177-0.0,20002-0.0,20009-0.0,20003-0.0,41270-0.0,41280-0.0
11,1,2008-01-01,,1,1065,,1140860806,,
12,0,2008-01-01,1,,1065,,1140860806,,
13,1,2009-02-01,,3,1222,12,1140883066,,
14,1,2008-01-01,,1,,,,E119,2011-09-15
";

fn write_extract(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn prevalence_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = write_extract(&dir, "ukb.csv", EXTRACT);
    let output = dir.path().join("prevalence.csv");

    let run = run_prevalence(&input, &PrevalenceConfig::default()).unwrap();
    assert_eq!(run.prevalence.category_of("11"), Some(Category::Negative));
    assert_eq!(
        run.prevalence.category_of("12"),
        Some(Category::PossibleGestational)
    );
    assert_eq!(run.prevalence.category_of("13"), Some(Category::ProbableType1));
    assert_eq!(run.prevalence.category_of("14"), Some(Category::Negative));

    let mut df = output_frame(
        &run.table,
        &run.prevalence,
        PrevalenceStyle::Eastwood,
        None,
    )
    .unwrap();
    write_csv(&mut df, &output).unwrap();
    assert_eq!(
        read_lines(&output),
        vec![
            "eid,SEX,Prevalence",
            "11,1,Diabetes_Unlikely",
            "12,0,Possible_Gestational",
            "13,1,Probable_Type1",
            "14,1,Diabetes_Unlikely",
        ]
    );
}

#[test]
fn binary_style_leaves_non_cases_empty() {
    let dir = TempDir::new().unwrap();
    let input = write_extract(&dir, "ukb.csv", EXTRACT);
    let output = dir.path().join("t1d.csv");

    let run = run_prevalence(&input, &PrevalenceConfig::default()).unwrap();
    let mut df = output_frame(&run.table, &run.prevalence, PrevalenceStyle::T1d, None).unwrap();
    write_csv(&mut df, &output).unwrap();
    assert_eq!(
        read_lines(&output),
        vec!["eid,SEX,Prevalence", "11,1,0", "12,0,", "13,1,1", "14,1,0"]
    );
}

#[test]
fn incidence_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = write_extract(&dir, "ukb.csv", EXTRACT);
    let output = dir.path().join("incidence.csv");

    let config = IncidenceConfig::new(UKB_ASSESSMENT_END)
        .unwrap()
        .with_interval(365)
        .unwrap();
    let (run, incidence) = run_incidence(&input, &PrevalenceConfig::default(), config).unwrap();
    let mut df = output_frame(
        &run.table,
        &run.prevalence,
        PrevalenceStyle::Eastwood,
        Some(&incidence),
    )
    .unwrap();
    write_csv(&mut df, &output).unwrap();

    let lines = read_lines(&output);
    assert_eq!(
        lines[0],
        "eid,SEX,Prevalence,Incidence_T1DM,Incidence_T2DM,Incidence_AnyDM"
    );
    // 410 days after baseline.
    assert_eq!(lines[4], "14,1,Diabetes_Unlikely,,2,2");
    assert_eq!(lines[3], "13,1,Probable_Type1,,,");
}

#[test]
fn tab_separated_extract() {
    let dir = TempDir::new().unwrap();
    let input = write_extract(&dir, "ukb.tab", &EXTRACT.replace(',', "\t"));
    let table = load_table(&input).unwrap();
    assert_eq!(table.subjects().len(), 4);
}

#[test]
fn later_baseline_is_accepted() {
    let dir = TempDir::new().unwrap();
    let input = write_extract(&dir, "ukb.csv", EXTRACT);
    let baseline = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap();
    let run = run_prevalence(&input, &PrevalenceConfig::new(baseline).unwrap()).unwrap();
    // The 2011 admission now precedes baseline.
    assert_eq!(run.prevalence.category_of("14"), Some(Category::ProbableType2));
}

#[test]
fn missing_input_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = load_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(err.to_string().starts_with("failed to read"));
}

#[test]
fn duplicate_subjects_are_fatal() {
    let dir = TempDir::new().unwrap();
    let input = write_extract(&dir, "dup.csv", "eid,31-0.0\n7,0\n7,1\n");
    let err = load_table(&input).unwrap_err();
    assert!(format!("{err:#}").contains("duplicate subject identifier: 7"));
}
