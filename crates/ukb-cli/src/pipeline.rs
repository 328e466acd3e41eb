//! Load an extract, derive the phenotypes and write the output table.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, SerWriter, Series};
use tracing::info;
use ukb_diabetes::{
    Evidence, IncidenceCalculator, IncidenceConfig, IncidenceResult, PrevalenceConfig,
    PrevalenceResult, prevalence,
};
use ukb_fields::{FieldSource, ReadOptions, UkbTable, read_ukb_csv_with_options};
use ukb_model::{PrevalenceStyle, Sex};

/// Name of the sex column in the output table.
pub const SEX_COLUMN: &str = "SEX";

/// Everything derived by a prevalence run.
#[derive(Debug)]
pub struct PrevalenceRun {
    pub table: UkbTable,
    pub evidence: Evidence,
    pub prevalence: PrevalenceResult,
}

/// Read `path` with the separator implied by its extension and index its
/// field columns.
pub fn load_table(path: &Path) -> Result<UkbTable> {
    let options = ReadOptions::for_path(path);
    let df = read_ukb_csv_with_options(path, &options)
        .with_context(|| format!("failed to read {}", path.display()))?;
    UkbTable::new(&df).with_context(|| format!("failed to index fields of {}", path.display()))
}

pub fn run_prevalence(path: &Path, config: &PrevalenceConfig) -> Result<PrevalenceRun> {
    let table = load_table(path)?;
    let (evidence, prevalence) = prevalence(&table, config)?;
    Ok(PrevalenceRun {
        table,
        evidence,
        prevalence,
    })
}

/// Prevalence at the incidence baseline, then incidence.
pub fn run_incidence(
    path: &Path,
    prevalence_config: &PrevalenceConfig,
    incidence_config: IncidenceConfig,
) -> Result<(PrevalenceRun, IncidenceResult)> {
    let run = run_prevalence(path, prevalence_config)?;
    let incidence = IncidenceCalculator::new(incidence_config)
        .calculate(&run.prevalence, run.evidence.inpatient())?;
    Ok((run, incidence))
}

/// Subject id, sex, prevalence and, when given, the incidence columns.
pub fn output_frame(
    table: &UkbTable,
    prevalence: &PrevalenceResult,
    style: PrevalenceStyle,
    incidence: Option<&IncidenceResult>,
) -> Result<DataFrame> {
    let mut columns = vec![table.id_column(), sex_column(table), prevalence.to_column(style)];
    if let Some(incidence) = incidence {
        columns.extend(incidence.columns());
    }
    Ok(DataFrame::new(columns)?)
}

fn sex_column(table: &UkbTable) -> Column {
    let codes: Vec<Option<&str>> = table
        .sex()
        .iter()
        .map(|sex| sex.as_ref().map(Sex::as_code))
        .collect();
    Series::new(SEX_COLUMN.into(), codes).into_column()
}

pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), rows = df.height(), "wrote output");
    Ok(())
}
