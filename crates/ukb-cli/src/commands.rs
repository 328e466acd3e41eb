use anyhow::Result;
use tracing::info_span;
use ukb_diabetes::{IncidenceConfig, PrevalenceConfig, Subtype, UKB_ASSESSMENT_END};
use ukb_cli::pipeline::{output_frame, run_incidence, run_prevalence, write_csv};

use crate::cli::{CommonArgs, IncidenceArgs, PrevalenceArgs};
use crate::types::RunResult;

pub fn run_prevalence_command(args: &PrevalenceArgs) -> Result<RunResult> {
    let common = &args.common;
    let _span = info_span!("prevalence", input = %common.input.display()).entered();
    let config = prevalence_config(common)?;
    let run = run_prevalence(&common.input, &config)?;
    let mut df = output_frame(&run.table, &run.prevalence, config.style(), None)?;
    write_csv(&mut df, &common.output)?;
    Ok(RunResult {
        input: common.input.clone(),
        output: common.output.clone(),
        baseline: config.baseline(),
        subjects: run.prevalence.len(),
        categories: run.prevalence.counts(),
        rules: run.prevalence.trace().to_vec(),
        incidence: Vec::new(),
    })
}

pub fn run_incidence_command(args: &IncidenceArgs) -> Result<RunResult> {
    let common = &args.common;
    let _span = info_span!("incidence", input = %common.input.display()).entered();
    let baseline = common.baseline.unwrap_or(UKB_ASSESSMENT_END);
    let mut incidence_config = IncidenceConfig::new(baseline)?;
    if let Some(end_date) = args.end_date {
        incidence_config = incidence_config.with_end_date(end_date)?;
    }
    if let Some(days) = args.interval_days {
        incidence_config = incidence_config.with_interval(days)?;
    }
    let prevalence_config = prevalence_config(common)?;
    let (run, incidence) = run_incidence(&common.input, &prevalence_config, incidence_config)?;
    let mut df = output_frame(
        &run.table,
        &run.prevalence,
        prevalence_config.style(),
        Some(&incidence),
    )?;
    write_csv(&mut df, &common.output)?;
    let events = Subtype::ALL
        .into_iter()
        .map(|subtype| {
            let count = incidence
                .events(subtype)
                .iter()
                .filter(|date| date.is_some())
                .count();
            (subtype, count)
        })
        .collect();
    Ok(RunResult {
        input: common.input.clone(),
        output: common.output.clone(),
        baseline,
        subjects: run.prevalence.len(),
        categories: run.prevalence.counts(),
        rules: run.prevalence.trace().to_vec(),
        incidence: events,
    })
}

fn prevalence_config(common: &CommonArgs) -> Result<PrevalenceConfig> {
    let mut config = match common.baseline {
        Some(baseline) => PrevalenceConfig::new(baseline)?,
        None => PrevalenceConfig::default(),
    };
    config = config.with_style(common.style.into());
    if let Some(subject) = &common.debug_subject {
        config = config.with_debug_subject(subject.as_str());
    }
    Ok(config)
}
