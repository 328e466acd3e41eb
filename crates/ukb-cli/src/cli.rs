//! CLI argument definitions for `ukb-pheno`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use ukb_common::parse_date;
use ukb_model::PrevalenceStyle;

#[derive(Parser)]
#[command(
    name = "ukb-pheno",
    version,
    about = "Diabetes phenotypes for UK Biobank extracts",
    long_about = "Derive prevalent and incident diabetes for UK Biobank subjects.\n\n\
                  Implements the adjudication algorithms of Eastwood et al. (2016),\n\
                  PLoS ONE 11(9): e0162388."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify prevalent diabetes at baseline (Eastwood 2016, Fig 2).
    Prevalence(PrevalenceArgs),

    /// Find incident diabetes after baseline (Eastwood 2016, Fig 3, algorithm B).
    Incidence(IncidenceArgs),
}

#[derive(Args)]
pub struct CommonArgs {
    /// UK Biobank extract (CSV, or tab-separated for .tab/.tsv/.txt).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV with the subject id, sex and derived columns.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Baseline date (YYYY-MM-DD). Defaults to the end of assessment, 2010-08-01.
    #[arg(long = "baseline", value_name = "DATE", value_parser = parse_date_arg)]
    pub baseline: Option<NaiveDate>,

    /// How prevalence is written.
    #[arg(long = "style", value_enum, default_value = "eastwood")]
    pub style: StyleArg,

    /// Trace the evidence and stage outcomes of one subject id.
    #[arg(long = "debug-subject", value_name = "EID")]
    pub debug_subject: Option<String>,
}

#[derive(Args)]
pub struct PrevalenceArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args)]
pub struct IncidenceArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Ignore diagnoses on or after this date (YYYY-MM-DD).
    #[arg(long = "end-date", value_name = "DATE", value_parser = parse_date_arg)]
    pub end_date: Option<NaiveDate>,

    /// Report interval indexes of this many days instead of dates.
    #[arg(long = "interval-days", value_name = "DAYS")]
    pub interval_days: Option<i64>,
}

/// Prevalence output styles.
#[derive(Clone, Copy, ValueEnum)]
pub enum StyleArg {
    /// Category labels.
    Eastwood,
    /// 1 = possible/probable type 1, 0 = diabetes unlikely.
    T1d,
    /// 1 = possible/probable type 2, 0 = diabetes unlikely.
    T2d,
}

impl From<StyleArg> for PrevalenceStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Eastwood => PrevalenceStyle::Eastwood,
            StyleArg::T1d => PrevalenceStyle::T1d,
            StyleArg::T2d => PrevalenceStyle::T2d,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_incidence_args() {
        let cli = Cli::try_parse_from([
            "ukb-pheno",
            "incidence",
            "ukb.csv",
            "-o",
            "out.csv",
            "--baseline",
            "2011-01-01",
            "--interval-days",
            "365",
            "--style",
            "t2d",
        ])
        .unwrap();
        let Command::Incidence(args) = cli.command else {
            panic!("expected incidence");
        };
        assert_eq!(args.common.baseline, NaiveDate::from_ymd_opt(2011, 1, 1));
        assert_eq!(args.interval_days, Some(365));
        assert_eq!(
            PrevalenceStyle::from(args.common.style),
            PrevalenceStyle::T2d
        );
        assert!(args.end_date.is_none());
    }

    #[test]
    fn test_rejects_bad_date() {
        let parsed = Cli::try_parse_from([
            "ukb-pheno",
            "prevalence",
            "ukb.csv",
            "-o",
            "out.csv",
            "--baseline",
            "first of may",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_output_is_required() {
        assert!(Cli::try_parse_from(["ukb-pheno", "prevalence", "ukb.csv"]).is_err());
    }
}
