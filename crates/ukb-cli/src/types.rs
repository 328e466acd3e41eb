use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use ukb_diabetes::{RuleCount, Subtype};
use ukb_model::Category;

/// Outcome of one command, for the summary tables.
#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub baseline: NaiveDate,
    pub subjects: usize,
    pub categories: BTreeMap<Category, usize>,
    pub rules: Vec<RuleCount>,
    /// Incident events per subtype; empty for prevalence runs.
    pub incidence: Vec<(Subtype, usize)>,
}
