//! Prevalent diabetes classification.
//!
//! Every subject starts unclassified. Stage A assigns each subject one of
//! its rule outcomes or the stage default; stages B and C then refine the
//! possible type 1 and possible type 2 pools. Within a stage a rule only
//! sees the subjects no earlier rule matched.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use polars::prelude::{Column, IntoColumn, NamedFrom, Series};
use tracing::{info, trace, warn};
use ukb_fields::FieldSource;
use ukb_model::{Category, PrevalenceStyle, StyledValue, SubjectIndex};

use crate::config::PrevalenceConfig;
use crate::error::{DiabetesError, Result};
use crate::evidence::{Evidence, EvidenceRow};
use crate::rules::{Stage, flowchart};

/// Name of the prevalence output column.
pub const PREVALENCE_COLUMN: &str = "Prevalence";

/// How many subjects one rule assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleCount {
    pub stage: &'static str,
    pub rule: &'static str,
    pub outcome: Category,
    /// True for the catch-all that closes a stage.
    pub is_default: bool,
    pub assigned: usize,
    /// Subjects left in the stage pool afterwards.
    pub remaining: usize,
}

/// Runs the three stages over prepared [`Evidence`].
#[derive(Debug, Clone)]
pub struct PrevalenceClassifier {
    config: PrevalenceConfig,
    stages: [Stage; 3],
}

impl PrevalenceClassifier {
    pub fn new(config: PrevalenceConfig) -> Self {
        Self {
            config,
            stages: flowchart(),
        }
    }

    pub fn config(&self) -> &PrevalenceConfig {
        &self.config
    }

    /// Classify every subject of `evidence`.
    ///
    /// # Errors
    ///
    /// Returns [`DiabetesError::Unclassified`] if any subject is left
    /// without a category after all stages ran.
    pub fn classify(&self, evidence: &Evidence) -> Result<PrevalenceResult> {
        if evidence.baseline() != self.config.baseline() {
            warn!(
                evidence_baseline = %evidence.baseline(),
                config_baseline = %self.config.baseline(),
                "evidence was built for a different baseline; using the evidence baseline"
            );
        }
        let rows: Vec<EvidenceRow> = (0..evidence.len()).map(|idx| evidence.row(idx)).collect();
        let debug = self.debug_position(evidence.subjects());
        if let Some((subject, idx)) = debug {
            trace!(subject, row = ?rows[idx], "evidence row");
        }

        let mut state: Vec<Option<Category>> = vec![None; rows.len()];
        let mut counts = Vec::new();
        for stage in &self.stages {
            run_stage(stage, &rows, &mut state, &mut counts);
            if let Some((subject, idx)) = debug {
                trace!(subject, stage = stage.name, category = ?state[idx], "stage complete");
            }
        }

        let unclassified = state.iter().filter(|category| category.is_none()).count();
        if unclassified > 0 {
            return Err(DiabetesError::Unclassified {
                count: unclassified,
            });
        }
        let result = PrevalenceResult {
            subjects: evidence.subjects().clone(),
            baseline: evidence.baseline(),
            categories: state.into_iter().flatten().collect(),
            trace: counts,
        };
        for (category, subjects) in result.counts() {
            info!(%category, subjects, "prevalence");
        }
        Ok(result)
    }

    fn debug_position<'a>(&'a self, subjects: &SubjectIndex) -> Option<(&'a str, usize)> {
        let subject = self.config.debug_subject()?;
        match subjects.position(subject) {
            Some(idx) => Some((subject, idx)),
            None => {
                warn!(subject, "debug subject not found");
                None
            }
        }
    }
}

/// Apply one stage to the subjects currently holding its entry category.
fn run_stage(
    stage: &Stage,
    rows: &[EvidenceRow],
    state: &mut [Option<Category>],
    counts: &mut Vec<RuleCount>,
) {
    let mut pool: Vec<usize> = (0..rows.len())
        .filter(|&idx| state[idx] == stage.entry)
        .collect();
    info!(stage = stage.name, subjects = pool.len(), "stage entered");

    for rule in &stage.rules {
        let (matched, rest): (Vec<usize>, Vec<usize>) =
            pool.into_iter().partition(|&idx| rule.fires(&rows[idx]));
        for &idx in &matched {
            state[idx] = Some(rule.outcome);
        }
        pool = rest;
        info!(
            stage = stage.name,
            rule = rule.id,
            outcome = %rule.outcome,
            assigned = matched.len(),
            remaining = pool.len(),
            "{}",
            rule.description
        );
        counts.push(RuleCount {
            stage: stage.name,
            rule: rule.id,
            outcome: rule.outcome,
            is_default: false,
            assigned: matched.len(),
            remaining: pool.len(),
        });
    }

    for &idx in &pool {
        state[idx] = Some(stage.default);
    }
    info!(
        stage = stage.name,
        rule = stage.default_id,
        outcome = %stage.default,
        assigned = pool.len(),
        "stage default"
    );
    counts.push(RuleCount {
        stage: stage.name,
        rule: stage.default_id,
        outcome: stage.default,
        is_default: true,
        assigned: pool.len(),
        remaining: 0,
    });
}

/// One terminal category per subject.
#[derive(Debug, Clone, PartialEq)]
pub struct PrevalenceResult {
    subjects: SubjectIndex,
    baseline: NaiveDate,
    categories: Vec<Category>,
    trace: Vec<RuleCount>,
}

impl PrevalenceResult {
    pub fn subjects(&self) -> &SubjectIndex {
        &self.subjects
    }

    /// Baseline the in-patient evidence was cut at.
    pub fn baseline(&self) -> NaiveDate {
        self.baseline
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, idx: usize) -> Option<Category> {
        self.categories.get(idx).copied()
    }

    pub fn category_of(&self, subject: &str) -> Option<Category> {
        self.subjects
            .position(subject)
            .and_then(|idx| self.get(idx))
    }

    /// Probable type 1 or type 2 at baseline.
    pub fn is_prevalent(&self, idx: usize) -> bool {
        self.get(idx).is_some_and(|category| category.is_prevalent())
    }

    /// Subjects per category; categories nobody holds are included with 0.
    pub fn counts(&self) -> BTreeMap<Category, usize> {
        let mut counts: BTreeMap<Category, usize> =
            Category::ALL.into_iter().map(|category| (category, 0)).collect();
        for category in &self.categories {
            *counts.entry(*category).or_default() += 1;
        }
        counts
    }

    /// Per-rule assignment counts, in execution order.
    pub fn trace(&self) -> &[RuleCount] {
        &self.trace
    }

    /// The `Prevalence` output column in the requested style. Labels are
    /// text; the binary styles are nullable integers.
    pub fn to_column(&self, style: PrevalenceStyle) -> Column {
        let styled = self.categories.iter().map(|category| style.apply(*category));
        match style {
            PrevalenceStyle::Eastwood => {
                let labels: Vec<Option<&str>> = styled
                    .map(|value| match value {
                        StyledValue::Label(label) => Some(label),
                        StyledValue::Binary(_) => None,
                    })
                    .collect();
                Series::new(PREVALENCE_COLUMN.into(), labels).into_column()
            }
            PrevalenceStyle::T1d | PrevalenceStyle::T2d => {
                let values: Vec<Option<i32>> = styled
                    .map(|value| match value {
                        StyledValue::Binary(value) => value.map(i32::from),
                        StyledValue::Label(_) => None,
                    })
                    .collect();
                Series::new(PREVALENCE_COLUMN.into(), values).into_column()
            }
        }
    }
}

/// Build evidence from `source` at the configured baseline and classify it.
pub fn prevalence<S: FieldSource>(
    source: &S,
    config: &PrevalenceConfig,
) -> Result<(Evidence, PrevalenceResult)> {
    let evidence = Evidence::build(source, config.baseline())?;
    let result = PrevalenceClassifier::new(config.clone()).classify(&evidence)?;
    Ok((evidence, result))
}
