//! The capability interface the phenotype algorithms read from.
//!
//! A data source supplies three primitives: the subject index, the column
//! index, and column-wise cell iteration. Every query is built on those and
//! runs one pass per resolved column, so cost is linear in
//! subjects × columns.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};
use ukb_common::is_missing_code;
use ukb_model::{Sex, SubjectIndex, TriColumn, TriValue};

use crate::aggregate::{Aggregate, Earliest, First};
use crate::index::ColumnRef;
use crate::instances::InstanceFilter;
use crate::values::ValueSet;

/// UK Biobank field holding sex.
pub const SEX_FIELD: &str = "31";

/// Column-wise cell iterator.
pub type Cells<'a> = Box<dyn Iterator<Item = Option<&'a str>> + 'a>;

/// Read access to a wide, field × instance × slot table.
pub trait FieldSource {
    /// Subject identity; every returned series is aligned to it.
    fn subjects(&self) -> &SubjectIndex;

    /// Columns of `field`, ordered by (instance, slot). Empty when absent.
    fn columns_for(&self, field: &str) -> &[ColumnRef];

    /// Canonical cell values of `column`, one per subject, `None` when blank.
    fn cells<'a>(&'a self, column: &ColumnRef) -> Cells<'a>;

    fn has_field(&self, field: &str) -> bool {
        !self.columns_for(field).is_empty()
    }

    /// Does any column of `fields` hold a code from `values`?
    ///
    /// Per subject: `True` on a match; `False` when at least one informative
    /// cell exists and none matches; `Unknown` when every cell is blank or a
    /// missing sentinel. Only instances allowed by `filter` are read. A field
    /// with no columns at all yields `Unknown` for everyone.
    fn presence(
        &self,
        fields: &[&str],
        values: &ValueSet,
        filter: Option<&InstanceFilter>,
    ) -> TriColumn {
        let len = self.subjects().len();
        let columns = resolve(self, fields);
        if columns.is_empty() {
            warn!(fields = ?fields, "field absent from data; evidence defaults to Unknown");
            return TriColumn::unknown(len);
        }

        let mut matched = vec![false; len];
        let mut informative = vec![false; len];
        for column in &columns {
            for (idx, cell) in self.cells(column).enumerate().take(len) {
                if let Some(filter) = filter
                    && !filter.allows(idx, column.instance)
                {
                    continue;
                }
                let Some(code) = cell else {
                    continue;
                };
                if is_missing_code(code) {
                    continue;
                }
                informative[idx] = true;
                if values.contains(code) {
                    matched[idx] = true;
                }
            }
        }

        let out: TriColumn = matched
            .iter()
            .zip(&informative)
            .map(|(&hit, &seen)| match (hit, seen) {
                (true, _) => TriValue::True,
                (false, true) => TriValue::False,
                (false, false) => TriValue::Unknown,
            })
            .collect();
        debug!(
            fields = ?fields,
            columns = columns.len(),
            found = out.count_true(),
            unknown = out.count_unknown(),
            "presence"
        );
        out
    }

    /// Values of `target` taken from the slots where `lookup` holds a code
    /// from `values`, reduced per subject by `aggregate`.
    ///
    /// Target and lookup columns are paired by (instance, slot). Missing
    /// sentinels in the target are skipped. Target cells the aggregate cannot
    /// type are skipped too and reported with one warning for the field.
    fn interpolate<A: Aggregate>(
        &self,
        target: &str,
        lookup: &str,
        values: &ValueSet,
        aggregate: &A,
    ) -> Vec<Option<A::Output>> {
        let len = self.subjects().len();
        let targets = self.columns_for(target);
        let lookups: HashMap<(u32, u32), &ColumnRef> = self
            .columns_for(lookup)
            .iter()
            .map(|column| ((column.instance, column.slot), column))
            .collect();
        if targets.is_empty() || lookups.is_empty() {
            warn!(
                target_field = target,
                lookup_field = lookup,
                "field absent from data; interpolation defaults to Unknown"
            );
            return (0..len).map(|_| None).collect();
        }

        let mut gathered: Vec<Vec<&str>> = vec![Vec::new(); len];
        let mut rejected = vec![0usize; len];
        let mut pairs = 0usize;
        for column in targets {
            let Some(partner) = lookups.get(&(column.instance, column.slot)) else {
                continue;
            };
            pairs += 1;
            for (idx, (value, key)) in self
                .cells(column)
                .zip(self.cells(partner))
                .enumerate()
                .take(len)
            {
                if let (Some(value), Some(key)) = (value, key)
                    && values.contains(key)
                    && !is_missing_code(value)
                {
                    if aggregate.accepts(value) {
                        gathered[idx].push(value);
                    } else {
                        rejected[idx] += 1;
                    }
                }
            }
        }
        debug!(
            target_field = target,
            lookup_field = lookup,
            pairs,
            "interpolate"
        );
        let out: Vec<Option<A::Output>> = gathered
            .iter()
            .map(|cells| aggregate.aggregate(cells))
            .collect();
        report_untyped(target, &rejected, &out);
        out
    }

    /// Reduce every informative cell of `field`, optionally restricted to one
    /// instance. Cells the aggregate cannot type are skipped and reported.
    fn summarize<A: Aggregate>(
        &self,
        field: &str,
        instance: Option<u32>,
        aggregate: &A,
    ) -> Vec<Option<A::Output>> {
        let len = self.subjects().len();
        let columns: Vec<&ColumnRef> = self
            .columns_for(field)
            .iter()
            .filter(|column| instance.is_none_or(|wanted| column.instance == wanted))
            .collect();
        if columns.is_empty() {
            warn!(field, ?instance, "field absent from data; values default to Unknown");
        }
        let mut gathered: Vec<Vec<&str>> = vec![Vec::new(); len];
        let mut rejected = vec![0usize; len];
        for column in columns {
            for (idx, cell) in self.cells(column).enumerate().take(len) {
                if let Some(cell) = cell
                    && !is_missing_code(cell)
                {
                    if aggregate.accepts(cell) {
                        gathered[idx].push(cell);
                    } else {
                        rejected[idx] += 1;
                    }
                }
            }
        }
        let out: Vec<Option<A::Output>> = gathered
            .iter()
            .map(|cells| aggregate.aggregate(cells))
            .collect();
        report_untyped(field, &rejected, &out);
        out
    }

    /// Earliest date across every column of `fields`; `None` when all blank.
    fn earliest_date(&self, fields: &[&str]) -> Vec<Option<NaiveDate>> {
        let len = self.subjects().len();
        let mut earliest: Vec<Option<NaiveDate>> = vec![None; len];
        for field in fields {
            let dates = self.summarize(field, None, &Earliest);
            for (slot, date) in earliest.iter_mut().zip(dates) {
                *slot = match (*slot, date) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                };
            }
        }
        earliest
    }

    /// Sex from field 31; `None` when missing or not coded 0/1.
    fn sex(&self) -> Vec<Option<Sex>> {
        self.summarize(SEX_FIELD, None, &First)
            .into_iter()
            .map(|code| code.as_deref().and_then(Sex::from_code))
            .collect()
    }
}

fn resolve<'a, S: FieldSource + ?Sized>(source: &'a S, fields: &[&str]) -> Vec<&'a ColumnRef> {
    fields
        .iter()
        .flat_map(|field| source.columns_for(field))
        .collect()
}

/// One warning per field for cells that could not be typed. `subjects`
/// counts those left without any value because of it.
fn report_untyped<T>(field: &str, rejected: &[usize], out: &[Option<T>]) {
    let cells: usize = rejected.iter().sum();
    if cells == 0 {
        return;
    }
    let subjects = rejected
        .iter()
        .zip(out)
        .filter(|(count, value)| **count > 0 && value.is_none())
        .count();
    warn!(field, cells, subjects, "untyped cells defaulted to Unknown");
}
