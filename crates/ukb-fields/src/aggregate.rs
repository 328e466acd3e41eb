//! Per-subject reductions over the cells gathered by a field query.

use chrono::NaiveDate;
use ukb_common::{parse_date, parse_f64};

use crate::error::{FieldError, Result};

/// Reduce the non-missing cells collected for one subject.
///
/// Cells arrive in (instance, slot) order and never contain the
/// "do not know" / "prefer not to answer" sentinels.
pub trait Aggregate {
    type Output;

    fn aggregate(&self, cells: &[&str]) -> Option<Self::Output>;

    /// Whether `cell` can be read as this aggregate's input type. Rejected
    /// cells are left out of [`Aggregate::aggregate`].
    fn accepts(&self, _cell: &str) -> bool {
        true
    }
}

/// Arithmetic mean of the numeric cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

impl Aggregate for Mean {
    type Output = f64;

    fn aggregate(&self, cells: &[&str]) -> Option<f64> {
        let values: Vec<f64> = cells.iter().filter_map(|cell| parse_f64(cell)).collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    fn accepts(&self, cell: &str) -> bool {
        parse_f64(cell).is_some()
    }
}

/// First cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct First;

impl Aggregate for First {
    type Output = String;

    fn aggregate(&self, cells: &[&str]) -> Option<String> {
        cells.first().map(|cell| (*cell).to_string())
    }
}

/// Earliest parseable date.
#[derive(Debug, Clone, Copy, Default)]
pub struct Earliest;

impl Aggregate for Earliest {
    type Output = NaiveDate;

    fn aggregate(&self, cells: &[&str]) -> Option<NaiveDate> {
        cells.iter().filter_map(|cell| parse_date(cell)).min()
    }

    fn accepts(&self, cell: &str) -> bool {
        parse_date(cell).is_some()
    }
}

/// Row-wise minimum over several per-subject date series.
///
/// # Errors
///
/// Returns [`FieldError::LengthMismatch`] if the series differ in length.
pub fn earliest_of(series: &[&[Option<NaiveDate>]]) -> Result<Vec<Option<NaiveDate>>> {
    let len = series.first().map_or(0, |dates| dates.len());
    if let Some(dates) = series.iter().find(|dates| dates.len() != len) {
        return Err(FieldError::LengthMismatch {
            expected: len,
            found: dates.len(),
        });
    }
    Ok((0..len)
        .map(|idx| series.iter().filter_map(|dates| dates[idx]).min())
        .collect())
}
