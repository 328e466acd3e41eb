//! Polars-backed [`FieldSource`] over a UK Biobank extract.

use polars::prelude::*;
use tracing::{debug, info, warn};
use ukb_common::canonical_code;
use ukb_model::SubjectIndex;

use crate::error::{FieldError, Result};
use crate::index::{ColumnRef, FieldIndex};
use crate::name::{ID_COLUMNS, is_id_column, parse_column_name};
use crate::source::{Cells, FieldSource};

/// A wide extract: one row per subject, one column per field/instance/slot.
///
/// Field columns are cast to text and canonicalized once at construction.
/// Columns whose names are not field columns are ignored.
#[derive(Debug, Clone)]
pub struct UkbTable {
    subjects: SubjectIndex,
    index: FieldIndex,
    columns: Vec<StringChunked>,
}

impl UkbTable {
    pub fn new(df: &DataFrame) -> Result<Self> {
        let id_name = df
            .get_column_names()
            .into_iter()
            .find(|name| is_id_column(name.as_str()))
            .ok_or_else(|| FieldError::MissingIdColumn {
                expected: ID_COLUMNS.join(", "),
            })?
            .clone();

        let ids = df.column(id_name.as_str())?.cast(&DataType::String)?;
        let subjects = SubjectIndex::new(
            ids.str()?
                .into_iter()
                .map(|id| id.unwrap_or_default()),
        )?;

        let mut refs = Vec::new();
        let mut columns = Vec::new();
        let mut has_data = vec![false; df.height()];
        for column in df.get_columns() {
            let name = column.name().as_str();
            if name == id_name.as_str() {
                continue;
            }
            let Some(key) = parse_column_name(name) else {
                debug!(column = name, "ignoring non-field column");
                continue;
            };
            let text = column.cast(&DataType::String)?;
            let canonical: StringChunked = text
                .str()?
                .into_iter()
                .map(|cell| cell.and_then(canonical_code))
                .collect();
            for (idx, cell) in canonical.iter().enumerate() {
                if cell.is_some() {
                    has_data[idx] = true;
                }
            }
            refs.push(ColumnRef::new(name, columns.len(), key));
            columns.push(canonical.with_name(name.into()));
        }

        let empty = has_data.iter().filter(|seen| !**seen).count();
        if empty > 0 {
            warn!(subjects = empty, "subjects without any field data");
        }
        let index = FieldIndex::from_columns(refs);
        info!(
            subjects = subjects.len(),
            fields = index.len(),
            columns = columns.len(),
            "field index built"
        );
        Ok(Self {
            subjects,
            index,
            columns,
        })
    }

    pub fn index(&self) -> &FieldIndex {
        &self.index
    }

    /// Subject ids as a Polars column named `eid`.
    pub fn id_column(&self) -> Column {
        Series::new("eid".into(), self.subjects.ids()).into_column()
    }
}

impl FieldSource for UkbTable {
    fn subjects(&self) -> &SubjectIndex {
        &self.subjects
    }

    fn columns_for(&self, field: &str) -> &[ColumnRef] {
        self.index.columns_for(field)
    }

    fn cells<'a>(&'a self, column: &ColumnRef) -> Cells<'a> {
        match self.columns.get(column.position) {
            Some(values) => Box::new(values.iter()),
            None => Box::new(std::iter::repeat_n(None, self.subjects.len())),
        }
    }
}
