//! Precomputed field index: concept code to its concrete columns.

use std::collections::HashMap;

use tracing::debug;

use crate::name::FieldKey;

/// A concrete column belonging to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Original column name.
    pub name: String,
    /// Position in the source's column storage.
    pub position: usize,
    pub field: String,
    pub instance: u32,
    pub slot: u32,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>, position: usize, key: FieldKey) -> Self {
        Self {
            name: name.into(),
            position,
            field: key.field,
            instance: key.instance,
            slot: key.slot,
        }
    }
}

/// Field code to columns, ordered by (instance, slot).
///
/// Built once per table. Lookups are exact on the field code, so `2000`
/// never resolves to the columns of `20002`.
#[derive(Debug, Clone, Default)]
pub struct FieldIndex {
    by_field: HashMap<String, Vec<ColumnRef>>,
}

impl FieldIndex {
    pub fn from_columns<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = ColumnRef>,
    {
        let mut by_field: HashMap<String, Vec<ColumnRef>> = HashMap::new();
        for column in columns {
            by_field.entry(column.field.clone()).or_default().push(column);
        }
        for (field, columns) in &mut by_field {
            columns.sort_by_key(|column| (column.instance, column.slot));
            debug!(field = %field, columns = columns.len(), "indexed field");
        }
        Self { by_field }
    }

    /// Columns for `field`; empty when the field is absent.
    pub fn columns_for(&self, field: &str) -> &[ColumnRef] {
        self.by_field.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.by_field.contains_key(field)
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    /// Field codes in ascending numeric order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.by_field.keys().map(String::as_str).collect();
        fields.sort_by_key(|field| (field.len(), *field));
        fields
    }
}
