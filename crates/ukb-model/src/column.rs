//! Column-wise containers for per-subject evidence.

use std::ops::Index;

use crate::{ModelError, Result, TriValue};

/// One [`TriValue`] per subject, in subject-index order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriColumn {
    values: Vec<TriValue>,
}

impl TriColumn {
    pub fn new(values: Vec<TriValue>) -> Self {
        Self { values }
    }

    /// A column where every subject is `Unknown`.
    pub fn unknown(len: usize) -> Self {
        Self {
            values: vec![TriValue::Unknown; len],
        }
    }

    pub fn from_bools<I>(values: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        values.into_iter().map(TriValue::from).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<TriValue> {
        self.values.get(idx).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = TriValue> + '_ {
        self.values.iter().copied()
    }

    pub fn as_slice(&self) -> &[TriValue] {
        &self.values
    }

    pub fn count_true(&self) -> usize {
        self.values.iter().filter(|value| value.is_true()).count()
    }

    pub fn count_unknown(&self) -> usize {
        self.values.iter().filter(|value| value.is_unknown()).count()
    }

    /// Element-wise negation.
    pub fn negate(&self) -> Self {
        self.values.iter().map(|value| !*value).collect()
    }

    /// Combine several equally long columns row by row with one of the
    /// reductions from [`crate::logic`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::LengthMismatch`] if the columns differ in length.
    pub fn combine(columns: &[&TriColumn], reduce: fn(&[TriValue]) -> TriValue) -> Result<Self> {
        let len = columns.first().map_or(0, |column| column.len());
        if let Some(column) = columns.iter().find(|column| column.len() != len) {
            return Err(ModelError::LengthMismatch {
                expected: len,
                found: column.len(),
            });
        }
        let mut row = Vec::with_capacity(columns.len());
        let mut out = Vec::with_capacity(len);
        for idx in 0..len {
            row.clear();
            row.extend(columns.iter().map(|column| column.values[idx]));
            out.push(reduce(&row));
        }
        Ok(Self { values: out })
    }
}

impl FromIterator<TriValue> for TriColumn {
    fn from_iter<I: IntoIterator<Item = TriValue>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for TriColumn {
    type Output = TriValue;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.values[idx]
    }
}
