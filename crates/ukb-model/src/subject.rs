//! Stable subject identity shared by every per-subject series.

use std::collections::HashMap;

use crate::{ModelError, Result};

/// Ordered, unique subject identifiers.
///
/// Position `i` of every evidence column, category vector and incidence series
/// refers to `ids()[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectIndex {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
}

impl SubjectIndex {
    /// Build an index, rejecting empty and duplicate identifiers.
    pub fn new<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        for (row, id) in ids.into_iter().enumerate() {
            let id = id.into().trim().to_string();
            if id.is_empty() {
                return Err(ModelError::EmptySubjectId { row });
            }
            if index.positions.insert(id.clone(), row).is_some() {
                return Err(ModelError::DuplicateSubject { id });
            }
            index.ids.push(id);
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn id(&self, idx: usize) -> Option<&str> {
        self.ids.get(idx).map(String::as_str)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id.trim()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        let index = SubjectIndex::new(["1001", "1002"]).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.position("1002"), Some(1));
        assert_eq!(index.id(0), Some("1001"));
        assert_eq!(index.position("9999"), None);
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = SubjectIndex::new(["1001", "1002", " 1001"]).unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateSubject {
                id: "1001".to_string()
            }
        );
    }

    #[test]
    fn test_empty_rejected() {
        let err = SubjectIndex::new(["1001", ""]).unwrap_err();
        assert_eq!(err, ModelError::EmptySubjectId { row: 1 });
    }
}
