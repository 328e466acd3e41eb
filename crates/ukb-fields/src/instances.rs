//! Which assessment instances may contribute evidence for each subject.

use chrono::NaiveDate;
use tracing::{info, warn};
use ukb_common::{is_missing_code, parse_date};

use crate::source::FieldSource;

/// UK Biobank field holding the assessment-centre visit date per instance.
pub const ASSESSMENT_DATE_FIELD: &str = "53";

/// Per-subject set of allowed instance numbers (0..64).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceFilter {
    allowed: Vec<u64>,
}

impl InstanceFilter {
    /// Build from explicit instance lists, one per subject.
    pub fn from_instances<I, J>(subjects: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = u32>,
    {
        let allowed = subjects
            .into_iter()
            .map(|instances| {
                instances
                    .into_iter()
                    .filter(|instance| *instance < 64)
                    .fold(0u64, |mask, instance| mask | (1 << instance))
            })
            .collect();
        Self { allowed }
    }

    /// Instances whose assessment date is on or before `cutoff`.
    ///
    /// Returns `None` when the source has no assessment-date columns; callers
    /// then read every instance.
    pub fn assessed_on_or_before<S: FieldSource + ?Sized>(
        source: &S,
        cutoff: NaiveDate,
    ) -> Option<Self> {
        let columns = source.columns_for(ASSESSMENT_DATE_FIELD);
        if columns.is_empty() {
            warn!(
                field = ASSESSMENT_DATE_FIELD,
                "assessment dates absent; evidence from every instance is used"
            );
            return None;
        }
        let len = source.subjects().len();
        let mut allowed = vec![0u64; len];
        let mut untyped = 0usize;
        for column in columns {
            if column.instance >= 64 {
                continue;
            }
            for (idx, cell) in source.cells(column).enumerate().take(len) {
                let Some(cell) = cell else {
                    continue;
                };
                match parse_date(cell) {
                    Some(date) if date <= cutoff => allowed[idx] |= 1 << column.instance,
                    Some(_) => {}
                    None if is_missing_code(cell) => {}
                    None => untyped += 1,
                }
            }
        }
        if untyped > 0 {
            warn!(
                field = ASSESSMENT_DATE_FIELD,
                cells = untyped,
                "untyped cells defaulted to Unknown"
            );
        }
        let none = allowed.iter().filter(|mask| **mask == 0).count();
        info!(%cutoff, subjects_without_instances = none, "instance filter built");
        Some(Self { allowed })
    }

    /// Out-of-range subjects are not allowed anything.
    pub fn allows(&self, subject: usize, instance: u32) -> bool {
        instance < 64
            && self
                .allowed
                .get(subject)
                .is_some_and(|mask| mask & (1 << instance) != 0)
    }

    /// Allowed instances of one subject, ascending.
    pub fn instances(&self, subject: usize) -> Vec<u32> {
        (0..64).filter(|instance| self.allows(subject, *instance)).collect()
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_instances() {
        let filter = InstanceFilter::from_instances(vec![vec![0, 2], vec![], vec![1]]);
        assert!(filter.allows(0, 0));
        assert!(!filter.allows(0, 1));
        assert!(filter.allows(0, 2));
        assert!(!filter.allows(1, 0));
        assert_eq!(filter.instances(2), vec![1]);
        assert!(!filter.allows(7, 0));
    }
}
