//! Row-wise combinators over [`TriValue`].
//!
//! Three semantics exist in the classification rules and are kept apart on
//! purpose. None of them may be swapped for another without re-deriving the
//! affected rule from the clinical flowchart.
//!
//! - [`kleene`]: a determining element wins over `Unknown`.
//! - [`strict`]: any `Unknown` makes the result `Unknown`.
//! - [`collapsing`]: `Unknown` is skipped and never survives; the result is
//!   always `True` or `False`.
//!
//! All functions treat an empty row as the identity of the operation
//! (`and` of nothing is `True`, `or` of nothing is `False`).

use crate::TriValue;

/// Kleene (CQL-style) three-valued logic.
pub mod kleene {
    use super::TriValue;

    /// Kleene conjunction.
    ///
    /// | A       | B       | A and B |
    /// |---------|---------|---------|
    /// | true    | true    | true    |
    /// | true    | unknown | unknown |
    /// | false   | unknown | false   |
    /// | unknown | unknown | unknown |
    pub fn and(values: &[TriValue]) -> TriValue {
        let mut saw_unknown = false;
        for value in values {
            match value {
                TriValue::False => return TriValue::False,
                TriValue::Unknown => saw_unknown = true,
                TriValue::True => {}
            }
        }
        if saw_unknown {
            TriValue::Unknown
        } else {
            TriValue::True
        }
    }

    /// Kleene disjunction, the dual of [`and`].
    ///
    /// | A       | B       | A or B  |
    /// |---------|---------|---------|
    /// | false   | false   | false   |
    /// | false   | unknown | unknown |
    /// | true    | unknown | true    |
    /// | unknown | unknown | unknown |
    pub fn or(values: &[TriValue]) -> TriValue {
        let mut saw_unknown = false;
        for value in values {
            match value {
                TriValue::True => return TriValue::True,
                TriValue::Unknown => saw_unknown = true,
                TriValue::False => {}
            }
        }
        if saw_unknown {
            TriValue::Unknown
        } else {
            TriValue::False
        }
    }
}

/// Strict propagation: `Unknown` poisons the whole row.
pub mod strict {
    use super::TriValue;

    /// `Unknown` if any element is `Unknown`, even when another element is
    /// already a determining `False`; otherwise the boolean conjunction.
    pub fn and(values: &[TriValue]) -> TriValue {
        if values.iter().any(|value| value.is_unknown()) {
            return TriValue::Unknown;
        }
        TriValue::from(values.iter().all(|value| value.is_true()))
    }

    /// `Unknown` if any element is `Unknown`; otherwise the boolean disjunction.
    pub fn or(values: &[TriValue]) -> TriValue {
        if values.iter().any(|value| value.is_unknown()) {
            return TriValue::Unknown;
        }
        TriValue::from(values.iter().any(|value| value.is_true()))
    }
}

/// Unknown-skipping reductions that always produce a definite answer.
pub mod collapsing {
    use super::TriValue;

    /// `True` if at least one element is `True`, otherwise `False`.
    pub fn any(values: &[TriValue]) -> TriValue {
        TriValue::from(values.iter().any(|value| value.is_true()))
    }

    /// `False` if at least one element is `False`, otherwise `True`.
    pub fn all(values: &[TriValue]) -> TriValue {
        TriValue::from(!values.iter().any(|value| value.is_false()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TriValue::{False, True, Unknown};

    #[test]
    fn test_kleene_and_truth_table() {
        assert_eq!(kleene::and(&[True, True]), True);
        assert_eq!(kleene::and(&[True, False]), False);
        assert_eq!(kleene::and(&[True, Unknown]), Unknown);
        assert_eq!(kleene::and(&[False, Unknown]), False);
        assert_eq!(kleene::and(&[Unknown, Unknown]), Unknown);
    }

    #[test]
    fn test_kleene_or_truth_table() {
        assert_eq!(kleene::or(&[False, False]), False);
        assert_eq!(kleene::or(&[True, Unknown]), True);
        assert_eq!(kleene::or(&[False, Unknown]), Unknown);
        assert_eq!(kleene::or(&[Unknown, Unknown]), Unknown);
    }

    #[test]
    fn test_strict_differs_from_kleene_on_false() {
        assert_eq!(strict::and(&[False, Unknown]), Unknown);
        assert_eq!(kleene::and(&[False, Unknown]), False);
        assert_eq!(strict::or(&[True, Unknown]), Unknown);
        assert_eq!(kleene::or(&[True, Unknown]), True);
    }

    #[test]
    fn test_strict_without_unknowns() {
        assert_eq!(strict::and(&[True, True]), True);
        assert_eq!(strict::and(&[True, False]), False);
        assert_eq!(strict::or(&[False, True]), True);
        assert_eq!(strict::or(&[False, False]), False);
    }

    #[test]
    fn test_collapsing_never_unknown() {
        assert_eq!(collapsing::any(&[Unknown, Unknown]), False);
        assert_eq!(collapsing::any(&[False, Unknown, True]), True);
        assert_eq!(collapsing::all(&[Unknown, True]), True);
        assert_eq!(collapsing::all(&[Unknown, False]), False);
    }

    #[test]
    fn test_empty_rows_are_identities() {
        assert_eq!(kleene::and(&[]), True);
        assert_eq!(kleene::or(&[]), False);
        assert_eq!(strict::and(&[]), True);
        assert_eq!(strict::or(&[]), False);
        assert_eq!(collapsing::any(&[]), False);
        assert_eq!(collapsing::all(&[]), True);
    }
}
