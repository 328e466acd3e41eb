//! Three-valued evidence.
//!
//! [`TriValue::Unknown`] means "insufficient data". It is never a synonym for
//! `False`; the combinators in [`crate::logic`] decide how it propagates.

use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};

/// A single piece of per-subject evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TriValue {
    True,
    False,
    #[default]
    Unknown,
}

impl TriValue {
    /// Returns true only for an affirmative `True`.
    pub fn is_true(self) -> bool {
        matches!(self, TriValue::True)
    }

    /// Returns true only for an affirmative `False`.
    pub fn is_false(self) -> bool {
        matches!(self, TriValue::False)
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, TriValue::Unknown)
    }

    /// Converts to a nullable boolean (`Unknown` becomes `None`).
    pub fn to_option(self) -> Option<bool> {
        match self {
            TriValue::True => Some(true),
            TriValue::False => Some(false),
            TriValue::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TriValue::True => "True",
            TriValue::False => "False",
            TriValue::Unknown => "Unknown",
        }
    }
}

impl From<bool> for TriValue {
    fn from(value: bool) -> Self {
        if value { TriValue::True } else { TriValue::False }
    }
}

impl From<Option<bool>> for TriValue {
    fn from(value: Option<bool>) -> Self {
        value.map_or(TriValue::Unknown, TriValue::from)
    }
}

impl Not for TriValue {
    type Output = TriValue;

    /// not true -> false, not false -> true, not unknown -> unknown
    fn not(self) -> Self::Output {
        match self {
            TriValue::True => TriValue::False,
            TriValue::False => TriValue::True,
            TriValue::Unknown => TriValue::Unknown,
        }
    }
}

impl fmt::Display for TriValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
