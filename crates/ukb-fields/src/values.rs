//! Sets of codes searched for by presence and interpolation queries.

use std::collections::HashSet;

use ukb_common::canonical_code;

/// Canonicalized codes; `"1"` and `"1.0"` are the same member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSet {
    codes: HashSet<String>,
}

impl ValueSet {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codes: codes
                .into_iter()
                .filter_map(|code| canonical_code(code.as_ref()))
                .collect(),
        }
    }

    /// `code` must already be canonical, as produced by a [`crate::FieldSource`].
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ValueSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
