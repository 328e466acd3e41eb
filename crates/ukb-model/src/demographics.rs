//! Demographic groupings consumed by the classification rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-reported sex (UK Biobank field 31).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Decode the field 31 coding: `0` female, `1` male.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Sex::Female),
            "1" => Some(Sex::Male),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Sex::Female => "0",
            Sex::Male => "1",
        }
    }
}

/// Ethnic background collapsed into the four groups used by the age rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ethnicity {
    WhiteEuropean,
    SouthAsian,
    AfricanCaribbean,
    MixedOther,
}

impl Ethnicity {
    pub const ALL: [Ethnicity; 4] = [
        Ethnicity::WhiteEuropean,
        Ethnicity::SouthAsian,
        Ethnicity::AfricanCaribbean,
        Ethnicity::MixedOther,
    ];

    /// Group number 1-4.
    pub fn group(&self) -> u8 {
        match self {
            Ethnicity::WhiteEuropean => 1,
            Ethnicity::SouthAsian => 2,
            Ethnicity::AfricanCaribbean => 3,
            Ethnicity::MixedOther => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ethnicity::WhiteEuropean => "White European",
            Ethnicity::SouthAsian => "South Asian",
            Ethnicity::AfricanCaribbean => "African Caribbean",
            Ethnicity::MixedOther => "Mixed or Other",
        }
    }

    /// South Asian and African-Caribbean subjects use the lower age threshold.
    pub fn is_higher_risk(&self) -> bool {
        matches!(self, Ethnicity::SouthAsian | Ethnicity::AfricanCaribbean)
    }
}

impl fmt::Display for Ethnicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
