//! Diabetes prevalence categories and output styles.
//!
//! # Reference
//!
//! Eastwood SV et al. (2016), "Algorithms for the capture and adjudication
//! of prevalent and incident diabetes in UK Biobank", PLoS ONE 11(9), Fig 2.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Terminal prevalence category of a subject.
///
/// There is deliberately no "unclassified" variant: an in-progress
/// classification is tracked as `Option<Category>` and a completed pass only
/// ever yields these six values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Diabetes unlikely.
    Negative,
    ProbableType1,
    ProbableType2,
    PossibleType1,
    PossibleType2,
    PossibleGestational,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Negative,
        Category::ProbableType1,
        Category::ProbableType2,
        Category::PossibleType1,
        Category::PossibleType2,
        Category::PossibleGestational,
    ];

    /// Returns the label used in output columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Negative => "Diabetes_Unlikely",
            Category::ProbableType1 => "Probable_Type1",
            Category::ProbableType2 => "Probable_Type2",
            Category::PossibleType1 => "Possible_Type1",
            Category::PossibleType2 => "Possible_Type2",
            Category::PossibleGestational => "Possible_Gestational",
        }
    }

    /// Probable type 1 or type 2: counts as prevalent diabetes at baseline.
    pub fn is_prevalent(&self) -> bool {
        matches!(self, Category::ProbableType1 | Category::ProbableType2)
    }

    pub fn is_type1(&self) -> bool {
        matches!(self, Category::ProbableType1 | Category::PossibleType1)
    }

    pub fn is_type2(&self) -> bool {
        matches!(self, Category::ProbableType2 | Category::PossibleType2)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    /// Parse an output label (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().to_uppercase() == normalized)
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}

/// How a [`Category`] is rendered in the prevalence output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrevalenceStyle {
    /// The six category labels.
    #[default]
    Eastwood,
    /// Binary type 1 trait: 1 = possible/probable type 1, 0 = diabetes unlikely.
    T1d,
    /// Binary type 2 trait: 1 = possible/probable type 2, 0 = diabetes unlikely.
    T2d,
}

/// A rendered prevalence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyledValue {
    Label(&'static str),
    /// `None` marks subjects that are neither cases nor controls.
    Binary(Option<u8>),
}

impl PrevalenceStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrevalenceStyle::Eastwood => "Eastwood",
            PrevalenceStyle::T1d => "T1D",
            PrevalenceStyle::T2d => "T2D",
        }
    }

    pub fn apply(&self, category: Category) -> StyledValue {
        match self {
            PrevalenceStyle::Eastwood => StyledValue::Label(category.as_str()),
            PrevalenceStyle::T1d => StyledValue::Binary(binary(category, category.is_type1())),
            PrevalenceStyle::T2d => StyledValue::Binary(binary(category, category.is_type2())),
        }
    }
}

fn binary(category: Category, case: bool) -> Option<u8> {
    if case {
        Some(1)
    } else if category == Category::Negative {
        Some(0)
    } else {
        None
    }
}

impl fmt::Display for PrevalenceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrevalenceStyle {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eastwood" => Ok(PrevalenceStyle::Eastwood),
            "t1d" => Ok(PrevalenceStyle::T1d),
            "t2d" => Ok(PrevalenceStyle::T2d),
            _ => Err(ModelError::UnknownStyle(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "Probable_Type1".parse::<Category>().unwrap(),
            Category::ProbableType1
        );
        assert_eq!(
            "diabetes_unlikely".parse::<Category>().unwrap(),
            Category::Negative
        );
        assert!("Unclassified".parse::<Category>().is_err());
    }

    #[test]
    fn test_prevalent_categories() {
        let prevalent: Vec<Category> = Category::ALL
            .into_iter()
            .filter(Category::is_prevalent)
            .collect();
        assert_eq!(
            prevalent,
            vec![Category::ProbableType1, Category::ProbableType2]
        );
    }

    #[test]
    fn test_binary_styles() {
        assert_eq!(
            PrevalenceStyle::T1d.apply(Category::PossibleType1),
            StyledValue::Binary(Some(1))
        );
        assert_eq!(
            PrevalenceStyle::T1d.apply(Category::Negative),
            StyledValue::Binary(Some(0))
        );
        assert_eq!(
            PrevalenceStyle::T1d.apply(Category::ProbableType2),
            StyledValue::Binary(None)
        );
        assert_eq!(
            PrevalenceStyle::T2d.apply(Category::PossibleGestational),
            StyledValue::Binary(None)
        );
        assert_eq!(
            PrevalenceStyle::Eastwood.apply(Category::PossibleGestational),
            StyledValue::Label("Possible_Gestational")
        );
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("T2D".parse::<PrevalenceStyle>().unwrap(), PrevalenceStyle::T2d);
        assert!("t3d".parse::<PrevalenceStyle>().is_err());
    }
}
