//! Algebraic properties of the three-valued combinators.

use proptest::prelude::*;
use ukb_model::logic::{collapsing, kleene, strict};
use ukb_model::{TriColumn, TriValue};

fn tri() -> impl Strategy<Value = TriValue> {
    prop_oneof![
        Just(TriValue::True),
        Just(TriValue::False),
        Just(TriValue::Unknown),
    ]
}

fn negated(values: &[TriValue]) -> Vec<TriValue> {
    values.iter().map(|value| !*value).collect()
}

proptest! {
    #[test]
    fn kleene_de_morgan(values in prop::collection::vec(tri(), 0..8)) {
        prop_assert_eq!(kleene::and(&values), !kleene::or(&negated(&values)));
        prop_assert_eq!(kleene::or(&values), !kleene::and(&negated(&values)));
    }

    #[test]
    fn strict_de_morgan(values in prop::collection::vec(tri(), 0..8)) {
        prop_assert_eq!(strict::and(&values), !strict::or(&negated(&values)));
    }

    #[test]
    fn order_does_not_matter(values in prop::collection::vec(tri(), 0..8)) {
        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(kleene::and(&values), kleene::and(&reversed));
        prop_assert_eq!(strict::or(&values), strict::or(&reversed));
        prop_assert_eq!(collapsing::any(&values), collapsing::any(&reversed));
    }

    #[test]
    fn collapsing_is_never_unknown(values in prop::collection::vec(tri(), 0..8)) {
        prop_assert!(!collapsing::any(&values).is_unknown());
        prop_assert!(!collapsing::all(&values).is_unknown());
    }

    #[test]
    fn strict_is_unknown_iff_any_unknown(values in prop::collection::vec(tri(), 1..8)) {
        let has_unknown = values.iter().any(|value| value.is_unknown());
        prop_assert_eq!(strict::and(&values).is_unknown(), has_unknown);
        prop_assert_eq!(strict::or(&values).is_unknown(), has_unknown);
    }

    #[test]
    fn definite_results_agree(values in prop::collection::vec(tri(), 0..8)) {
        // Whenever strict is definite, Kleene reaches the same verdict.
        let strict_and = strict::and(&values);
        if !strict_and.is_unknown() {
            prop_assert_eq!(kleene::and(&values), strict_and);
        }
        // Kleene `or` being True implies collapsing `any` is True.
        if kleene::or(&values).is_true() {
            prop_assert!(collapsing::any(&values).is_true());
        }
    }

    #[test]
    fn combine_matches_row_reduction(rows in prop::collection::vec((tri(), tri(), tri()), 0..16)) {
        let a: TriColumn = rows.iter().map(|row| row.0).collect();
        let b: TriColumn = rows.iter().map(|row| row.1).collect();
        let c: TriColumn = rows.iter().map(|row| row.2).collect();
        let combined = TriColumn::combine(&[&a, &b, &c], kleene::or).unwrap();
        prop_assert_eq!(combined.len(), rows.len());
        for (idx, row) in rows.iter().enumerate() {
            prop_assert_eq!(combined[idx], kleene::or(&[row.0, row.1, row.2]));
        }
    }
}

#[test]
fn strict_and_kleene_diverge_on_determining_false() {
    let row = [TriValue::False, TriValue::Unknown];
    assert_eq!(kleene::and(&row), TriValue::False);
    assert_eq!(strict::and(&row), TriValue::Unknown);
}
