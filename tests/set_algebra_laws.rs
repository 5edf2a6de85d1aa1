//! Property-based tests for the set-algebra engine.
//!
//! These verify the membership laws of the four combinators, their
//! idempotence, and the order-independence of symmetric difference.

use polyset::{FrozenSet, algebra};
use proptest::prelude::*;

// =============================================================================
// Strategy for generating test data
// =============================================================================

fn arbitrary_elements() -> impl Strategy<Value = Vec<i16>> {
    prop::collection::vec(any::<i16>(), 0..40)
}

fn frozen(elements: &[i16]) -> FrozenSet<i16> {
    elements.iter().copied().collect()
}

// =============================================================================
// Membership laws
// =============================================================================

proptest! {
    #[test]
    fn prop_union_membership(
        left in arbitrary_elements(),
        right in arbitrary_elements()
    ) {
        let set_a = frozen(&left);
        let set_b = frozen(&right);
        let union = set_a.union(&set_b);

        for element in left.iter().chain(right.iter()) {
            prop_assert!(union.contains(element));
        }
        for element in union.to_vec() {
            prop_assert!(set_a.contains(&element) || set_b.contains(&element));
        }
    }
}

proptest! {
    #[test]
    fn prop_intersection_membership(
        left in arbitrary_elements(),
        right in arbitrary_elements()
    ) {
        let set_a = frozen(&left);
        let set_b = frozen(&right);
        let intersection = set_a.intersection(&set_b);

        for element in &left {
            prop_assert_eq!(
                intersection.contains(element),
                set_b.contains(element)
            );
        }
        for element in intersection.to_vec() {
            prop_assert!(set_a.contains(&element) && set_b.contains(&element));
        }
    }
}

proptest! {
    #[test]
    fn prop_difference_membership(
        left in arbitrary_elements(),
        right in arbitrary_elements()
    ) {
        let set_a = frozen(&left);
        let set_b = frozen(&right);
        let difference = set_a.difference(&set_b);

        for element in &left {
            prop_assert_eq!(
                difference.contains(element),
                !set_b.contains(element)
            );
        }
        for element in difference.to_vec() {
            prop_assert!(set_a.contains(&element) && !set_b.contains(&element));
        }
    }
}

proptest! {
    #[test]
    fn prop_symmetric_difference_membership(
        left in arbitrary_elements(),
        right in arbitrary_elements()
    ) {
        let set_a = frozen(&left);
        let set_b = frozen(&right);
        let symmetric = set_a.symmetric_difference(&set_b);

        for element in left.iter().chain(right.iter()) {
            let expected = set_a.contains(element) != set_b.contains(element);
            prop_assert_eq!(symmetric.contains(element), expected);
        }
    }
}

// =============================================================================
// Idempotence
// =============================================================================

proptest! {
    #[test]
    fn prop_union_idempotent(elements in arbitrary_elements()) {
        let set = frozen(&elements);
        prop_assert_eq!(set.union(&set), set.clone());
    }
}

proptest! {
    #[test]
    fn prop_intersection_idempotent(elements in arbitrary_elements()) {
        let set = frozen(&elements);
        prop_assert_eq!(set.intersection(&set), set.clone());
    }
}

proptest! {
    #[test]
    fn prop_self_difference_empty(elements in arbitrary_elements()) {
        let set = frozen(&elements);
        prop_assert!(set.difference(&set).is_empty());
    }
}

// =============================================================================
// Symmetric difference is order-independent (XOR associativity)
// =============================================================================

proptest! {
    #[test]
    fn prop_symmetric_difference_order_independent(
        first in arbitrary_elements(),
        second in arbitrary_elements(),
        third in arbitrary_elements()
    ) {
        let set_a = frozen(&first);
        let set_b = frozen(&second);
        let set_c = frozen(&third);

        let forward = algebra::symmetric_difference(&set_a, &[&set_b, &set_c]);
        let backward = algebra::symmetric_difference(&set_c, &[&set_b, &set_a]);
        prop_assert_eq!(forward, backward);
    }
}

// =============================================================================
// Strict n-way intersection agrees with pairwise chaining
// =============================================================================

proptest! {
    #[test]
    fn prop_n_way_intersection_matches_chained_pairwise(
        first in arbitrary_elements(),
        second in arbitrary_elements(),
        third in arbitrary_elements()
    ) {
        let set_a = frozen(&first);
        let set_b = frozen(&second);
        let set_c = frozen(&third);

        let n_way = algebra::intersection(&set_a, &[&set_b, &set_c]);
        let chained = set_a.intersection(&set_b).intersection(&set_c);
        prop_assert_eq!(chained, FrozenSet::from_iter(n_way));
    }
}

// =============================================================================
// Fold visits every element exactly once
// =============================================================================

proptest! {
    #[test]
    fn prop_fold_counts_elements(elements in arbitrary_elements()) {
        let set = frozen(&elements);
        let counted = set.fold(0_usize, |accumulator, _| accumulator + 1);
        prop_assert_eq!(counted, set.len());
    }
}
