//! Integration tests for the set-algebra operations, including the
//! heterogeneous-variant combinations and the n-way semantics.

use polyset::{EmptySet, FrozenSet, Kind, MutableSet, SingletonSet, SyncSet, algebra};
use rstest::rstest;

// =============================================================================
// Binary operations across variants
// =============================================================================

#[rstest]
fn test_union_of_frozen_sets() {
    let left: FrozenSet<i32> = [1, 2, 3].into();
    let right: FrozenSet<i32> = [3, 4].into();
    assert_eq!(left.union(&right), FrozenSet::from([1, 2, 3, 4]));
}

#[rstest]
fn test_difference_of_frozen_sets() {
    let left: FrozenSet<i32> = [1, 2, 3].into();
    let right: FrozenSet<i32> = [2, 3].into();
    assert_eq!(left.difference(&right), FrozenSet::from([1]));
}

#[rstest]
fn test_intersection_of_frozen_sets() {
    let left: FrozenSet<i32> = [1, 2, 3].into();
    let right: FrozenSet<i32> = [2, 3, 4].into();
    assert_eq!(left.intersection(&right), FrozenSet::from([2, 3]));
}

#[rstest]
fn test_symmetric_difference_of_frozen_sets() {
    let left: FrozenSet<i32> = [1, 2, 3].into();
    let right: FrozenSet<i32> = [2, 3, 4].into();
    assert_eq!(left.symmetric_difference(&right), FrozenSet::from([1, 4]));
}

#[rstest]
fn test_operations_mix_variants() {
    let frozen: FrozenSet<i32> = [1, 2].into();
    let mutable: MutableSet<i32> = [2, 3].into();
    let sync: SyncSet<i32> = [3, 4].into();
    let singleton = SingletonSet::new(5);
    let empty = EmptySet::<i32>::new();

    assert_eq!(frozen.union(&mutable), FrozenSet::from([1, 2, 3]));
    assert_eq!(mutable.intersection(&sync), FrozenSet::from([3]));
    assert_eq!(sync.difference(&mutable), FrozenSet::from([4]));
    assert_eq!(singleton.union(&empty), FrozenSet::from([5]));
    assert_eq!(empty.union(&singleton), FrozenSet::from([5]));
}

// =============================================================================
// Idempotence
// =============================================================================

#[rstest]
fn test_union_with_self_is_identity() {
    let set: FrozenSet<i32> = [1, 2, 3].into();
    assert_eq!(set.union(&set), set);
}

#[rstest]
fn test_intersection_with_self_is_identity() {
    let set: FrozenSet<i32> = [1, 2, 3].into();
    assert_eq!(set.intersection(&set), set);
}

#[rstest]
fn test_difference_with_self_is_empty() {
    let set: FrozenSet<i32> = [1, 2, 3].into();
    let difference = set.difference(&set);
    assert!(difference.is_empty());
    assert_eq!(difference, EmptySet::<i32>::new());
}

// =============================================================================
// Mutability propagation
// =============================================================================

#[rstest]
fn test_mutable_and_immutable_union_is_mutable() {
    let mutable: MutableSet<i32> = [1].into();
    let frozen: FrozenSet<i32> = [2].into();
    assert_eq!(mutable.union(&frozen).kind(), Kind::Mutable);
    assert_eq!(frozen.union(&mutable).kind(), Kind::Mutable);
}

#[rstest]
fn test_immutable_union_stays_immutable() {
    let left: FrozenSet<i32> = [1].into();
    let right: FrozenSet<i32> = [2].into();
    let union = left.union(&right);
    assert_eq!(union.kind(), Kind::Frozen);
    assert!(!union.mutability().is_mutable());
}

#[rstest]
fn test_synchronized_operand_wins() {
    let sync: SyncSet<i32> = [1].into();
    let mutable: MutableSet<i32> = [2].into();
    let union = mutable.union(&sync);
    assert_eq!(union.kind(), Kind::Sync);
    assert!(union.mutability().is_synchronized());
}

// =============================================================================
// N-way semantics
// =============================================================================

#[rstest]
fn test_three_way_intersection_is_strict() {
    let first: FrozenSet<i32> = [1, 2, 3, 4].into();
    let second: FrozenSet<i32> = [2, 3, 4].into();
    let third: FrozenSet<i32> = [3, 4, 5].into();

    // An element must be in every operand to survive.
    let intersection = algebra::intersection(&first, &[&second, &third]);
    assert_eq!(intersection.to_sorted_vec(), vec![3, 4]);
}

#[rstest]
fn test_three_way_difference_subtracts_all() {
    let first: FrozenSet<i32> = [1, 2, 3, 4].into();
    let second: FrozenSet<i32> = [2].into();
    let third: FrozenSet<i32> = [4].into();

    let difference = algebra::difference(&first, &[&second, &third]);
    assert_eq!(difference.to_sorted_vec(), vec![1, 3]);
}

#[rstest]
fn test_three_way_symmetric_difference() {
    let first: FrozenSet<i32> = [1, 2].into();
    let second: FrozenSet<i32> = [2, 3].into();
    let third: FrozenSet<i32> = [3, 4].into();

    // 2 and 3 each appear twice and cancel out.
    let result = algebra::symmetric_difference(&first, &[&second, &third]);
    assert_eq!(result.to_sorted_vec(), vec![1, 4]);
}

#[rstest]
fn test_n_way_mutability_propagation() {
    let base: polyset::Set<i32> = FrozenSet::from([1, 2]).into();
    let frozen: FrozenSet<i32> = [2, 3].into();
    let sync: SyncSet<i32> = [4].into();

    let union = base.union_all(&[&frozen, &sync]);
    assert_eq!(union.kind(), Kind::Sync);
    assert_eq!(union.to_sorted_vec(), vec![1, 2, 3, 4]);
}

// =============================================================================
// Transformations and aggregates
// =============================================================================

#[rstest]
fn test_filter_across_variants() {
    let mutable: MutableSet<i32> = [1, 2, 3, 4, 5].into();
    let odds = mutable.filter(|element| element % 2 == 1);
    assert_eq!(odds.kind(), Kind::Mutable);
    assert_eq!(odds.to_sorted_vec(), vec![1, 3, 5]);
}

#[rstest]
fn test_map_changes_element_type() {
    let frozen: FrozenSet<i32> = [1, 2, 3].into();
    let labels = frozen.map(|element| format!("#{element}"));
    assert_eq!(labels.len(), 3);
    assert!(labels.contains("#2"));
}

#[rstest]
fn test_try_map_propagates_user_error() {
    let frozen: FrozenSet<i32> = [1, 2, 3].into();
    let outcome = frozen.try_map(|element| {
        if *element > 2 {
            Err(format!("too big: {element}"))
        } else {
            Ok(*element)
        }
    });
    assert_eq!(outcome.unwrap_err(), "too big: 3");
}

#[rstest]
fn test_group_by_yields_frozen_groups() {
    let sync: SyncSet<i32> = [1, 2, 3, 4, 5, 6].into();
    let groups = sync.group_by(|element| element % 3);
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[&0], FrozenSet::from([3, 6]));
    assert_eq!(groups[&1], FrozenSet::from([1, 4]));
    assert_eq!(groups[&2], FrozenSet::from([2, 5]));
}

#[rstest]
fn test_fold_and_aggregates() {
    let frozen: FrozenSet<i32> = [1, 2, 3, 4].into();
    assert_eq!(frozen.fold(0, |accumulator, element| accumulator + element), 10);
    assert_eq!(frozen.min_by(|left, right| left.cmp(right)), Some(1));
    assert_eq!(frozen.max_by(|left, right| left.cmp(right)), Some(4));
    assert!(frozen.any(|element| *element == 3));
    assert!(!frozen.all(|element| *element > 1));
}

#[rstest]
fn test_subset_superset_disjoint_across_variants() {
    let frozen: FrozenSet<i32> = [1, 2, 3].into();
    let mutable: MutableSet<i32> = [1, 2].into();
    let sync: SyncSet<i32> = [9].into();

    assert!(mutable.is_subset(&frozen));
    assert!(frozen.is_superset(&mutable));
    assert!(frozen.is_disjoint(&sync));
    assert!(SingletonSet::new(2).is_subset(&frozen));
    assert!(EmptySet::<i32>::new().is_subset(&sync));
}
