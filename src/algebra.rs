//! The set-algebra engine shared by every variant.
//!
//! All functions here are pure and allocation-producing: they never mutate
//! their inputs and return a brand-new [`Store`] (or a plain value for the
//! aggregate operations). Multi-operand combinators accept any mix of
//! variants through [`Collection`]; single-input transformations operate on
//! a [`Store`] directly, since every variant can hand the engine its own
//! store (or a snapshot of it).
//!
//! Multi-operand semantics:
//!
//! - [`union`]: elements present in any input.
//! - [`intersection`]: strict n-way: elements present in the first input
//!   and in *every* other operand.
//! - [`difference`]: elements of the first input absent from every other
//!   operand.
//! - [`symmetric_difference`]: pairwise XOR accumulation; XOR is
//!   associative, so the result is independent of operand order.
//!
//! Because the underlying store iterates in unspecified order, operations
//! that are sensitive to that order are non-deterministic between runs:
//! colliding [`map`] outputs keep an unspecified survivor, [`min_by`] /
//! [`max_by`] ties keep an unspecified winner, and [`fold`] with a
//! non-commutative accumulator is order-dependent. Callers needing
//! determinism should sort first (see
//! [`Store::to_sorted_vec`](crate::Store::to_sorted_vec)).
//!
//! # Examples
//!
//! ```rust
//! use polyset::{FrozenSet, algebra};
//!
//! let first: FrozenSet<i32> = [1, 2, 3].into();
//! let second: FrozenSet<i32> = [2, 3, 4].into();
//! let third: FrozenSet<i32> = [3, 4, 5].into();
//!
//! let intersection = algebra::intersection(&first, &[&second, &third]);
//! assert_eq!(intersection.to_sorted_vec(), vec![3]);
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::collection::Collection;
use crate::store::Store;

// =============================================================================
// Multi-Operand Combinators
// =============================================================================

/// Collects every element of `source` into `target`.
fn collect_into<T: Clone + Hash + Eq>(source: &dyn Collection<T>, target: &mut Store<T>) {
    source.visit(&mut |element| {
        target.insert(element.clone());
        true
    });
}

/// Returns a fresh store holding every element of `source`.
#[must_use]
pub fn snapshot<T: Clone + Hash + Eq>(source: &dyn Collection<T>) -> Store<T> {
    let mut store = Store::with_capacity(source.len());
    collect_into(source, &mut store);
    store
}

/// Returns the elements present in `first` or in any of `others`.
///
/// # Examples
///
/// ```rust
/// use polyset::{FrozenSet, algebra};
///
/// let first: FrozenSet<i32> = [1, 2].into();
/// let second: FrozenSet<i32> = [2, 3].into();
/// let union = algebra::union(&first, &[&second]);
/// assert_eq!(union.to_sorted_vec(), vec![1, 2, 3]);
/// ```
#[must_use]
pub fn union<T: Clone + Hash + Eq>(
    first: &dyn Collection<T>,
    others: &[&dyn Collection<T>],
) -> Store<T> {
    let mut result = snapshot(first);
    for other in others {
        collect_into(*other, &mut result);
    }
    result
}

/// Returns the elements present in `first` and in every one of `others`.
///
/// The semantics are strict n-way intersection: with three or more
/// operands, an element must appear in all of them to survive.
#[must_use]
pub fn intersection<T: Clone + Hash + Eq>(
    first: &dyn Collection<T>,
    others: &[&dyn Collection<T>],
) -> Store<T> {
    let mut result = Store::new();
    first.visit(&mut |element| {
        if others.iter().all(|other| other.contains(element)) {
            result.insert(element.clone());
        }
        true
    });
    result
}

/// Returns the elements of `first` absent from every one of `others`.
#[must_use]
pub fn difference<T: Clone + Hash + Eq>(
    first: &dyn Collection<T>,
    others: &[&dyn Collection<T>],
) -> Store<T> {
    let mut result = Store::new();
    first.visit(&mut |element| {
        if !others.iter().any(|other| other.contains(element)) {
            result.insert(element.clone());
        }
        true
    });
    result
}

/// Returns the elements present in an odd number of the inputs.
///
/// Accumulated pairwise: each step keeps the elements in exactly one of
/// the running result and the next operand. XOR is associative, so the
/// final result does not depend on operand order.
#[must_use]
pub fn symmetric_difference<T: Clone + Hash + Eq>(
    first: &dyn Collection<T>,
    others: &[&dyn Collection<T>],
) -> Store<T> {
    let mut accumulated = snapshot(first);
    for other in others {
        let mut next = Store::with_capacity(accumulated.len() + other.len());
        for element in accumulated.iter() {
            if !other.contains(element) {
                next.insert(element.clone());
            }
        }
        other.visit(&mut |element| {
            if !accumulated.contains(element) {
                next.insert(element.clone());
            }
            true
        });
        accumulated = next;
    }
    accumulated
}

// =============================================================================
// Relational Predicates
// =============================================================================

/// Returns `true` if `left` and `right` hold exactly the same elements.
///
/// Absent and empty collections are identified: an absent set of any
/// variant equals an empty set of any variant.
#[must_use]
pub fn equal<T>(left: &dyn Collection<T>, right: &dyn Collection<T>) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.visit(&mut |element| right.contains(element))
}

/// Returns `true` if every element of `left` is also in `right`.
#[must_use]
pub fn is_subset<T>(left: &dyn Collection<T>, right: &dyn Collection<T>) -> bool {
    if left.len() > right.len() {
        return false;
    }
    left.visit(&mut |element| right.contains(element))
}

/// Returns `true` if every element of `right` is also in `left`.
#[must_use]
pub fn is_superset<T>(left: &dyn Collection<T>, right: &dyn Collection<T>) -> bool {
    is_subset(right, left)
}

/// Returns `true` if `left` and `right` have no elements in common.
#[must_use]
pub fn is_disjoint<T>(left: &dyn Collection<T>, right: &dyn Collection<T>) -> bool {
    // Probe with the smaller side.
    let (smaller, larger) = if left.len() <= right.len() {
        (left, right)
    } else {
        (right, left)
    };
    smaller.visit(&mut |element| !larger.contains(element))
}

/// Returns `true` if any element satisfies the predicate.
///
/// Short-circuits on the first match; `false` for empty collections.
pub fn any<T>(source: &dyn Collection<T>, mut predicate: impl FnMut(&T) -> bool) -> bool {
    !source.visit(&mut |element| !predicate(element))
}

/// Returns `true` if every element satisfies the predicate.
///
/// Short-circuits on the first non-match; `true` for empty collections.
pub fn all<T>(source: &dyn Collection<T>, mut predicate: impl FnMut(&T) -> bool) -> bool {
    source.visit(&mut |element| predicate(element))
}

// =============================================================================
// Single-Input Transformations
// =============================================================================

/// Returns the subset of `store` matching the predicate.
#[must_use]
pub fn filter<T: Clone + Hash + Eq>(
    store: &Store<T>,
    mut predicate: impl FnMut(&T) -> bool,
) -> Store<T> {
    let mut result = Store::new();
    for element in store.iter() {
        if predicate(element) {
            result.insert(element.clone());
        }
    }
    result
}

/// Transforms each element into a new store.
///
/// If two distinct source elements map to the same target value, only one
/// survives; which one is unspecified, since iteration order is.
#[must_use]
pub fn map<T, U: Hash + Eq>(store: &Store<T>, mut mapper: impl FnMut(&T) -> U) -> Store<U> {
    let mut result = Store::with_capacity(store.len());
    for element in store.iter() {
        result.insert(mapper(element));
    }
    result
}

/// Transforms each element, aborting on the first mapper error.
///
/// # Errors
///
/// Propagates the first error returned by `mapper` verbatim; no partial
/// store is exposed to the caller.
pub fn try_map<T, U: Hash + Eq, E>(
    store: &Store<T>,
    mut mapper: impl FnMut(&T) -> Result<U, E>,
) -> Result<Store<U>, E> {
    let mut result = Store::with_capacity(store.len());
    for element in store.iter() {
        result.insert(mapper(element)?);
    }
    Ok(result)
}

// =============================================================================
// Aggregates
// =============================================================================

/// Left fold over the elements in unspecified order.
///
/// For a non-commutative or non-associative accumulator the result is
/// order-dependent, hence non-deterministic between runs.
pub fn fold<T, B>(store: &Store<T>, init: B, mut function: impl FnMut(B, &T) -> B) -> B {
    let mut accumulator = init;
    for element in store.iter() {
        accumulator = function(accumulator, element);
    }
    accumulator
}

/// Left fold that aborts on the first accumulator error.
///
/// # Errors
///
/// Propagates the first error returned by `function` verbatim; remaining
/// elements are not visited.
pub fn try_fold<T, B, E>(
    store: &Store<T>,
    init: B,
    mut function: impl FnMut(B, &T) -> Result<B, E>,
) -> Result<B, E> {
    let mut accumulator = init;
    for element in store.iter() {
        accumulator = function(accumulator, element)?;
    }
    Ok(accumulator)
}

/// Returns the minimal element under the comparator, or `None` if the
/// store is empty.
///
/// Linear scan: the first element encountered is the seed and later
/// elements replace it only when strictly smaller, so ties keep the
/// earliest element in (unspecified) iteration order.
pub fn min_by<T: Clone>(store: &Store<T>, mut compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
    let mut best: Option<&T> = None;
    for element in store.iter() {
        match best {
            Some(current) if compare(element, current) != Ordering::Less => {}
            _ => best = Some(element),
        }
    }
    best.cloned()
}

/// Returns the maximal element under the comparator, or `None` if the
/// store is empty.
///
/// Ties keep the earliest element in (unspecified) iteration order, as
/// with [`min_by`].
pub fn max_by<T: Clone>(store: &Store<T>, mut compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
    let mut best: Option<&T> = None;
    for element in store.iter() {
        match best {
            Some(current) if compare(element, current) != Ordering::Greater => {}
            _ => best = Some(element),
        }
    }
    best.cloned()
}

/// Partitions the elements by a derived key.
///
/// # Examples
///
/// ```rust
/// use polyset::{Store, algebra};
///
/// let store: Store<i32> = [1, 2, 3, 4].into();
/// let groups = algebra::group_by(&store, |element| element % 2);
/// assert_eq!(groups[&0].to_sorted_vec(), vec![2, 4]);
/// assert_eq!(groups[&1].to_sorted_vec(), vec![1, 3]);
/// ```
pub fn group_by<T: Clone + Hash + Eq, K: Hash + Eq>(
    store: &Store<T>,
    mut key_of: impl FnMut(&T) -> K,
) -> HashMap<K, Store<T>> {
    let mut groups: HashMap<K, Store<T>> = HashMap::new();
    for element in store.iter() {
        groups
            .entry(key_of(element))
            .or_default()
            .insert(element.clone());
    }
    groups
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn store(elements: &[i32]) -> Store<i32> {
        elements.iter().copied().collect()
    }

    #[rstest]
    fn test_union_collects_all_operands() {
        let result = union(&store(&[1, 2]), &[&store(&[2, 3]), &store(&[4])]);
        assert_eq!(result.to_sorted_vec(), vec![1, 2, 3, 4]);
    }

    #[rstest]
    fn test_intersection_is_strict_n_way() {
        let result = intersection(&store(&[1, 2, 3]), &[&store(&[2, 3, 4]), &store(&[3, 4, 5])]);
        assert_eq!(result.to_sorted_vec(), vec![3]);
    }

    #[rstest]
    fn test_difference_subtracts_every_operand() {
        let result = difference(&store(&[1, 2, 3, 4]), &[&store(&[2]), &store(&[4, 5])]);
        assert_eq!(result.to_sorted_vec(), vec![1, 3]);
    }

    #[rstest]
    fn test_symmetric_difference_keeps_odd_membership() {
        let result =
            symmetric_difference(&store(&[1, 2, 3]), &[&store(&[2, 3, 4]), &store(&[3, 4, 5])]);
        assert_eq!(result.to_sorted_vec(), vec![1, 3, 5]);
    }

    #[rstest]
    fn test_symmetric_difference_order_independent() {
        let first = store(&[1, 2]);
        let second = store(&[2, 3]);
        let third = store(&[3, 4]);
        let forward = symmetric_difference(&first, &[&second, &third]);
        let backward = symmetric_difference(&third, &[&second, &first]);
        assert_eq!(forward, backward);
    }

    #[rstest]
    fn test_equal_ignores_order() {
        assert!(equal(&store(&[1, 2, 3]), &store(&[3, 2, 1])));
        assert!(!equal(&store(&[1, 2]), &store(&[1, 3])));
        assert!(!equal(&store(&[1]), &store(&[1, 2])));
    }

    #[rstest]
    fn test_subset_superset_disjoint() {
        assert!(is_subset(&store(&[1, 2]), &store(&[1, 2, 3])));
        assert!(!is_subset(&store(&[1, 4]), &store(&[1, 2, 3])));
        assert!(is_superset(&store(&[1, 2, 3]), &store(&[1, 2])));
        assert!(is_disjoint(&store(&[1, 2]), &store(&[3, 4])));
        assert!(!is_disjoint(&store(&[1, 2]), &store(&[2, 3])));
    }

    #[rstest]
    fn test_any_all() {
        assert!(any(&store(&[1, 2, 3]), |element| *element == 2));
        assert!(!any(&store(&[1, 3]), |element| *element == 2));
        assert!(all(&store(&[2, 4]), |element| element % 2 == 0));
        assert!(!all(&store(&[2, 3]), |element| element % 2 == 0));
        assert!(all(&store(&[]), |_| false));
    }

    #[rstest]
    fn test_filter() {
        let result = filter(&store(&[1, 2, 3, 4]), |element| element % 2 == 0);
        assert_eq!(result.to_sorted_vec(), vec![2, 4]);
    }

    #[rstest]
    fn test_map_dedups_collisions() {
        let result = map(&store(&[1, 2, 3, 4]), |element| element % 2);
        assert_eq!(result.to_sorted_vec(), vec![0, 1]);
    }

    #[rstest]
    fn test_try_map_aborts_on_first_error() {
        let source = store(&[1, 2, 3]);
        let outcome: Result<Store<i32>, &str> = try_map(&source, |element| {
            if element % 2 == 0 {
                Err("even")
            } else {
                Ok(*element)
            }
        });
        assert_eq!(outcome, Err("even"));
    }

    #[rstest]
    fn test_fold_sums() {
        let total = fold(&store(&[1, 2, 3, 4]), 0, |accumulator, element| {
            accumulator + element
        });
        assert_eq!(total, 10);
    }

    #[rstest]
    fn test_try_fold_short_circuits() {
        let mut visited = 0;
        let outcome: Result<i32, &str> = try_fold(&store(&[1, 2, 3]), 0, |_, _| {
            visited += 1;
            Err("stop")
        });
        assert_eq!(outcome, Err("stop"));
        assert_eq!(visited, 1);
    }

    #[rstest]
    fn test_min_max_by() {
        let source = store(&[3, 1, 4, 1]);
        assert_eq!(min_by(&source, |left, right| left.cmp(right)), Some(1));
        assert_eq!(max_by(&source, |left, right| left.cmp(right)), Some(4));
        assert_eq!(min_by(&store(&[]), |left, right| left.cmp(right)), None);
    }

    #[rstest]
    fn test_group_by_partitions() {
        let groups = group_by(&store(&[1, 2, 3, 4, 5]), |element| element % 3);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&0].to_sorted_vec(), vec![3]);
        assert_eq!(groups[&1].to_sorted_vec(), vec![1, 4]);
        assert_eq!(groups[&2].to_sorted_vec(), vec![2, 5]);
    }
}
