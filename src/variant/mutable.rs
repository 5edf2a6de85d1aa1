//! The mutable hash-backed set variant, for single-threaded use.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::algebra;
use crate::collection::{Collection, Mutability};
use crate::set::{self, Set};
use crate::store::{Store, StoreIntoIterator, StoreIterator};
use crate::variant::{FrozenSet, SyncSet};

// =============================================================================
// MutableSet Definition
// =============================================================================

/// A mutable hash-backed set.
///
/// Mutators operate in place through `&mut self`; queries and algebra
/// operations behave exactly as on [`FrozenSet`]. Combining a `MutableSet`
/// with other variants yields a mutable result unless a synchronized
/// operand is involved (see [`Mutability::combine`]).
///
/// An absent set (see [`absent`](Self::absent)) behaves as an empty set
/// for every query, and every mutator on it is a no-op: mutation requires
/// a present instance obtained through a constructor.
///
/// # Examples
///
/// ```rust
/// use polyset::{FrozenSet, MutableSet};
///
/// let mut set: MutableSet<i32> = [1, 2].into();
/// set.insert(3);
/// set.remove(&1);
/// assert_eq!(set, FrozenSet::from([2, 3]));
/// assert!(set.mutability().is_mutable());
/// ```
#[derive(Clone)]
pub struct MutableSet<T> {
    store: Option<Store<T>>,
}

impl<T> MutableSet<T> {
    /// Creates a present, empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Some(Store::new()),
        }
    }

    /// Creates an absent set. Queries see an empty set; mutators are
    /// no-ops.
    #[must_use]
    pub const fn absent() -> Self {
        Self { store: None }
    }

    pub(crate) fn from_store(store: Store<T>) -> Self {
        Self { store: Some(store) }
    }

    /// Returns `true` if this set is in the absent state.
    #[inline]
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.store.is_none()
    }

    /// Returns the variant flag: always [`Mutability::Mutable`].
    #[must_use]
    pub const fn mutability(&self) -> Mutability {
        Mutability::Mutable
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.as_ref().map_or(0, Store::len)
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every element; the set stays present. No-op when absent.
    pub fn clear(&mut self) {
        if let Some(store) = &mut self.store {
            store.clear();
        }
    }

    /// Returns a borrowing iterator over the elements, in unspecified order.
    #[must_use]
    pub fn iter(&self) -> StoreIterator<'_, T> {
        self.store
            .as_ref()
            .map_or_else(StoreIterator::empty, Store::iter)
    }

    /// Calls `action` for each element in unspecified order.
    pub fn for_each(&self, mut action: impl FnMut(&T)) {
        if let Some(store) = &self.store {
            store.visit(&mut |element| {
                action(element);
                true
            });
        }
    }

    /// Calls `action` for each element, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `action` verbatim.
    pub fn try_for_each<E>(&self, action: impl FnMut(&T) -> Result<(), E>) -> Result<(), E> {
        match &self.store {
            None => Ok(()),
            Some(store) => store.try_visit(action),
        }
    }
}

impl<T: Hash + Eq> MutableSet<T> {
    /// Returns `true` if the set contains the given element (any borrowed
    /// form of the element type works).
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store
            .as_ref()
            .is_some_and(|store| store.contains(element))
    }

    /// Adds an element; no-op if present (or if the set is absent).
    ///
    /// Returns `true` if the element was newly inserted.
    pub fn insert(&mut self, element: T) -> bool {
        self.store
            .as_mut()
            .is_some_and(|store| store.insert(element))
    }

    /// Adds every element produced by the iterator.
    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, elements: I) {
        if let Some(store) = &mut self.store {
            store.insert_all(elements);
        }
    }

    /// Deletes an element; no-op if missing (or if the set is absent).
    ///
    /// Returns `true` if the element was present and removed.
    pub fn remove<Q>(&mut self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store
            .as_mut()
            .is_some_and(|store| store.remove(element))
    }

    /// Deletes every element produced by the iterator.
    pub fn remove_all<'a, I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        if let Some(store) = &mut self.store {
            store.remove_all(elements);
        }
    }

    /// Deletes every element matching the predicate.
    pub fn remove_where(&mut self, predicate: impl FnMut(&T) -> bool) {
        if let Some(store) = &mut self.store {
            store.remove_where(predicate);
        }
    }

    /// Keeps only the elements matching the predicate.
    pub fn retain_where(&mut self, predicate: impl FnMut(&T) -> bool) {
        if let Some(store) = &mut self.store {
            store.retain_where(predicate);
        }
    }

    /// Returns `true` if this set holds exactly the same elements as
    /// `other`, whatever its variant (absent and empty are identified).
    #[must_use]
    pub fn equals(&self, other: &dyn Collection<T>) -> bool {
        algebra::equal(self, other)
    }

    /// Returns `true` if every element of this set is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &dyn Collection<T>) -> bool {
        algebra::is_subset(self, other)
    }

    /// Returns `true` if every element of `other` is also in this set.
    #[must_use]
    pub fn is_superset(&self, other: &dyn Collection<T>) -> bool {
        algebra::is_superset(self, other)
    }

    /// Returns `true` if this set and `other` have no elements in common.
    #[must_use]
    pub fn is_disjoint(&self, other: &dyn Collection<T>) -> bool {
        algebra::is_disjoint(self, other)
    }

    /// Returns `true` if any element satisfies the predicate.
    pub fn any(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        algebra::any(self, predicate)
    }

    /// Returns `true` if every element satisfies the predicate.
    pub fn all(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        algebra::all(self, predicate)
    }
}

impl<T: Clone + Hash + Eq> MutableSet<T> {
    /// Creates a present set from a slice, deduplicating elements.
    #[must_use]
    pub fn from_slice(elements: &[T]) -> Self {
        elements.iter().cloned().collect()
    }

    /// Keeps only the elements that also appear in `elements`.
    pub fn retain_only<'a, I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        if let Some(store) = &mut self.store {
            store.retain_only(elements);
        }
    }

    /// Returns the union of this set and `other` (result is at least
    /// mutable; see [`Mutability::combine`]).
    #[must_use]
    pub fn union(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_union(self, other)
    }

    /// Returns the intersection of this set and `other`.
    #[must_use]
    pub fn intersection(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_intersection(self, other)
    }

    /// Returns the elements of this set absent from `other`.
    #[must_use]
    pub fn difference(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_difference(self, other)
    }

    /// Returns the elements in exactly one of this set and `other`.
    #[must_use]
    pub fn symmetric_difference(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_symmetric_difference(self, other)
    }

    /// Returns the subset matching the predicate as a new mutable set.
    #[must_use]
    pub fn filter(&self, predicate: impl FnMut(&T) -> bool) -> Set<T> {
        match &self.store {
            None => Set::from_store(Store::new(), self.mutability()),
            Some(store) => Set::from_store(algebra::filter(store, predicate), self.mutability()),
        }
    }

    /// Transforms each element into a new mutable set. Colliding outputs
    /// keep an unspecified survivor; an absent receiver produces a
    /// present, empty set.
    #[must_use]
    pub fn map<U: Hash + Eq>(&self, mapper: impl FnMut(&T) -> U) -> MutableSet<U> {
        match &self.store {
            None => MutableSet::new(),
            Some(store) => MutableSet::from_store(algebra::map(store, mapper)),
        }
    }

    /// Transforms each element, aborting on the first mapper error.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `mapper` verbatim.
    pub fn try_map<U: Hash + Eq, E>(
        &self,
        mapper: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<MutableSet<U>, E> {
        match &self.store {
            None => Ok(MutableSet::new()),
            Some(store) => Ok(MutableSet::from_store(algebra::try_map(store, mapper)?)),
        }
    }

    /// Partitions the elements by a derived key; every group is frozen.
    #[must_use]
    pub fn group_by<K: Hash + Eq>(&self, key_of: impl FnMut(&T) -> K) -> HashMap<K, FrozenSet<T>> {
        self.to_frozen().group_by(key_of)
    }

    /// Left fold over the elements in unspecified order.
    pub fn fold<B>(&self, init: B, function: impl FnMut(B, &T) -> B) -> B {
        match &self.store {
            None => init,
            Some(store) => algebra::fold(store, init, function),
        }
    }

    /// Left fold that aborts on the first accumulator error.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `function` verbatim.
    pub fn try_fold<B, E>(
        &self,
        init: B,
        function: impl FnMut(B, &T) -> Result<B, E>,
    ) -> Result<B, E> {
        match &self.store {
            None => Ok(init),
            Some(store) => algebra::try_fold(store, init, function),
        }
    }

    /// Returns the minimal element under the comparator.
    pub fn min_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        self.store
            .as_ref()
            .and_then(|store| algebra::min_by(store, compare))
    }

    /// Returns the maximal element under the comparator.
    pub fn max_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        self.store
            .as_ref()
            .and_then(|store| algebra::max_by(store, compare))
    }

    /// Returns the elements as a vector in arbitrary order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.store.as_ref().map_or_else(Vec::new, Store::to_vec)
    }

    /// Returns the elements sorted by the given comparator.
    #[must_use]
    pub fn to_sorted_vec_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Vec<T> {
        self.store
            .as_ref()
            .map_or_else(Vec::new, |store| store.to_sorted_vec_by(compare))
    }

    /// Returns the elements sorted by their natural order.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<T>
    where
        T: Ord,
    {
        self.to_sorted_vec_by(T::cmp)
    }

    /// Returns an immutable copy of this set; absence is preserved.
    #[must_use]
    pub fn to_frozen(&self) -> FrozenSet<T> {
        match &self.store {
            None => FrozenSet::absent(),
            Some(store) => FrozenSet::from_store(store.clone()),
        }
    }

    /// Returns an independent mutable copy of this set.
    #[must_use]
    pub fn to_mutable(&self) -> MutableSet<T> {
        self.clone()
    }

    /// Returns a lock-protected copy of this set; absence is preserved.
    #[must_use]
    pub fn to_synchronized(&self) -> SyncSet<T> {
        match &self.store {
            None => SyncSet::absent(),
            Some(store) => SyncSet::from_store(store.clone()),
        }
    }
}

// =============================================================================
// Collection Implementation
// =============================================================================

impl<T: Hash + Eq> Collection<T> for MutableSet<T> {
    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    fn visit(&self, visit: &mut dyn FnMut(&T) -> bool) -> bool {
        self.store.as_ref().is_none_or(|store| store.visit(visit))
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn is_absent(&self) -> bool {
        Self::is_absent(self)
    }

    fn mutability(&self) -> Mutability {
        Self::mutability(self)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for MutableSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> FromIterator<T> for MutableSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_store(iter.into_iter().collect())
    }
}

impl<T: Hash + Eq, const N: usize> From<[T; N]> for MutableSet<T> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<T: Hash + Eq> Extend<T> for MutableSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<T> IntoIterator for MutableSet<T> {
    type Item = T;
    type IntoIter = StoreIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        StoreIntoIterator::from_option(self.store)
    }
}

impl<'a, T> IntoIterator for &'a MutableSet<T> {
    type Item = &'a T;
    type IntoIter = StoreIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for MutableSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.store {
            None => write!(formatter, "{{}}"),
            Some(store) => write!(formatter, "{store}"),
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for MutableSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        crate::variant::serialize_elements(serializer, self.store.as_ref())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for MutableSet<T>
where
    T: serde::Deserialize<'de> + Hash + Eq,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let elements = Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(elements.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
impl<T: serde::de::DeserializeOwned + Hash + Eq> MutableSet<T> {
    /// Decodes a set from a JSON array; `null` decodes as a present,
    /// empty set. Duplicate elements in the array collapse.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Codec`](crate::JsonError::Codec) when the
    /// input is not a JSON array or `null`.
    pub fn from_json(bytes: &[u8]) -> Result<Self, crate::JsonError> {
        let elements = serde_json::from_slice::<Option<Vec<T>>>(bytes)?.unwrap_or_default();
        Ok(elements.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> MutableSet<T> {
    /// Encodes the set as a JSON array; an absent set encodes as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Codec`](crate::JsonError::Codec) when an
    /// element fails to serialize.
    pub fn to_json(&self) -> Result<String, crate::JsonError> {
        serde_json::to_string(self).map_err(crate::JsonError::from)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_insert_remove_roundtrip() {
        let mut set: MutableSet<i32> = MutableSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert!(set.is_empty());
        assert!(!set.is_absent());
    }

    #[rstest]
    fn test_mutators_on_absent_are_noops() {
        let mut absent: MutableSet<i32> = MutableSet::absent();
        assert!(!absent.insert(1));
        absent.insert_all([2, 3]);
        absent.clear();
        absent.retain_where(|_| true);
        assert!(absent.is_absent());
        assert!(absent.is_empty());
    }

    #[rstest]
    fn test_clear_keeps_presence() {
        let mut set: MutableSet<i32> = [1, 2].into();
        set.clear();
        assert!(set.is_empty());
        assert!(!set.is_absent());
    }

    #[rstest]
    fn test_retain_only() {
        let mut set: MutableSet<i32> = [1, 2, 3].into();
        set.retain_only([&2, &3, &9]);
        assert_eq!(set.to_sorted_vec(), vec![2, 3]);
    }

    #[rstest]
    fn test_remove_where() {
        let mut set: MutableSet<i32> = [1, 2, 3, 4].into();
        set.remove_where(|element| element % 2 == 1);
        assert_eq!(set.to_sorted_vec(), vec![2, 4]);
    }

    #[rstest]
    fn test_extend() {
        let mut set: MutableSet<i32> = [1].into();
        set.extend([2, 2, 3]);
        assert_eq!(set.to_sorted_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_to_frozen_freezes_contents() {
        let set: MutableSet<i32> = [1, 2].into();
        let frozen = set.to_frozen();
        assert_eq!(frozen.len(), 2);
        assert_eq!(frozen.mutability(), Mutability::Immutable);
    }
}
