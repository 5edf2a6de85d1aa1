//! The immutable hash-backed set variant.
//!
//! [`FrozenSet`] never changes after construction: it exposes no mutators,
//! which makes shared concurrent reads safe by construction. Operations
//! that would change the contents instead return a fresh set, usually a
//! [`Set`] whose concrete wrapper is chosen by the mutability-propagation
//! rule (see [`Mutability::combine`]).
//!
//! # Examples
//!
//! ```rust
//! use polyset::FrozenSet;
//!
//! let set_a: FrozenSet<i32> = [1, 2, 3].into();
//! let set_b: FrozenSet<i32> = [3, 4].into();
//!
//! let union = set_a.union(&set_b);
//! assert_eq!(union, FrozenSet::from([1, 2, 3, 4]));
//! // Immutable inputs produce an immutable result.
//! assert!(!union.mutability().is_mutable());
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::algebra;
use crate::collection::{Collection, Mutability};
use crate::set::{self, Set};
use crate::store::{Store, StoreIntoIterator, StoreIterator};
use crate::variant::{MutableSet, SyncSet};

// =============================================================================
// FrozenSet Definition
// =============================================================================

/// An immutable hash-backed set.
///
/// A `FrozenSet` is either *present* (holding zero or more elements) or
/// *absent* (see [`absent`](Self::absent)). An absent set behaves as an
/// empty set for every query and compares equal to empty sets of every
/// variant; the distinction only surfaces in JSON, where an absent set
/// encodes as `null` rather than `[]`.
///
/// # Examples
///
/// ```rust
/// use polyset::FrozenSet;
///
/// let set: FrozenSet<&str> = ["a", "b"].into();
/// assert!(set.contains("a"));
/// assert_eq!(set.len(), 2);
///
/// let absent: FrozenSet<&str> = FrozenSet::absent();
/// assert!(absent.is_absent());
/// assert!(absent.is_empty());
/// assert_eq!(absent, FrozenSet::new());
/// ```
#[derive(Clone)]
pub struct FrozenSet<T> {
    store: Option<Store<T>>,
}

impl<T> FrozenSet<T> {
    /// Creates a present, empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Some(Store::new()),
        }
    }

    /// Creates an absent set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use polyset::FrozenSet;
    ///
    /// let absent: FrozenSet<i32> = FrozenSet::absent();
    /// assert!(absent.is_absent());
    /// assert!(!absent.contains(&1));
    /// assert_eq!(absent.len(), 0);
    /// ```
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

    /// Returns the variant flag: always [`Mutability::Immutable`].
    #[must_use]
    pub const fn mutability(&self) -> Mutability {
        Mutability::Immutable
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.as_ref().map_or(0, Store::len)
    }

    /// Returns `true` if the set holds no elements (absent sets are empty).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
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

impl<T: Hash + Eq> FrozenSet<T> {
    /// Returns `true` if the set contains the given element.
    ///
    /// The element may be any borrowed form of the set's element type, but
    /// `Hash` and `Eq` on the borrowed form must match those for the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use polyset::FrozenSet;
    ///
    /// let set: FrozenSet<String> = ["hello".to_string()].into();
    /// assert!(set.contains("hello"));
    /// assert!(!set.contains("world"));
    /// ```
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

    /// Returns `true` if this set holds exactly the same elements as
    /// `other`, whatever its variant.
    ///
    /// Absent and empty sets are identified: an absent set of any variant
    /// equals an empty set of any variant.
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

    /// Returns `true` if every element satisfies the predicate (vacuously
    /// true when empty).
    pub fn all(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        algebra::all(self, predicate)
    }
}

impl<T: Clone + Hash + Eq> FrozenSet<T> {
    /// Creates a present set from a slice, deduplicating elements.
    #[must_use]
    pub fn from_slice(elements: &[T]) -> Self {
        elements.iter().cloned().collect()
    }

    /// Returns the union of this set and `other`.
    ///
    /// The result wrapper follows the mutability-propagation rule, and is
    /// absent only when both operands are absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use polyset::{FrozenSet, MutableSet};
    ///
    /// let frozen: FrozenSet<i32> = [1, 2, 3].into();
    /// let mutable: MutableSet<i32> = [3, 4].into();
    ///
    /// let union = frozen.union(&mutable);
    /// assert_eq!(union, FrozenSet::from([1, 2, 3, 4]));
    /// // One mutable input makes the result mutable.
    /// assert!(union.mutability().is_mutable());
    /// ```
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
    ///
    /// # Examples
    ///
    /// ```rust
    /// use polyset::FrozenSet;
    ///
    /// let set_a: FrozenSet<i32> = [1, 2, 3].into();
    /// let set_b: FrozenSet<i32> = [2, 3].into();
    /// assert_eq!(set_a.difference(&set_b), FrozenSet::from([1]));
    /// ```
    #[must_use]
    pub fn difference(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_difference(self, other)
    }

    /// Returns the elements in exactly one of this set and `other`.
    #[must_use]
    pub fn symmetric_difference(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_symmetric_difference(self, other)
    }

    /// Returns the subset matching the predicate, wrapped per this set's
    /// mutability (immutable, so the result is again frozen).
    #[must_use]
    pub fn filter(&self, predicate: impl FnMut(&T) -> bool) -> Set<T> {
        match &self.store {
            None => Set::from_store(Store::new(), self.mutability()),
            Some(store) => Set::from_store(algebra::filter(store, predicate), self.mutability()),
        }
    }

    /// Transforms each element, producing a new frozen set.
    ///
    /// If two elements map to the same value only one survives; which one
    /// is unspecified. An absent receiver produces a present, empty set.
    #[must_use]
    pub fn map<U: Hash + Eq>(&self, mapper: impl FnMut(&T) -> U) -> FrozenSet<U> {
        match &self.store {
            None => FrozenSet::new(),
            Some(store) => FrozenSet::from_store(algebra::map(store, mapper)),
        }
    }

    /// Transforms each element, aborting on the first mapper error.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `mapper` verbatim; no
    /// partial set is exposed.
    pub fn try_map<U: Hash + Eq, E>(
        &self,
        mapper: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<FrozenSet<U>, E> {
        match &self.store {
            None => Ok(FrozenSet::new()),
            Some(store) => Ok(FrozenSet::from_store(algebra::try_map(store, mapper)?)),
        }
    }

    /// Partitions the elements by a derived key; every group is frozen.
    #[must_use]
    pub fn group_by<K: Hash + Eq>(&self, key_of: impl FnMut(&T) -> K) -> HashMap<K, FrozenSet<T>> {
        match &self.store {
            None => HashMap::new(),
            Some(store) => algebra::group_by(store, key_of)
                .into_iter()
                .map(|(key, group)| (key, FrozenSet::from_store(group)))
                .collect(),
        }
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

    /// Returns the minimal element under the comparator, or `None` when
    /// empty. Ties keep an unspecified winner.
    pub fn min_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        self.store
            .as_ref()
            .and_then(|store| algebra::min_by(store, compare))
    }

    /// Returns the maximal element under the comparator, or `None` when
    /// empty. Ties keep an unspecified winner.
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

    /// Returns an independent frozen copy of this set.
    #[must_use]
    pub fn to_frozen(&self) -> FrozenSet<T> {
        self.clone()
    }

    /// Returns a mutable copy of this set; absence is preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use polyset::FrozenSet;
    ///
    /// let frozen: FrozenSet<i32> = [1].into();
    /// let mut mutable = frozen.to_mutable();
    /// mutable.insert(2);
    /// assert_eq!(mutable.len(), 2);
    /// assert_eq!(frozen.len(), 1); // original untouched
    /// ```
    #[must_use]
    pub fn to_mutable(&self) -> MutableSet<T> {
        match &self.store {
            None => MutableSet::absent(),
            Some(store) => MutableSet::from_store(store.clone()),
        }
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

impl<T: Hash + Eq> Collection<T> for FrozenSet<T> {
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

impl<T> Default for FrozenSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> FromIterator<T> for FrozenSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_store(iter.into_iter().collect())
    }
}

impl<T: Hash + Eq, const N: usize> From<[T; N]> for FrozenSet<T> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<T> IntoIterator for FrozenSet<T> {
    type Item = T;
    type IntoIter = StoreIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        StoreIntoIterator::from_option(self.store)
    }
}

impl<'a, T> IntoIterator for &'a FrozenSet<T> {
    type Item = &'a T;
    type IntoIter = StoreIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for FrozenSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for FrozenSet<T> {
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
impl<T: serde::Serialize> serde::Serialize for FrozenSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        crate::variant::serialize_elements(serializer, self.store.as_ref())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for FrozenSet<T>
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
impl<T: serde::de::DeserializeOwned + Hash + Eq> FrozenSet<T> {
    /// Decodes a set from a JSON array; `null` decodes as a present,
    /// empty set. Duplicate elements in the array collapse.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Codec`](crate::JsonError::Codec) when the
    /// input is not a JSON array or `null`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use polyset::FrozenSet;
    ///
    /// let set = FrozenSet::<i32>::from_json(b"[1,2,2,1]").unwrap();
    /// assert_eq!(set.len(), 2);
    /// assert!(set.contains(&1));
    /// assert!(set.contains(&2));
    /// ```
    pub fn from_json(bytes: &[u8]) -> Result<Self, crate::JsonError> {
        let elements = serde_json::from_slice::<Option<Vec<T>>>(bytes)?.unwrap_or_default();
        Ok(elements.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> FrozenSet<T> {
    /// Encodes the set as a JSON array in arbitrary element order; an
    /// absent set encodes as `null`.
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
