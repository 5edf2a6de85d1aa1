//! The cardinality-constrained single-element set variant.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::algebra;
use crate::collection::{Collection, Mutability};
use crate::set::{self, Set};
use crate::store::Store;
use crate::variant::{FrozenSet, MutableSet, SyncSet};

// =============================================================================
// SingletonSet Definition
// =============================================================================

/// A set that holds exactly one element.
///
/// A present `SingletonSet` always holds its single element; the absent
/// state (see [`absent`](Self::absent)) is its only empty form. Its JSON
/// form is a one-element array, and decoding validates that the input
/// holds exactly one element.
///
/// # Examples
///
/// ```rust
/// use polyset::{FrozenSet, SingletonSet};
///
/// let set = SingletonSet::new(7);
/// assert!(set.contains(&7));
/// assert_eq!(set.len(), 1);
/// assert_eq!(set, FrozenSet::from([7]));
/// ```
#[derive(Clone)]
pub struct SingletonSet<T> {
    element: Option<T>,
}

impl<T> SingletonSet<T> {
    /// Creates a set holding the given element.
    #[must_use]
    pub const fn new(element: T) -> Self {
        Self {
            element: Some(element),
        }
    }

    /// Creates an absent set, the only empty form a singleton has.
    #[must_use]
    pub const fn absent() -> Self {
        Self { element: None }
    }

    /// Returns a reference to the held element, or `None` when absent.
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        self.element.as_ref()
    }

    /// Returns `true` if this set is in the absent state.
    #[inline]
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.element.is_none()
    }

    /// Returns the variant flag: always [`Mutability::Immutable`].
    #[must_use]
    pub const fn mutability(&self) -> Mutability {
        Mutability::Immutable
    }

    /// Returns 1 when present, 0 when absent.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.element.is_some() { 1 } else { 0 }
    }

    /// Returns `true` when absent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.element.is_none()
    }

    /// Calls `action` for the held element, if any.
    pub fn for_each(&self, mut action: impl FnMut(&T)) {
        if let Some(element) = &self.element {
            action(element);
        }
    }

    /// Calls `action` for the held element, if any, surfacing its error.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `action` verbatim.
    pub fn try_for_each<E>(&self, mut action: impl FnMut(&T) -> Result<(), E>) -> Result<(), E> {
        match &self.element {
            None => Ok(()),
            Some(element) => action(element),
        }
    }

    /// Returns `true` if the held element satisfies the predicate.
    pub fn any(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.element.as_ref().is_some_and(|element| predicate(element))
    }

    /// Returns `true` if the held element satisfies the predicate, or the
    /// set is absent (vacuous truth).
    pub fn all(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.element.as_ref().is_none_or(|element| predicate(element))
    }

    /// Folds the held element into `init`, if any.
    pub fn fold<B>(&self, init: B, mut function: impl FnMut(B, &T) -> B) -> B {
        match &self.element {
            None => init,
            Some(element) => function(init, element),
        }
    }

    /// Folds the held element into `init`, surfacing the accumulator's
    /// error.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `function` verbatim.
    pub fn try_fold<B, E>(
        &self,
        init: B,
        mut function: impl FnMut(B, &T) -> Result<B, E>,
    ) -> Result<B, E> {
        match &self.element {
            None => Ok(init),
            Some(element) => function(init, element),
        }
    }

    /// Transforms the held element; absence is preserved (the only empty
    /// form a singleton has).
    #[must_use]
    pub fn map<U>(&self, mut mapper: impl FnMut(&T) -> U) -> SingletonSet<U> {
        SingletonSet {
            element: self.element.as_ref().map(|element| mapper(element)),
        }
    }

    /// Transforms the held element, surfacing the mapper's error.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `mapper` verbatim.
    pub fn try_map<U, E>(
        &self,
        mut mapper: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<SingletonSet<U>, E> {
        match &self.element {
            None => Ok(SingletonSet::absent()),
            Some(element) => Ok(SingletonSet::new(mapper(element)?)),
        }
    }
}

impl<T: Hash + Eq> SingletonSet<T> {
    /// Returns `true` if the held element equals the given one (any
    /// borrowed form of the element type works).
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.element
            .as_ref()
            .is_some_and(|held| held.borrow() == element)
    }

    /// Returns `true` if this set holds exactly the same elements as
    /// `other`, whatever its variant (absent and empty are identified).
    #[must_use]
    pub fn equals(&self, other: &dyn Collection<T>) -> bool {
        algebra::equal(self, other)
    }

    /// Returns `true` if the held element is in `other`, or the set is
    /// absent.
    #[must_use]
    pub fn is_subset(&self, other: &dyn Collection<T>) -> bool {
        algebra::is_subset(self, other)
    }

    /// Returns `true` if every element of `other` is the held element.
    #[must_use]
    pub fn is_superset(&self, other: &dyn Collection<T>) -> bool {
        algebra::is_superset(self, other)
    }

    /// Returns `true` if the held element is not in `other`.
    #[must_use]
    pub fn is_disjoint(&self, other: &dyn Collection<T>) -> bool {
        algebra::is_disjoint(self, other)
    }
}

impl<T: Clone + Hash + Eq> SingletonSet<T> {
    /// Returns the union of this set and `other`, wrapped per the
    /// mutability-propagation rule.
    #[must_use]
    pub fn union(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_union(self, other)
    }

    /// Returns the intersection of this set and `other`.
    #[must_use]
    pub fn intersection(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_intersection(self, other)
    }

    /// Returns the held element when it is absent from `other`.
    #[must_use]
    pub fn difference(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_difference(self, other)
    }

    /// Returns the elements in exactly one of this set and `other`.
    #[must_use]
    pub fn symmetric_difference(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_symmetric_difference(self, other)
    }

    /// Returns the held element when it matches the predicate, as a
    /// frozen set.
    #[must_use]
    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Set<T> {
        let mut store = Store::new();
        if let Some(element) = &self.element {
            if predicate(element) {
                store.insert(element.clone());
            }
        }
        Set::from_store(store, self.mutability())
    }

    /// Returns the held element: a single element is trivially minimal.
    pub fn min_by(&self, _compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        self.element.clone()
    }

    /// Returns the held element: a single element is trivially maximal.
    pub fn max_by(&self, _compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        self.element.clone()
    }

    /// Returns the elements as a vector (zero or one element).
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.element.iter().cloned().collect()
    }

    /// Returns the elements as a vector; trivially sorted.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<T> {
        self.to_vec()
    }

    /// Returns the elements as a vector; trivially sorted.
    #[must_use]
    pub fn to_sorted_vec_by(&self, _compare: impl FnMut(&T, &T) -> Ordering) -> Vec<T> {
        self.to_vec()
    }

    /// Partitions the held element (if any) under its derived key.
    #[must_use]
    pub fn group_by<K: Hash + Eq>(
        &self,
        mut key_of: impl FnMut(&T) -> K,
    ) -> HashMap<K, FrozenSet<T>> {
        let mut groups = HashMap::new();
        if let Some(element) = &self.element {
            groups.insert(
                key_of(element),
                FrozenSet::from_store(Store::singleton(element.clone())),
            );
        }
        groups
    }

    /// Returns a frozen (hash-backed) counterpart; absence is preserved.
    #[must_use]
    pub fn to_frozen(&self) -> FrozenSet<T> {
        match &self.element {
            None => FrozenSet::absent(),
            Some(element) => FrozenSet::from_store(Store::singleton(element.clone())),
        }
    }

    /// Returns a mutable (hash-backed) counterpart; absence is preserved.
    #[must_use]
    pub fn to_mutable(&self) -> MutableSet<T> {
        match &self.element {
            None => MutableSet::absent(),
            Some(element) => MutableSet::from_store(Store::singleton(element.clone())),
        }
    }

    /// Returns a lock-protected counterpart; absence is preserved.
    #[must_use]
    pub fn to_synchronized(&self) -> SyncSet<T> {
        match &self.element {
            None => SyncSet::absent(),
            Some(element) => SyncSet::from_store(Store::singleton(element.clone())),
        }
    }
}

// =============================================================================
// Collection Implementation
// =============================================================================

impl<T: Eq> Collection<T> for SingletonSet<T> {
    fn contains(&self, element: &T) -> bool {
        self.element.as_ref() == Some(element)
    }

    fn visit(&self, visit: &mut dyn FnMut(&T) -> bool) -> bool {
        match &self.element {
            None => true,
            Some(element) => visit(element),
        }
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn is_absent(&self) -> bool {
        Self::is_absent(self)
    }

    fn mutability(&self) -> Mutability {
        Mutability::Immutable
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: fmt::Debug> fmt::Debug for SingletonSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.element.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for SingletonSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            None => write!(formatter, "{{}}"),
            Some(element) => write!(formatter, "{{{element}}}"),
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for SingletonSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        match &self.element {
            None => serializer.serialize_none(),
            Some(element) => {
                let mut sequence = serializer.serialize_seq(Some(1))?;
                sequence.serialize_element(element)?;
                sequence.end()
            }
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for SingletonSet<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let elements = Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default();
        let actual = elements.len();
        match <[T; 1]>::try_from(elements) {
            Ok([element]) => Ok(Self::new(element)),
            Err(_) => Err(serde::de::Error::invalid_length(
                actual,
                &"an array containing exactly one element",
            )),
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::de::DeserializeOwned> SingletonSet<T> {
    /// Decodes the set from JSON, validating that the array holds exactly
    /// one element; `null` counts as zero elements and is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Cardinality`](crate::JsonError::Cardinality)
    /// with `expected == 1` when the element count differs, or
    /// [`JsonError::Codec`](crate::JsonError::Codec) for malformed input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use polyset::{JsonError, SingletonSet};
    ///
    /// let set = SingletonSet::<i32>::from_json(b"[7]").unwrap();
    /// assert_eq!(set.get(), Some(&7));
    ///
    /// let error = SingletonSet::<i32>::from_json(b"[1,2]").unwrap_err();
    /// assert!(matches!(
    ///     error,
    ///     JsonError::Cardinality { expected: 1, actual: 2 }
    /// ));
    /// ```
    pub fn from_json(bytes: &[u8]) -> Result<Self, crate::JsonError> {
        let elements = serde_json::from_slice::<Option<Vec<T>>>(bytes)?.unwrap_or_default();
        let actual = elements.len();
        match <[T; 1]>::try_from(elements) {
            Ok([element]) => Ok(Self::new(element)),
            Err(_) => Err(crate::JsonError::Cardinality {
                expected: 1,
                actual,
            }),
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> SingletonSet<T> {
    /// Encodes the set as a one-element JSON array, or `null` when
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Codec`](crate::JsonError::Codec) when the
    /// element fails to serialize.
    pub fn to_json(&self) -> Result<String, crate::JsonError> {
        serde_json::to_string(self).map_err(crate::JsonError::from)
    }
}

// =============================================================================
// Tests
// =============================================================================
