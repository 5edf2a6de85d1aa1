//! The cardinality-constrained empty set variant.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::collection::{Collection, Mutability};
use crate::set::{self, Set};
use crate::store::Store;
use crate::variant::{MutableSet, SyncSet};

// =============================================================================
// EmptySet Definition
// =============================================================================

/// A set that holds exactly zero elements.
///
/// `EmptySet` is the cheapest way to express "no elements" with a concrete
/// element type: it stores nothing and every query is constant-time. Its
/// JSON form is the empty array `[]` (or `null` when absent), and decoding
/// validates that the input holds exactly zero elements.
///
/// It participates in the algebra like any other variant: unioning it with
/// another set reproduces that set's elements, and converting it with
/// [`to_mutable`](Self::to_mutable) is the usual way to start building a
/// set from nothing.
///
/// # Examples
///
/// ```rust
/// use polyset::{EmptySet, FrozenSet};
///
/// let empty = EmptySet::<i32>::new();
/// assert!(empty.is_empty());
///
/// let mut set = empty.to_mutable();
/// set.insert(5);
/// assert_eq!(set, FrozenSet::from([5]));
/// assert!(set.mutability().is_mutable());
/// ```
pub struct EmptySet<T> {
    present: bool,
    marker: PhantomData<T>,
}

impl<T> EmptySet<T> {
    /// Creates a present empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            present: true,
            marker: PhantomData,
        }
    }

    /// Creates an absent set; indistinguishable from [`new`](Self::new)
    /// except in JSON form (`null` instead of `[]`).
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            present: false,
            marker: PhantomData,
        }
    }

    /// Returns `true` if this set is in the absent state.
    #[inline]
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        !self.present
    }

    /// Returns the variant flag: always [`Mutability::Immutable`].
    #[must_use]
    pub const fn mutability(&self) -> Mutability {
        Mutability::Immutable
    }

    /// Always 0.
    #[must_use]
    pub const fn len(&self) -> usize {
        0
    }

    /// Always `true`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        true
    }

    /// Always `false`.
    #[must_use]
    pub fn contains<Q>(&self, _element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        false
    }

    /// Visits nothing.
    pub fn for_each(&self, _action: impl FnMut(&T)) {}

    /// Visits nothing; always `Ok`.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn try_for_each<E>(&self, _action: impl FnMut(&T) -> Result<(), E>) -> Result<(), E> {
        Ok(())
    }

    /// Always `false`.
    pub fn any(&self, _predicate: impl FnMut(&T) -> bool) -> bool {
        false
    }

    /// Vacuously `true`.
    pub fn all(&self, _predicate: impl FnMut(&T) -> bool) -> bool {
        true
    }

    /// Returns `init` unchanged.
    pub fn fold<B>(&self, init: B, _function: impl FnMut(B, &T) -> B) -> B {
        init
    }

    /// Returns `Ok(init)` unchanged.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn try_fold<B, E>(
        &self,
        init: B,
        _function: impl FnMut(B, &T) -> Result<B, E>,
    ) -> Result<B, E> {
        Ok(init)
    }

    /// Always `None`.
    pub fn min_by(&self, _compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        None
    }

    /// Always `None`.
    pub fn max_by(&self, _compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        None
    }

    /// Always the empty vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        Vec::new()
    }

    /// Always the empty vector.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<T> {
        Vec::new()
    }

    /// Always the empty vector.
    #[must_use]
    pub fn to_sorted_vec_by(&self, _compare: impl FnMut(&T, &T) -> Ordering) -> Vec<T> {
        Vec::new()
    }

    /// Maps to an empty set of the target type, preserving presence.
    #[must_use]
    pub fn map<U>(&self, _mapper: impl FnMut(&T) -> U) -> EmptySet<U> {
        if self.present {
            EmptySet::new()
        } else {
            EmptySet::absent()
        }
    }

    /// Maps to an empty set of the target type, preserving presence.
    ///
    /// # Errors
    ///
    /// Never fails: there is no element to feed the mapper.
    pub fn try_map<U, E>(
        &self,
        _mapper: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<EmptySet<U>, E> {
        if self.present {
            Ok(EmptySet::new())
        } else {
            Ok(EmptySet::absent())
        }
    }

    /// Returns a mutable (hash-backed) counterpart; absence is preserved.
    #[must_use]
    pub fn to_mutable(&self) -> MutableSet<T> {
        if self.present {
            MutableSet::new()
        } else {
            MutableSet::absent()
        }
    }

    /// Returns a lock-protected counterpart; absence is preserved.
    #[must_use]
    pub fn to_synchronized(&self) -> SyncSet<T> {
        if self.present {
            SyncSet::new()
        } else {
            SyncSet::absent()
        }
    }
}

impl<T: Hash + Eq> EmptySet<T> {
    /// Returns `true` if `other` is also empty (absent and empty are
    /// identified).
    #[must_use]
    pub fn equals(&self, other: &dyn Collection<T>) -> bool {
        other.is_empty()
    }

    /// Always `true`: the empty set is a subset of everything.
    #[must_use]
    pub fn is_subset(&self, _other: &dyn Collection<T>) -> bool {
        true
    }

    /// Returns `true` if `other` is also empty.
    #[must_use]
    pub fn is_superset(&self, other: &dyn Collection<T>) -> bool {
        other.is_empty()
    }

    /// Always `true`: the empty set shares no elements with anything.
    #[must_use]
    pub fn is_disjoint(&self, _other: &dyn Collection<T>) -> bool {
        true
    }
}

impl<T: Clone + Hash + Eq> EmptySet<T> {
    /// Returns the union of this set and `other`, i.e. the elements of
    /// `other`, wrapped per the mutability-propagation rule.
    #[must_use]
    pub fn union(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_union(self, other)
    }

    /// Always empty (wrapped per the propagation rule).
    #[must_use]
    pub fn intersection(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_intersection(self, other)
    }

    /// Always empty (wrapped per the propagation rule).
    #[must_use]
    pub fn difference(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_difference(self, other)
    }

    /// Returns the elements of `other`, wrapped per the propagation rule.
    #[must_use]
    pub fn symmetric_difference(&self, other: &dyn Collection<T>) -> Set<T> {
        set::combined_symmetric_difference(self, other)
    }

    /// Always the empty frozen set.
    #[must_use]
    pub fn filter(&self, _predicate: impl FnMut(&T) -> bool) -> Set<T> {
        Set::from_store(Store::new(), self.mutability())
    }

    /// Always the empty mapping: there is nothing to partition.
    #[must_use]
    pub fn group_by<K: Hash + Eq>(
        &self,
        _key_of: impl FnMut(&T) -> K,
    ) -> HashMap<K, crate::FrozenSet<T>> {
        HashMap::new()
    }

    /// Returns a frozen (hash-backed) counterpart; absence is preserved.
    #[must_use]
    pub fn to_frozen(&self) -> crate::FrozenSet<T> {
        if self.present {
            crate::FrozenSet::new()
        } else {
            crate::FrozenSet::absent()
        }
    }
}

// =============================================================================
// Collection Implementation
// =============================================================================

impl<T> Collection<T> for EmptySet<T> {
    fn contains(&self, _element: &T) -> bool {
        false
    }

    fn visit(&self, _visit: &mut dyn FnMut(&T) -> bool) -> bool {
        true
    }

    fn len(&self) -> usize {
        0
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

impl<T> Default for EmptySet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EmptySet<T> {
    fn clone(&self) -> Self {
        Self {
            present: self.present,
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for EmptySet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().finish()
    }
}

impl<T> fmt::Display for EmptySet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T> serde::Serialize for EmptySet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        if self.present {
            serializer.serialize_seq(Some(0))?.end()
        } else {
            serializer.serialize_none()
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for EmptySet<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let elements = Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default();
        if elements.is_empty() {
            Ok(Self::new())
        } else {
            Err(serde::de::Error::invalid_length(
                elements.len(),
                &"an empty array",
            ))
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::de::DeserializeOwned> EmptySet<T> {
    /// Decodes the set from JSON, validating that the array holds exactly
    /// zero elements; `null` decodes as zero elements.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Cardinality`](crate::JsonError::Cardinality)
    /// with `expected == 0` when the array is non-empty, or
    /// [`JsonError::Codec`](crate::JsonError::Codec) for malformed input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use polyset::{EmptySet, JsonError};
    ///
    /// assert!(EmptySet::<i32>::from_json(b"[]").is_ok());
    /// assert!(EmptySet::<i32>::from_json(b"null").is_ok());
    ///
    /// let error = EmptySet::<i32>::from_json(b"[1]").unwrap_err();
    /// assert!(matches!(
    ///     error,
    ///     JsonError::Cardinality { expected: 0, actual: 1 }
    /// ));
    /// ```
    pub fn from_json(bytes: &[u8]) -> Result<Self, crate::JsonError> {
        let elements = serde_json::from_slice::<Option<Vec<T>>>(bytes)?.unwrap_or_default();
        if elements.is_empty() {
            Ok(Self::new())
        } else {
            Err(crate::JsonError::Cardinality {
                expected: 0,
                actual: elements.len(),
            })
        }
    }
}

#[cfg(feature = "serde")]
impl<T> EmptySet<T> {
    /// Encodes the set as `[]`, or `null` when absent.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches the other variants.
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
    fn test_queries_are_trivial() {
        let set = EmptySet::<i32>::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert!(!set.contains(&1));
        assert!(!set.any(|_| true));
        assert!(set.all(|_| false));
        assert_eq!(set.fold(7, |accumulator, _| accumulator + 1), 7);
    }

    #[rstest]
    fn test_absent_and_present_are_equal() {
        assert!(EmptySet::<i32>::new().equals(&EmptySet::<i32>::absent()));
    }

    #[rstest]
    fn test_union_reproduces_other_operand() {
        let empty = EmptySet::<i32>::new();
        let other: crate::FrozenSet<i32> = [1, 2].into();
        let union = empty.union(&other);
        assert_eq!(union.to_sorted_vec(), vec![1, 2]);
    }

    #[rstest]
    fn test_map_preserves_presence() {
        assert!(!EmptySet::<i32>::new().map(|element| element * 2).is_absent());
        assert!(EmptySet::<i32>::absent().map(|element| element * 2).is_absent());
    }
}
