//! The dynamic set type and the variant dispatch table.
//!
//! Algebra operations can combine any mix of variants, so their result
//! needs a type that can hold any of the five wrappers: the closed [`Set`]
//! enumeration. Which wrapper a result uses is decided by the
//! mutability-propagation rule ([`Mutability::combine`]); which wrapper a
//! `map` result uses is decided by the receiver's [`Kind`]; a match on
//! the closed tag is the whole dispatch table, with no runtime type
//! inspection.
//!
//! Cross-variant equality also lives here: every pairing of the five
//! variants (and `Set` itself) implements `PartialEq` through
//! [`algebra::equal`], which identifies absent and empty sets.
//!
//! # Examples
//!
//! ```rust
//! use polyset::{FrozenSet, Kind, MutableSet};
//!
//! let frozen: FrozenSet<i32> = [1, 2, 3].into();
//! let mutable: MutableSet<i32> = [3, 4].into();
//!
//! // One mutable operand makes the result mutable.
//! let union = frozen.union(&mutable);
//! assert_eq!(union.kind(), Kind::Mutable);
//! assert_eq!(union.to_sorted_vec(), vec![1, 2, 3, 4]);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::algebra;
use crate::collection::{Collection, Mutability};
use crate::store::Store;
use crate::variant::{EmptySet, FrozenSet, MutableSet, SingletonSet, SyncSet};

// =============================================================================
// Kind
// =============================================================================

/// The closed tag identifying a [`Set`]'s concrete variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// [`EmptySet`]: exactly zero elements.
    Empty,
    /// [`SingletonSet`]: exactly one element.
    Singleton,
    /// [`FrozenSet`]: immutable, hash-backed.
    Frozen,
    /// [`MutableSet`]: mutable, hash-backed, single-threaded.
    Mutable,
    /// [`SyncSet`]: mutable, hash-backed, lock-protected.
    Sync,
}

impl Kind {
    /// Returns the mutability flag carried by this variant kind.
    #[must_use]
    pub const fn mutability(self) -> Mutability {
        match self {
            Self::Empty | Self::Singleton | Self::Frozen => Mutability::Immutable,
            Self::Mutable => Mutability::Mutable,
            Self::Sync => Mutability::Synchronized,
        }
    }
}

// =============================================================================
// Set Definition
// =============================================================================

/// A set of any of the five variants.
///
/// `Set` is the result type of the algebra operations and supports the
/// full query surface by delegation. It is a closed enumeration: matching
/// on it (or on [`kind`](Self::kind)) covers every variant the crate will
/// ever produce.
///
/// # Examples
///
/// ```rust
/// use polyset::{FrozenSet, Set};
///
/// let set_a: FrozenSet<i32> = [1, 2, 3].into();
/// let set_b: FrozenSet<i32> = [3, 4].into();
///
/// let union: Set<i32> = set_a.union(&set_b);
/// assert_eq!(union.len(), 4);
/// assert!(union.contains(&4));
/// assert_eq!(union, FrozenSet::from([1, 2, 3, 4]));
/// ```
#[derive(Clone, Debug)]
pub enum Set<T> {
    /// A cardinality-constrained empty set.
    Empty(EmptySet<T>),
    /// A cardinality-constrained single-element set.
    Singleton(SingletonSet<T>),
    /// An immutable hash-backed set.
    Frozen(FrozenSet<T>),
    /// A mutable hash-backed set.
    Mutable(MutableSet<T>),
    /// A lock-protected mutable hash-backed set.
    Sync(SyncSet<T>),
}

/// Dispatches a method call to whichever variant the `Set` holds.
macro_rules! dispatch {
    ($value:expr, $set:ident => $body:expr) => {
        match $value {
            Set::Empty($set) => $body,
            Set::Singleton($set) => $body,
            Set::Frozen($set) => $body,
            Set::Mutable($set) => $body,
            Set::Sync($set) => $body,
        }
    };
}

impl<T> Set<T> {
    /// Returns the tag of the concrete variant held.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Empty(_) => Kind::Empty,
            Self::Singleton(_) => Kind::Singleton,
            Self::Frozen(_) => Kind::Frozen,
            Self::Mutable(_) => Kind::Mutable,
            Self::Sync(_) => Kind::Sync,
        }
    }

    /// Returns the variant flag (derived from the kind).
    #[must_use]
    pub const fn mutability(&self) -> Mutability {
        self.kind().mutability()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        dispatch!(self, set => set.len())
    }

    /// Returns `true` if the set holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        dispatch!(self, set => set.is_empty())
    }

    /// Returns `true` if the held variant is in the absent state.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        dispatch!(self, set => set.is_absent())
    }

    /// Returns the held [`MutableSet`], if that is the current variant.
    #[must_use]
    pub const fn as_mutable(&self) -> Option<&MutableSet<T>> {
        match self {
            Self::Mutable(set) => Some(set),
            _ => None,
        }
    }

    /// Returns the held [`MutableSet`] mutably, if that is the current
    /// variant.
    pub fn as_mutable_mut(&mut self) -> Option<&mut MutableSet<T>> {
        match self {
            Self::Mutable(set) => Some(set),
            _ => None,
        }
    }

    /// Returns the held [`SyncSet`], if that is the current variant.
    ///
    /// A shared reference suffices for mutation: the lock provides the
    /// interior mutability.
    #[must_use]
    pub const fn as_sync(&self) -> Option<&SyncSet<T>> {
        match self {
            Self::Sync(set) => Some(set),
            _ => None,
        }
    }

    /// Returns the held [`FrozenSet`], if that is the current variant.
    #[must_use]
    pub const fn as_frozen(&self) -> Option<&FrozenSet<T>> {
        match self {
            Self::Frozen(set) => Some(set),
            _ => None,
        }
    }

    /// Wraps a freshly computed store in the variant the flag calls for.
    pub(crate) fn from_store(store: Store<T>, mutability: Mutability) -> Self {
        match mutability {
            Mutability::Immutable => Self::Frozen(FrozenSet::from_store(store)),
            Mutability::Mutable => Self::Mutable(MutableSet::from_store(store)),
            Mutability::Synchronized => Self::Sync(SyncSet::from_store(store)),
        }
    }

    /// The absent counterpart of [`from_store`](Self::from_store).
    pub(crate) fn vacant(mutability: Mutability) -> Self {
        match mutability {
            Mutability::Immutable => Self::Frozen(FrozenSet::absent()),
            Mutability::Mutable => Self::Mutable(MutableSet::absent()),
            Mutability::Synchronized => Self::Sync(SyncSet::absent()),
        }
    }
}

impl<T: Hash + Eq> Set<T> {
    /// Returns `true` if the set contains the given element (any borrowed
    /// form of the element type works).
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        dispatch!(self, set => set.contains(element))
    }
}

impl<T: Clone + Hash + Eq> Set<T> {
    /// Calls `action` for each element in unspecified order.
    pub fn for_each(&self, action: impl FnMut(&T)) {
        dispatch!(self, set => set.for_each(action));
    }

    /// Calls `action` for each element, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `action` verbatim.
    pub fn try_for_each<E>(&self, action: impl FnMut(&T) -> Result<(), E>) -> Result<(), E> {
        dispatch!(self, set => set.try_for_each(action))
    }

    /// Returns `true` if any element satisfies the predicate.
    pub fn any(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        dispatch!(self, set => set.any(predicate))
    }

    /// Returns `true` if every element satisfies the predicate.
    pub fn all(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        dispatch!(self, set => set.all(predicate))
    }

    /// Left fold over the elements in unspecified order.
    pub fn fold<B>(&self, init: B, function: impl FnMut(B, &T) -> B) -> B {
        dispatch!(self, set => set.fold(init, function))
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
        dispatch!(self, set => set.try_fold(init, function))
    }

    /// Returns the minimal element under the comparator.
    pub fn min_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        dispatch!(self, set => set.min_by(compare))
    }

    /// Returns the maximal element under the comparator.
    pub fn max_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        dispatch!(self, set => set.max_by(compare))
    }

    /// Returns the elements as a vector in arbitrary order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        dispatch!(self, set => set.to_vec())
    }

    /// Returns the elements sorted by the given comparator.
    #[must_use]
    pub fn to_sorted_vec_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Vec<T> {
        dispatch!(self, set => set.to_sorted_vec_by(compare))
    }

    /// Returns the elements sorted by their natural order.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<T>
    where
        T: Ord,
    {
        dispatch!(self, set => set.to_sorted_vec())
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

    /// Returns the union of this set and `other`, wrapped per the
    /// mutability-propagation rule.
    #[must_use]
    pub fn union(&self, other: &dyn Collection<T>) -> Set<T> {
        combined_union(self, other)
    }

    /// Returns the intersection of this set and `other`.
    #[must_use]
    pub fn intersection(&self, other: &dyn Collection<T>) -> Set<T> {
        combined_intersection(self, other)
    }

    /// Returns the elements of this set absent from `other`.
    #[must_use]
    pub fn difference(&self, other: &dyn Collection<T>) -> Set<T> {
        combined_difference(self, other)
    }

    /// Returns the elements in exactly one of this set and `other`.
    #[must_use]
    pub fn symmetric_difference(&self, other: &dyn Collection<T>) -> Set<T> {
        combined_symmetric_difference(self, other)
    }

    /// Returns the union of this set and every operand in `others`.
    ///
    /// The result is absent only when every operand (including this set)
    /// is absent.
    #[must_use]
    pub fn union_all(&self, others: &[&dyn Collection<T>]) -> Set<T> {
        let mutability = combined_mutability(self.mutability(), others);
        if self.is_absent() && others.iter().all(|other| other.is_absent()) {
            return Self::vacant(mutability);
        }
        Self::from_store(algebra::union(self, others), mutability)
    }

    /// Returns the elements present in this set and in every operand
    /// (strict n-way intersection).
    #[must_use]
    pub fn intersection_all(&self, others: &[&dyn Collection<T>]) -> Set<T> {
        let mutability = combined_mutability(self.mutability(), others);
        Self::from_store(algebra::intersection(self, others), mutability)
    }

    /// Returns the elements of this set absent from every operand.
    #[must_use]
    pub fn difference_all(&self, others: &[&dyn Collection<T>]) -> Set<T> {
        let mutability = combined_mutability(self.mutability(), others);
        Self::from_store(algebra::difference(self, others), mutability)
    }

    /// Returns the elements present in an odd number of the operands
    /// (pairwise XOR accumulation; order-independent).
    #[must_use]
    pub fn symmetric_difference_all(&self, others: &[&dyn Collection<T>]) -> Set<T> {
        let mutability = combined_mutability(self.mutability(), others);
        Self::from_store(algebra::symmetric_difference(self, others), mutability)
    }

    /// Returns the subset matching the predicate, wrapped per this set's
    /// own mutability.
    #[must_use]
    pub fn filter(&self, predicate: impl FnMut(&T) -> bool) -> Set<T> {
        dispatch!(self, set => set.filter(predicate))
    }

    /// Transforms each element, preserving the concrete variant: mapping
    /// a singleton yields a singleton, mapping a synchronized set yields
    /// a synchronized set, and so on.
    #[must_use]
    pub fn map<U: Hash + Eq>(&self, mapper: impl FnMut(&T) -> U) -> Set<U> {
        match self {
            Self::Empty(set) => Set::Empty(set.map(mapper)),
            Self::Singleton(set) => Set::Singleton(set.map(mapper)),
            Self::Frozen(set) => Set::Frozen(set.map(mapper)),
            Self::Mutable(set) => Set::Mutable(set.map(mapper)),
            Self::Sync(set) => Set::Sync(set.map(mapper)),
        }
    }

    /// Transforms each element, aborting on the first mapper error; the
    /// concrete variant is preserved as with [`map`](Self::map).
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `mapper` verbatim; no
    /// partial set is exposed.
    pub fn try_map<U: Hash + Eq, E>(
        &self,
        mapper: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<Set<U>, E> {
        match self {
            Self::Empty(set) => Ok(Set::Empty(set.try_map(mapper)?)),
            Self::Singleton(set) => Ok(Set::Singleton(set.try_map(mapper)?)),
            Self::Frozen(set) => Ok(Set::Frozen(set.try_map(mapper)?)),
            Self::Mutable(set) => Ok(Set::Mutable(set.try_map(mapper)?)),
            Self::Sync(set) => Ok(Set::Sync(set.try_map(mapper)?)),
        }
    }

    /// Partitions the elements by a derived key; every group is frozen.
    #[must_use]
    pub fn group_by<K: Hash + Eq>(&self, key_of: impl FnMut(&T) -> K) -> HashMap<K, FrozenSet<T>> {
        dispatch!(self, set => set.group_by(key_of))
    }

    /// Returns an immutable copy; absence is preserved.
    #[must_use]
    pub fn to_frozen(&self) -> FrozenSet<T> {
        dispatch!(self, set => set.to_frozen())
    }

    /// Returns a mutable copy; absence is preserved.
    #[must_use]
    pub fn to_mutable(&self) -> MutableSet<T> {
        dispatch!(self, set => set.to_mutable())
    }

    /// Returns a lock-protected copy; absence is preserved.
    #[must_use]
    pub fn to_synchronized(&self) -> SyncSet<T> {
        dispatch!(self, set => set.to_synchronized())
    }
}

// =============================================================================
// Result-Wrapping Helpers
// =============================================================================

fn combined_mutability<T>(first: Mutability, others: &[&dyn Collection<T>]) -> Mutability {
    others
        .iter()
        .fold(first, |flag, other| flag.combine(other.mutability()))
}

/// Union of two collections, wrapped per the propagation rule; absent
/// only when both operands are absent.
pub(crate) fn combined_union<T: Clone + Hash + Eq>(
    first: &dyn Collection<T>,
    second: &dyn Collection<T>,
) -> Set<T> {
    let mutability = first.mutability().combine(second.mutability());
    if first.is_absent() && second.is_absent() {
        return Set::vacant(mutability);
    }
    Set::from_store(algebra::union(first, &[second]), mutability)
}

pub(crate) fn combined_intersection<T: Clone + Hash + Eq>(
    first: &dyn Collection<T>,
    second: &dyn Collection<T>,
) -> Set<T> {
    let mutability = first.mutability().combine(second.mutability());
    Set::from_store(algebra::intersection(first, &[second]), mutability)
}

pub(crate) fn combined_difference<T: Clone + Hash + Eq>(
    first: &dyn Collection<T>,
    second: &dyn Collection<T>,
) -> Set<T> {
    let mutability = first.mutability().combine(second.mutability());
    Set::from_store(algebra::difference(first, &[second]), mutability)
}

pub(crate) fn combined_symmetric_difference<T: Clone + Hash + Eq>(
    first: &dyn Collection<T>,
    second: &dyn Collection<T>,
) -> Set<T> {
    let mutability = first.mutability().combine(second.mutability());
    Set::from_store(algebra::symmetric_difference(first, &[second]), mutability)
}

// =============================================================================
// Collection Implementation
// =============================================================================

impl<T: Clone + Hash + Eq> Collection<T> for Set<T> {
    fn contains(&self, element: &T) -> bool {
        dispatch!(self, set => Collection::contains(set, element))
    }

    fn visit(&self, visit: &mut dyn FnMut(&T) -> bool) -> bool {
        dispatch!(self, set => Collection::visit(set, visit))
    }

    fn len(&self) -> usize {
        dispatch!(self, set => Collection::len(set))
    }

    fn is_absent(&self) -> bool {
        dispatch!(self, set => Collection::is_absent(set))
    }

    fn mutability(&self) -> Mutability {
        Self::mutability(self)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> From<EmptySet<T>> for Set<T> {
    fn from(set: EmptySet<T>) -> Self {
        Self::Empty(set)
    }
}

impl<T> From<SingletonSet<T>> for Set<T> {
    fn from(set: SingletonSet<T>) -> Self {
        Self::Singleton(set)
    }
}

impl<T> From<FrozenSet<T>> for Set<T> {
    fn from(set: FrozenSet<T>) -> Self {
        Self::Frozen(set)
    }
}

impl<T> From<MutableSet<T>> for Set<T> {
    fn from(set: MutableSet<T>) -> Self {
        Self::Mutable(set)
    }
}

impl<T> From<SyncSet<T>> for Set<T> {
    fn from(set: SyncSet<T>) -> Self {
        Self::Sync(set)
    }
}

impl<T: fmt::Display> fmt::Display for Set<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, set => write!(formatter, "{set}"))
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Set<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        dispatch!(self, set => set.serialize(serializer))
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> Set<T> {
    /// Encodes the set as a JSON array; an absent set encodes as `null`.
    ///
    /// There is no `from_json` on `Set`: the JSON array carries no
    /// variant tag, so decoding goes through the concrete constructors.
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
// Cross-Variant Equality
// =============================================================================

/// Implements `PartialEq` between two variant types through the algebra's
/// membership equality, which identifies absent and empty sets.
macro_rules! impl_cross_variant_eq {
    ($([$left:ident, $right:ident]),+ $(,)?) => {
        $(
            impl<T: Clone + Hash + Eq> PartialEq<$right<T>> for $left<T> {
                fn eq(&self, other: &$right<T>) -> bool {
                    algebra::equal(self, other)
                }
            }
        )+
    };
}

impl_cross_variant_eq!(
    [EmptySet, EmptySet],
    [EmptySet, SingletonSet],
    [EmptySet, FrozenSet],
    [EmptySet, MutableSet],
    [EmptySet, SyncSet],
    [EmptySet, Set],
    [SingletonSet, EmptySet],
    [SingletonSet, SingletonSet],
    [SingletonSet, FrozenSet],
    [SingletonSet, MutableSet],
    [SingletonSet, SyncSet],
    [SingletonSet, Set],
    [FrozenSet, EmptySet],
    [FrozenSet, SingletonSet],
    [FrozenSet, FrozenSet],
    [FrozenSet, MutableSet],
    [FrozenSet, SyncSet],
    [FrozenSet, Set],
    [MutableSet, EmptySet],
    [MutableSet, SingletonSet],
    [MutableSet, FrozenSet],
    [MutableSet, MutableSet],
    [MutableSet, SyncSet],
    [MutableSet, Set],
    [SyncSet, EmptySet],
    [SyncSet, SingletonSet],
    [SyncSet, FrozenSet],
    [SyncSet, MutableSet],
    [SyncSet, SyncSet],
    [SyncSet, Set],
    [Set, EmptySet],
    [Set, SingletonSet],
    [Set, FrozenSet],
    [Set, MutableSet],
    [Set, SyncSet],
    [Set, Set],
);

impl<T: Clone + Hash + Eq> Eq for EmptySet<T> {}
impl<T: Clone + Hash + Eq> Eq for SingletonSet<T> {}
impl<T: Clone + Hash + Eq> Eq for FrozenSet<T> {}
impl<T: Clone + Hash + Eq> Eq for MutableSet<T> {}
impl<T: Clone + Hash + Eq> Eq for SyncSet<T> {}
impl<T: Clone + Hash + Eq> Eq for Set<T> {}

// =============================================================================
// Tests
// =============================================================================
