//! The lock-protected mutable set variant.
//!
//! [`SyncSet`] wraps the shared store in a [`parking_lot::RwLock`]. Every
//! query acquires the shared (read) lock and every mutator the exclusive
//! (write) lock, each for the duration of a single store access. No
//! operation spans two lock acquisitions, so there is no cross-call
//! atomicity: a check-then-act sequence performed as two calls is not
//! atomic even on this variant.
//!
//! User-supplied closures (predicates, mappers, visitors, reducers) never
//! run under the read lock: queries that take closures operate on a
//! snapshot taken in one lock acquisition. The exceptions are
//! [`remove_where`](SyncSet::remove_where) and
//! [`retain_where`](SyncSet::retain_where), whose predicates must run
//! inside the write lock to keep the replacement atomic; such predicates
//! must not touch the same set.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use parking_lot::RwLock;

use crate::algebra;
use crate::collection::{Collection, Mutability};
use crate::set::{self, Set};
use crate::store::{Store, StoreIntoIterator};
use crate::variant::{FrozenSet, MutableSet};

// =============================================================================
// SyncSet Definition
// =============================================================================

/// A mutable hash-backed set protected by a read/write lock.
///
/// Mutators take `&self`: the lock provides the interior mutability, so a
/// `SyncSet` can be shared across threads (it is `Send + Sync` whenever
/// its element type is).
///
/// An absent set (see [`absent`](Self::absent)) behaves as an empty set
/// for every query, and every mutator on it is a no-op, with the single
/// exception of [`load_json`](Self::load_json), which replaces the state
/// wholesale.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
///
/// use polyset::SyncSet;
///
/// let set = Arc::new(SyncSet::new());
/// let handles: Vec<_> = (0..4)
///     .map(|index| {
///         let set = Arc::clone(&set);
///         thread::spawn(move || {
///             set.insert(index);
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(set.len(), 4);
/// ```
pub struct SyncSet<T> {
    store: RwLock<Option<Store<T>>>,
}

static_assertions::assert_impl_all!(SyncSet<i32>: Send, Sync);
static_assertions::assert_impl_all!(SyncSet<String>: Send, Sync);

impl<T> SyncSet<T> {
    /// Creates a present, empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Some(Store::new())),
        }
    }

    /// Creates an absent set. Queries see an empty set; mutators are
    /// no-ops.
    #[must_use]
    pub fn absent() -> Self {
        Self {
            store: RwLock::new(None),
        }
    }

    pub(crate) fn from_store(store: Store<T>) -> Self {
        Self {
            store: RwLock::new(Some(store)),
        }
    }

    /// Returns `true` if this set is in the absent state.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.store.read().is_none()
    }

    /// Returns the variant flag: always [`Mutability::Synchronized`].
    #[must_use]
    pub const fn mutability(&self) -> Mutability {
        Mutability::Synchronized
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().as_ref().map_or(0, Store::len)
    }

    /// Returns `true` if the set holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every element; the set stays present. No-op when absent.
    pub fn clear(&self) {
        if let Some(store) = self.store.write().as_mut() {
            store.clear();
        }
    }
}

impl<T: Hash + Eq> SyncSet<T> {
    /// Returns `true` if the set contains the given element (any borrowed
    /// form of the element type works).
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store
            .read()
            .as_ref()
            .is_some_and(|store| store.contains(element))
    }

    /// Adds an element under the write lock; no-op if present (or if the
    /// set is absent).
    ///
    /// Returns `true` if the element was newly inserted.
    pub fn insert(&self, element: T) -> bool {
        self.store
            .write()
            .as_mut()
            .is_some_and(|store| store.insert(element))
    }

    /// Adds every element produced by the iterator, in one write-lock
    /// acquisition.
    pub fn insert_all<I: IntoIterator<Item = T>>(&self, elements: I) {
        if let Some(store) = self.store.write().as_mut() {
            store.insert_all(elements);
        }
    }

    /// Deletes an element under the write lock; no-op if missing.
    ///
    /// Returns `true` if the element was present and removed.
    pub fn remove<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store
            .write()
            .as_mut()
            .is_some_and(|store| store.remove(element))
    }

    /// Deletes every element produced by the iterator, in one write-lock
    /// acquisition.
    pub fn remove_all<'a, I>(&self, elements: I)
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        if let Some(store) = self.store.write().as_mut() {
            store.remove_all(elements);
        }
    }

    /// Deletes every element matching the predicate.
    ///
    /// The predicate runs inside the write lock and must not touch this
    /// set.
    pub fn remove_where(&self, predicate: impl FnMut(&T) -> bool) {
        if let Some(store) = self.store.write().as_mut() {
            store.remove_where(predicate);
        }
    }

    /// Keeps only the elements matching the predicate.
    ///
    /// The predicate runs inside the write lock and must not touch this
    /// set.
    pub fn retain_where(&self, predicate: impl FnMut(&T) -> bool) {
        if let Some(store) = self.store.write().as_mut() {
            store.retain_where(predicate);
        }
    }
}

impl<T: Clone + Hash + Eq> SyncSet<T> {
    /// Creates a present set from a slice, deduplicating elements.
    #[must_use]
    pub fn from_slice(elements: &[T]) -> Self {
        elements.iter().cloned().collect()
    }

    /// Keeps only the elements that also appear in `elements`.
    pub fn retain_only<'a, I>(&self, elements: I)
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        if let Some(store) = self.store.write().as_mut() {
            store.retain_only(elements);
        }
    }

    /// Clones the underlying store in one read-lock acquisition.
    fn cloned_store(&self) -> Option<Store<T>> {
        self.store.read().clone()
    }

    /// Copies the elements out in one read-lock acquisition.
    fn snapshot_vec(&self) -> Vec<T> {
        self.store.read().as_ref().map_or_else(Vec::new, Store::to_vec)
    }

    /// Calls `action` for each element of a snapshot, in unspecified
    /// order. The action runs outside the lock.
    pub fn for_each(&self, mut action: impl FnMut(&T)) {
        for element in &self.snapshot_vec() {
            action(element);
        }
    }

    /// Calls `action` for each element of a snapshot, stopping at the
    /// first error.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `action` verbatim.
    pub fn try_for_each<E>(&self, mut action: impl FnMut(&T) -> Result<(), E>) -> Result<(), E> {
        for element in &self.snapshot_vec() {
            action(element)?;
        }
        Ok(())
    }

    /// Returns `true` if any element of a snapshot satisfies the
    /// predicate.
    pub fn any(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.snapshot_vec().iter().any(|element| predicate(element))
    }

    /// Returns `true` if every element of a snapshot satisfies the
    /// predicate.
    pub fn all(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.snapshot_vec().iter().all(|element| predicate(element))
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

    /// Returns the union of this set and `other` (result is always
    /// synchronized; see [`Mutability::combine`]).
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

    /// Returns the subset of a snapshot matching the predicate, as a new
    /// synchronized set.
    #[must_use]
    pub fn filter(&self, predicate: impl FnMut(&T) -> bool) -> Set<T> {
        match self.cloned_store() {
            None => Set::from_store(Store::new(), self.mutability()),
            Some(store) => Set::from_store(algebra::filter(&store, predicate), self.mutability()),
        }
    }

    /// Transforms each element of a snapshot into a new synchronized set.
    /// Colliding outputs keep an unspecified survivor; an absent receiver
    /// produces a present, empty set.
    #[must_use]
    pub fn map<U: Hash + Eq>(&self, mapper: impl FnMut(&T) -> U) -> SyncSet<U> {
        match self.cloned_store() {
            None => SyncSet::new(),
            Some(store) => SyncSet::from_store(algebra::map(&store, mapper)),
        }
    }

    /// Transforms each element of a snapshot, aborting on the first
    /// mapper error.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `mapper` verbatim.
    pub fn try_map<U: Hash + Eq, E>(
        &self,
        mapper: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<SyncSet<U>, E> {
        match self.cloned_store() {
            None => Ok(SyncSet::new()),
            Some(store) => Ok(SyncSet::from_store(algebra::try_map(&store, mapper)?)),
        }
    }

    /// Partitions a snapshot of the elements by a derived key; every
    /// group is frozen.
    #[must_use]
    pub fn group_by<K: Hash + Eq>(&self, key_of: impl FnMut(&T) -> K) -> HashMap<K, FrozenSet<T>> {
        self.to_frozen().group_by(key_of)
    }

    /// Left fold over a snapshot of the elements, in unspecified order.
    pub fn fold<B>(&self, init: B, mut function: impl FnMut(B, &T) -> B) -> B {
        let mut accumulator = init;
        for element in &self.snapshot_vec() {
            accumulator = function(accumulator, element);
        }
        accumulator
    }

    /// Left fold over a snapshot that aborts on the first accumulator
    /// error.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `function` verbatim.
    pub fn try_fold<B, E>(
        &self,
        init: B,
        mut function: impl FnMut(B, &T) -> Result<B, E>,
    ) -> Result<B, E> {
        let mut accumulator = init;
        for element in &self.snapshot_vec() {
            accumulator = function(accumulator, element)?;
        }
        Ok(accumulator)
    }

    /// Returns the minimal element under the comparator.
    pub fn min_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        self.cloned_store()
            .and_then(|store| algebra::min_by(&store, compare))
    }

    /// Returns the maximal element under the comparator.
    pub fn max_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        self.cloned_store()
            .and_then(|store| algebra::max_by(&store, compare))
    }

    /// Returns the elements as a vector in arbitrary order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.snapshot_vec()
    }

    /// Returns the elements sorted by the given comparator.
    #[must_use]
    pub fn to_sorted_vec_by(&self, mut compare: impl FnMut(&T, &T) -> Ordering) -> Vec<T> {
        let mut elements = self.snapshot_vec();
        elements.sort_by(|left, right| compare(left, right));
        elements
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
        match self.cloned_store() {
            None => FrozenSet::absent(),
            Some(store) => FrozenSet::from_store(store),
        }
    }

    /// Returns a single-threaded mutable copy of this set; absence is
    /// preserved.
    #[must_use]
    pub fn to_mutable(&self) -> MutableSet<T> {
        match self.cloned_store() {
            None => MutableSet::absent(),
            Some(store) => MutableSet::from_store(store),
        }
    }

    /// Returns an independent lock-protected copy of this set.
    #[must_use]
    pub fn to_synchronized(&self) -> SyncSet<T> {
        self.clone()
    }
}

// =============================================================================
// Collection Implementation
// =============================================================================

impl<T: Clone + Hash + Eq> Collection<T> for SyncSet<T> {
    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    // Visits a snapshot so the visitor never runs under the lock.
    fn visit(&self, visit: &mut dyn FnMut(&T) -> bool) -> bool {
        for element in &self.snapshot_vec() {
            if !visit(element) {
                return false;
            }
        }
        true
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

impl<T> Default for SyncSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SyncSet<T> {
    fn clone(&self) -> Self {
        Self {
            store: RwLock::new(self.store.read().clone()),
        }
    }
}

impl<T: Hash + Eq> FromIterator<T> for SyncSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_store(iter.into_iter().collect())
    }
}

impl<T: Hash + Eq, const N: usize> From<[T; N]> for SyncSet<T> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<T: Hash + Eq> Extend<T> for SyncSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<T> IntoIterator for SyncSet<T> {
    type Item = T;
    type IntoIter = StoreIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        StoreIntoIterator::from_option(self.store.into_inner())
    }
}

impl<T: fmt::Debug> fmt::Debug for SyncSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.store.read() {
            None => formatter.debug_set().finish(),
            Some(store) => formatter.debug_set().entries(store.iter()).finish(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for SyncSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.store.read() {
            None => write!(formatter, "{{}}"),
            Some(store) => write!(formatter, "{store}"),
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for SyncSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let guard = self.store.read();
        crate::variant::serialize_elements(serializer, guard.as_ref())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for SyncSet<T>
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
impl<T: serde::de::DeserializeOwned + Hash + Eq> SyncSet<T> {
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

    /// Replaces the contents of this live instance with the decoded
    /// elements, under the write lock.
    ///
    /// The input is parsed before the lock is taken; the swap itself is a
    /// single write-lock acquisition, so concurrent readers observe
    /// either the old or the new contents, never a partial state. An
    /// absent set becomes present.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Codec`](crate::JsonError::Codec) when the
    /// input is not a JSON array or `null`; the contents are untouched on
    /// error.
    pub fn load_json(&self, bytes: &[u8]) -> Result<(), crate::JsonError> {
        let elements = serde_json::from_slice::<Option<Vec<T>>>(bytes)?.unwrap_or_default();
        let store: Store<T> = elements.into_iter().collect();
        *self.store.write() = Some(store);
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> SyncSet<T> {
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
