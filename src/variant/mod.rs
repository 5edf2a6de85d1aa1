//! The five interchangeable set variants.
//!
//! All variants share the same algebra and the same absent-set contract;
//! they differ only in mutability and concurrency safety:
//!
//! - [`EmptySet`]: cardinality-constrained to exactly 0 elements
//! - [`SingletonSet`]: cardinality-constrained to exactly 1 element
//! - [`FrozenSet`]: immutable hash-backed set, safe for concurrent reads
//! - [`MutableSet`]: mutable hash-backed set, single-threaded
//! - [`SyncSet`]: mutable hash-backed set behind a read/write lock
//!
//! Once constructed, a value's concrete type never changes; only derived
//! results pick a different wrapper, via the mutability-propagation rule
//! (see [`Mutability::combine`](crate::Mutability::combine)).

mod empty;
mod frozen;
mod mutable;
mod singleton;
mod sync;

pub use empty::EmptySet;
pub use frozen::FrozenSet;
pub use mutable::MutableSet;
pub use singleton::SingletonSet;
pub use sync::SyncSet;

/// Serializes an optional store as a JSON-style sequence, with the absent
/// state encoding as the serializer's `none` (JSON `null`).
#[cfg(feature = "serde")]
pub(crate) fn serialize_elements<S, T>(
    serializer: S,
    store: Option<&crate::store::Store<T>>,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: serde::Serialize,
{
    use serde::ser::SerializeSeq;
    match store {
        None => serializer.serialize_none(),
        Some(store) => {
            let mut sequence = serializer.serialize_seq(Some(store.len()))?;
            for element in store.iter() {
                sequence.serialize_element(element)?;
            }
            sequence.end()
        }
    }
}
