//! # polyset
//!
//! Interchangeable set variants differing in mutability and concurrency
//! safety, backed by a shared hash-based set-algebra core.
//!
//! ## Overview
//!
//! The crate provides five set implementations over one storage engine:
//!
//! - [`EmptySet`]: cardinality-constrained to exactly 0 elements
//! - [`SingletonSet`]: cardinality-constrained to exactly 1 element
//! - [`FrozenSet`]: immutable hash-backed set, safe for concurrent reads
//! - [`MutableSet`]: mutable hash-backed set, single-threaded
//! - [`SyncSet`]: mutable hash-backed set behind a read/write lock
//!
//! Every variant supports the same algebra (union, intersection,
//! difference, symmetric difference, filter, map, grouping, folds) and can
//! be combined with every other variant through the [`Collection`]
//! capability trait. The result of combining sets picks its wrapper by the
//! mutability-propagation rule: mutable if any input was mutable,
//! synchronized if any input was synchronized (see
//! [`Mutability::combine`]).
//!
//! Every variant also has an *absent* state, a valid "no set here" value
//! that behaves as an empty set for every query, compares equal to empty
//! sets of every variant, and encodes as JSON `null` rather than `[]`.
//!
//! ## Example
//!
//! ```rust
//! use polyset::{FrozenSet, Kind, MutableSet};
//!
//! let frozen: FrozenSet<i32> = [1, 2, 3].into();
//! let mutable: MutableSet<i32> = [3, 4].into();
//!
//! let union = frozen.union(&mutable);
//! assert_eq!(union.to_sorted_vec(), vec![1, 2, 3, 4]);
//!
//! // One mutable input makes the result mutable.
//! assert_eq!(union.kind(), Kind::Mutable);
//! assert!(union.mutability().is_mutable());
//! ```
//!
//! ## JSON
//!
//! With the default-on `serde` feature, every variant round-trips through
//! a JSON array; the cardinality-constrained variants validate element
//! counts on decode:
//!
//! ```rust
//! use polyset::{FrozenSet, JsonError, SingletonSet};
//!
//! let set = FrozenSet::<i32>::from_json(b"[1,2,2,1]").unwrap();
//! assert_eq!(set.len(), 2);
//!
//! let error = SingletonSet::<i32>::from_json(b"[1,2]").unwrap_err();
//! assert!(matches!(
//!     error,
//!     JsonError::Cardinality { expected: 1, actual: 2 }
//! ));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): the JSON serialization adapter

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algebra;
pub mod collection;
#[cfg(feature = "serde")]
pub mod error;
pub mod set;
pub mod store;
pub mod variant;

pub use collection::{Collection, Mutability};
#[cfg(feature = "serde")]
pub use error::JsonError;
pub use set::{Kind, Set};
pub use store::{Store, StoreIntoIterator, StoreIterator};
pub use variant::{EmptySet, FrozenSet, MutableSet, SingletonSet, SyncSet};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use polyset::prelude::*;
///
/// let set: FrozenSet<i32> = [1, 2, 3].into();
/// assert!(set.contains(&2));
/// ```
pub mod prelude {
    pub use crate::collection::{Collection, Mutability};
    #[cfg(feature = "serde")]
    pub use crate::error::JsonError;
    pub use crate::set::{Kind, Set};
    pub use crate::store::Store;
    pub use crate::variant::{EmptySet, FrozenSet, MutableSet, SingletonSet, SyncSet};
}
