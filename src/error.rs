//! Error types for the JSON serialization adapter.
//!
//! Errors returned by user-supplied mapper, reducer, and visitor functions
//! are not represented here: they are generic and propagate through
//! `try_map` / `try_fold` / `try_for_each` verbatim.

use std::error::Error;
use std::fmt;

/// An error produced while encoding a set to JSON or decoding one from it.
///
/// # Examples
///
/// ```rust
/// use polyset::{JsonError, SingletonSet};
///
/// let error = SingletonSet::<i32>::from_json(b"[1,2]").unwrap_err();
/// assert!(matches!(
///     error,
///     JsonError::Cardinality { expected: 1, actual: 2 }
/// ));
/// ```
#[derive(Debug)]
pub enum JsonError {
    /// A cardinality-constrained variant decoded an array of the wrong
    /// length. Raised only by [`EmptySet`](crate::EmptySet) (expects 0) and
    /// [`SingletonSet`](crate::SingletonSet) (expects 1).
    Cardinality {
        /// The element count the variant requires.
        expected: usize,
        /// The element count the JSON array actually held.
        actual: usize,
    },
    /// The input was not a well-formed JSON array (or `null`), or encoding
    /// failed. Carries the underlying codec error unchanged.
    Codec(serde_json::Error),
}

impl fmt::Display for JsonError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cardinality { expected, actual } => write!(
                formatter,
                "cardinality mismatch: expected {expected} elements, found {actual}"
            ),
            Self::Codec(error) => write!(formatter, "malformed JSON: {error}"),
        }
    }
}

impl Error for JsonError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cardinality { .. } => None,
            Self::Codec(error) => Some(error),
        }
    }
}

impl From<serde_json::Error> for JsonError {
    fn from(error: serde_json::Error) -> Self {
        Self::Codec(error)
    }
}
