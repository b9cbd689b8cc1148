//! Error types for vector operations.

use std::fmt;

/// An index outside the range an operation accepts.
///
/// `update` and `insert` accept `0..=len`; `updated` accepts `0..len`.
///
/// # Examples
///
/// ```rust
/// use cowvec::persistent::IndexOutOfBoundsError;
///
/// let error = IndexOutOfBoundsError {
///     operation: "insert",
///     index: 4,
///     length: 2,
/// };
/// assert_eq!(
///     format!("{error}"),
///     "CowVector::insert: index 4 is out of bounds for length 2"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBoundsError {
    /// The operation that rejected the index.
    pub operation: &'static str,
    /// The rejected index.
    pub index: usize,
    /// The logical length of the vector at the time of the call.
    pub length: usize,
}

impl fmt::Display for IndexOutOfBoundsError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "CowVector::{}: index {} is out of bounds for length {}",
            self.operation, self.index, self.length
        )
    }
}

impl std::error::Error for IndexOutOfBoundsError {}
