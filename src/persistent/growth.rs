//! Capacity growth for appends.
//!
//! Appending into a full buffer doubles its capacity, so a run of appends
//! costs O(1) amortized. Doubling is applied to the capacity alone; the
//! logical length is tracked separately by the buffer.
//!
//! A zero capacity stays zero under doubling. See
//! [`CowVector::update`](super::CowVector::update) for how that surfaces.

/// Returns the capacity after one growth step.
///
/// # Panics
///
/// Panics if the doubled capacity overflows `usize`.
///
/// # Examples
///
/// ```rust
/// use cowvec::persistent::growth::grown_capacity;
///
/// assert_eq!(grown_capacity(4), 8);
/// assert_eq!(grown_capacity(0), 0);
/// ```
#[inline]
#[must_use]
pub const fn grown_capacity(capacity: usize) -> usize {
    match capacity.checked_mul(2) {
        Some(grown) => grown,
        None => panic!("capacity overflow"),
    }
}

/// Returns the capacity a copy must have to store a slot at `index`.
///
/// Writes inside the current capacity keep it; a write at `capacity` grows it.
///
/// # Examples
///
/// ```rust
/// use cowvec::persistent::growth::next_capacity;
///
/// assert_eq!(next_capacity(4, 2), 4);
/// assert_eq!(next_capacity(4, 4), 8);
/// ```
#[inline]
#[must_use]
pub const fn next_capacity(capacity: usize, index: usize) -> usize {
    if index < capacity {
        capacity
    } else {
        grown_capacity(capacity)
    }
}
