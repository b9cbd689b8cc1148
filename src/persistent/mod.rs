//! Reference-counted copy-on-write storage.
//!
//! This module provides the mutation core of a persistent sequence:
//!
//! - [`CowVector`]: a flat, reference-counted vector that writes in place when
//!   its buffer is uniquely owned and copies otherwise
//! - [`Boxed`]: a reference-counted value handle to store in its slots
//! - [`growth`]: the amortized doubling policy used on append
//!
//! # Ownership
//!
//! Every mutating operation takes the vector by value. Holding on to a clone
//! keeps the buffer shared, which forces the next write to copy; dropping all
//! other handles lets writes happen in place again.
//!
//! # Examples
//!
//! ```rust
//! use cowvec::persistent::{Boxed, CowVector};
//!
//! let first = Boxed::new("first");
//! let vector = CowVector::with_capacity(4).update(0, first.duplicate());
//! assert_eq!(first.strong_count(), 2);
//!
//! let vector = vector.insert(0, Boxed::new("zeroth"));
//! assert_eq!(vector.len(), 2);
//! assert_eq!(vector.get(1).map(|element| **element), Some("first"));
//!
//! drop(vector);
//! assert!(first.is_unique());
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// Tracing
// =============================================================================

/// Emits a `trace` event when the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
macro_rules! cow_trace {
    ($($argument:tt)*) => {
        tracing::trace!($($argument)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! cow_trace {
    ($($argument:tt)*) => {};
}

mod boxed;
mod buffer;
mod cow_vector;
mod error;
pub mod growth;

pub use boxed::Boxed;
pub use cow_vector::CowVector;
pub use error::IndexOutOfBoundsError;

// =============================================================================
// Tests
// =============================================================================
