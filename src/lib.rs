//! # cowvec
//!
//! The mutation core of a reference-counted, copy-on-write vector, plus the
//! Murmur3 hash used to key its elements.
//!
//! ## Overview
//!
//! - **Persistent storage**: [`CowVector`](persistent::CowVector) writes in
//!   place while its buffer is uniquely owned and copies otherwise; appends
//!   grow the capacity by doubling.
//! - **Value handles**: [`Boxed`](persistent::Boxed) is a reference-counted
//!   handle for storing shared values in vector slots.
//! - **Hashing**: [`murmur3_32`](hash::murmur3_32) and a matching streaming
//!   [`Hasher`](std::hash::Hasher).
//!
//! ## Feature Flags
//!
//! - `persistent`: The copy-on-write vector (default)
//! - `hash`: Murmur3 hashing (default)
//! - `arc`: Use `Arc` instead of `Rc` so vectors can cross threads
//! - `serde`: Serialize/deserialize vectors and handles
//! - `tracing`: Emit `trace` events when an operation copies
//! - `full`: Enable all features except `arc`
//!
//! ## Example
//!
//! ```rust
//! use cowvec::prelude::*;
//!
//! let vector = CowVector::from_vec(vec![1, 2, 3]);
//! let vector = vector.update(3, 4).insert(0, 0);
//! assert_eq!(vector.to_vec(), vec![0, 1, 2, 3, 4]);
//!
//! assert_eq!(murmur3_32(b"abc", 0), 0xb3dd_93fa);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and functions.
///
/// # Usage
///
/// ```rust
/// use cowvec::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;

    #[cfg(feature = "hash")]
    pub use crate::hash::*;
}

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(feature = "hash")]
pub mod hash;
