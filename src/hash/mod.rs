//! Non-cryptographic hashing.
//!
//! This module provides the 32-bit Murmur3 hash used to key vector elements
//! in hash-based structures:
//!
//! - [`murmur3_32`]: one-shot hash of a byte slice
//! - [`Murmur3Hasher`]: the same hash as a streaming [`std::hash::Hasher`]
//! - [`BuildMurmur3Hasher`]: a seeded [`std::hash::BuildHasher`] for
//!   `HashMap`/`HashSet`
//!
//! # Examples
//!
//! ```rust
//! use std::collections::HashSet;
//! use cowvec::hash::{BuildMurmur3Hasher, murmur3_32};
//!
//! assert_eq!(murmur3_32(b"", 0), 0);
//! assert_eq!(murmur3_32(b"Hello, world!", 1234), 0xfaf6_cdb3);
//!
//! let mut set = HashSet::with_hasher(BuildMurmur3Hasher::new(42));
//! set.insert("key");
//! assert!(set.contains("key"));
//! ```

mod murmur3;

pub use murmur3::BuildMurmur3Hasher;
pub use murmur3::Murmur3Hasher;
pub use murmur3::murmur3_32;
