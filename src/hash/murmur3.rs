//! 32-bit Murmur3 (`MurmurHash3_x86_32`).
//!
//! All arithmetic wraps at 32 bits. Input words are read little-endian on
//! every target, so hashes agree with the published test vectors regardless
//! of the host byte order.

use std::hash::{BuildHasher, Hasher};

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const BLOCK_ROTATION: u32 = 13;
const BLOCK_MULTIPLIER: u32 = 5;
const BLOCK_INCREMENT: u32 = 0xe654_6b64;
const FINAL_MULTIPLIER_1: u32 = 0x85eb_ca6b;
const FINAL_MULTIPLIER_2: u32 = 0xc2b2_ae35;

/// Width of one input block in bytes.
const BLOCK_SIZE: usize = 4;

#[inline]
const fn scramble(block: u32) -> u32 {
    block.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline]
const fn mix_block(hash: u32, block: u32) -> u32 {
    (hash ^ scramble(block))
        .rotate_left(BLOCK_ROTATION)
        .wrapping_mul(BLOCK_MULTIPLIER)
        .wrapping_add(BLOCK_INCREMENT)
}

/// Folds the trailing 0-3 bytes in, last byte most significant.
#[inline]
fn mix_tail(hash: u32, tail: &[u8]) -> u32 {
    let block = tail
        .iter()
        .rev()
        .fold(0_u32, |block, &byte| (block << 8) | u32::from(byte));
    hash ^ scramble(block)
}

#[inline]
const fn finalize(hash: u32, length: usize) -> u32 {
    // The length is mixed in modulo 2^32.
    #[allow(clippy::cast_possible_truncation)]
    let mut hash = hash ^ (length as u32);
    hash ^= hash >> 16;
    hash = hash.wrapping_mul(FINAL_MULTIPLIER_1);
    hash ^= hash >> 13;
    hash = hash.wrapping_mul(FINAL_MULTIPLIER_2);
    hash ^= hash >> 16;
    hash
}

#[inline]
const fn read_block(block: &[u8]) -> u32 {
    u32::from_le_bytes([block[0], block[1], block[2], block[3]])
}

/// Hashes `key` with 32-bit Murmur3.
///
/// # Examples
///
/// ```rust
/// use cowvec::hash::murmur3_32;
///
/// assert_eq!(murmur3_32(b"", 1), 0x514e_28b7);
/// assert_eq!(
///     murmur3_32(b"The quick brown fox jumps over the lazy dog", 0x9747_b28c),
///     0x2fa8_26cd
/// );
/// ```
#[must_use]
pub fn murmur3_32(key: &[u8], seed: u32) -> u32 {
    let mut blocks = key.chunks_exact(BLOCK_SIZE);
    let mut hash = seed;
    for block in &mut blocks {
        hash = mix_block(hash, read_block(block));
    }
    hash = mix_tail(hash, blocks.remainder());
    finalize(hash, key.len())
}

// =============================================================================
// Streaming Hasher
// =============================================================================

/// Streaming 32-bit Murmur3.
///
/// Bytes written across any number of [`write`](Hasher::write) calls hash the
/// same as one [`murmur3_32`] call over their concatenation. A partial block
/// at the end of a write is carried into the next one.
///
/// [`finish`](Hasher::finish) widens the 32-bit result to `u64`.
///
/// # Examples
///
/// ```rust
/// use std::hash::Hasher;
/// use cowvec::hash::{Murmur3Hasher, murmur3_32};
///
/// let mut hasher = Murmur3Hasher::with_seed(7);
/// hasher.write(b"Hello, ");
/// hasher.write(b"world!");
/// assert_eq!(hasher.finish32(), murmur3_32(b"Hello, world!", 7));
/// ```
#[derive(Debug, Clone)]
pub struct Murmur3Hasher {
    /// Running hash over all complete blocks
    hash: u32,
    /// Bytes of an incomplete block
    pending: [u8; BLOCK_SIZE],
    /// Number of valid bytes in `pending`
    pending_length: usize,
    /// Total number of bytes written
    length: usize,
}

impl Murmur3Hasher {
    /// Creates a hasher starting from `seed`.
    #[inline]
    #[must_use]
    pub const fn with_seed(seed: u32) -> Self {
        Self {
            hash: seed,
            pending: [0; BLOCK_SIZE],
            pending_length: 0,
            length: 0,
        }
    }

    /// Returns the 32-bit hash of everything written so far.
    ///
    /// The hasher is not reset and may keep accepting writes.
    #[must_use]
    pub fn finish32(&self) -> u32 {
        let hash = mix_tail(self.hash, &self.pending[..self.pending_length]);
        finalize(hash, self.length)
    }
}

impl Default for Murmur3Hasher {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Hasher for Murmur3Hasher {
    fn write(&mut self, bytes: &[u8]) {
        self.length = self.length.wrapping_add(bytes.len());
        let mut bytes = bytes;

        if self.pending_length > 0 {
            let needed = BLOCK_SIZE - self.pending_length;
            let taken = needed.min(bytes.len());
            self.pending[self.pending_length..self.pending_length + taken]
                .copy_from_slice(&bytes[..taken]);
            self.pending_length += taken;
            bytes = &bytes[taken..];
            if self.pending_length < BLOCK_SIZE {
                return;
            }
            self.hash = mix_block(self.hash, read_block(&self.pending));
            self.pending_length = 0;
        }

        let mut blocks = bytes.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            self.hash = mix_block(self.hash, read_block(block));
        }
        let remainder = blocks.remainder();
        self.pending[..remainder.len()].copy_from_slice(remainder);
        self.pending_length = remainder.len();
    }

    fn finish(&self) -> u64 {
        u64::from(self.finish32())
    }
}

/// Builds [`Murmur3Hasher`]s sharing one seed.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use std::hash::BuildHasher;
/// use cowvec::hash::BuildMurmur3Hasher;
///
/// let builder = BuildMurmur3Hasher::new(0x9747_b28c);
/// assert_eq!(builder.hash_one("key"), builder.hash_one("key"));
///
/// let mut map = HashMap::with_hasher(builder);
/// map.insert(1, "one");
/// assert_eq!(map.get(&1), Some(&"one"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BuildMurmur3Hasher {
    seed: u32,
}

impl BuildMurmur3Hasher {
    /// Creates a builder whose hashers start from `seed`.
    #[inline]
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Returns the seed handed to every hasher.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }
}

impl BuildHasher for BuildMurmur3Hasher {
    type Hasher = Murmur3Hasher;

    #[inline]
    fn build_hasher(&self) -> Murmur3Hasher {
        Murmur3Hasher::with_seed(self.seed)
    }
}
