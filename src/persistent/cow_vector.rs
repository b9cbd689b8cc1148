//! Reference-counted copy-on-write vector.
//!
//! This module provides [`CowVector`], the flat backing store of a persistent
//! sequence. Every mutating operation consumes the vector handle and returns
//! a new one. Whether that new handle points at the same buffer or at a fresh
//! copy is decided per call:
//!
//! - If the buffer is uniquely owned and the write fits in its capacity, the
//!   slot is replaced in place. No allocation happens.
//! - Otherwise a new buffer is allocated, every surviving element is carried
//!   over, and the old handle is released.
//!
//! # Time Complexity
//!
//! | Operation             | Complexity                         |
//! |-----------------------|------------------------------------|
//! | `update` (unique)     | O(1)                               |
//! | `update` (shared)     | O(capacity)                        |
//! | `update` at `len`     | O(1) amortized while unique        |
//! | `insert`              | O(N)                               |
//! | `updated`             | O(capacity)                        |
//! | `get` / `len`         | O(1)                               |
//!
//! # Examples
//!
//! ```rust
//! use cowvec::persistent::CowVector;
//!
//! let vector = CowVector::from_vec(vec![1, 2, 3]);
//! let snapshot = vector.clone();
//!
//! // Shared: the update copies, the snapshot keeps its contents
//! let vector = vector.update(0, 10);
//! assert_eq!(vector.get(0), Some(&10));
//! assert_eq!(snapshot.get(0), Some(&1));
//!
//! // Unique again: the update happens in place
//! drop(snapshot);
//! assert!(vector.is_unique());
//! let vector = vector.update(1, 20);
//! assert_eq!(vector.to_vec(), vec![10, 20, 3]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::ReferenceCounter;
use super::buffer::SlotBuffer;
use super::error::IndexOutOfBoundsError;
use super::growth::next_capacity;

// =============================================================================
// CowVector Definition
// =============================================================================

/// A reference-counted vector that mutates in place when uniquely owned.
///
/// Capacity and logical length are tracked separately: slots past the length
/// are reserved and hold nothing. Cloning a `CowVector` only duplicates the
/// handle to the shared buffer.
///
/// # Examples
///
/// ```rust
/// use cowvec::persistent::CowVector;
///
/// let vector = CowVector::from_vec(vec!['a', 'b']);
/// let vector = vector.update(2, 'c');
///
/// assert_eq!(vector.len(), 3);
/// assert_eq!(vector.capacity(), 4);
/// assert_eq!(vector.slot(3), Some(None));
/// ```
pub struct CowVector<T> {
    buffer: ReferenceCounter<SlotBuffer<T>>,
}

// Rc-backed vectors must stay on one thread; the `arc` feature lifts that.
#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(CowVector<i32>: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(CowVector<i32>: Send, Sync);

impl<T> CowVector<T> {
    /// Creates an empty vector with no capacity.
    ///
    /// Note that appending to a zero-capacity vector through
    /// [`update`](Self::update) cannot grow it; see that method.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty vector with `capacity` reserved slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowvec::persistent::CowVector;
    ///
    /// let vector = CowVector::with_capacity(2).update(0, "first");
    /// assert_eq!(vector.len(), 1);
    /// assert_eq!(vector.capacity(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_buffer(SlotBuffer::allocate(capacity))
    }

    /// Creates a full vector (`len == capacity`) holding `elements`.
    #[must_use]
    pub fn from_vec(elements: Vec<T>) -> Self {
        Self::from_buffer(SlotBuffer::from_vec(elements))
    }

    fn from_buffer(buffer: SlotBuffer<T>) -> Self {
        Self {
            buffer: ReferenceCounter::new(buffer),
        }
    }

    /// Returns the number of live elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the vector holds no live elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of allocated slots, live or reserved.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns `true` if this handle is the only owner of the buffer.
    ///
    /// The answer is only valid until the next clone or drop of a handle.
    #[inline]
    #[must_use]
    pub fn is_unique(&self) -> bool {
        ReferenceCounter::strong_count(&self.buffer) == 1
    }

    /// Returns `true` if both handles share the same buffer.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.buffer, &other.buffer)
    }

    /// Returns the live element at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.buffer.get(index)
    }

    /// Returns the raw slot at `index`.
    ///
    /// `None` past the capacity, `Some(None)` for a reserved slot and
    /// `Some(Some(element))` for a live one.
    #[inline]
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<Option<&T>> {
        self.buffer.slot(index)
    }

    /// Accepts `0..=len`.
    fn check_position(
        &self,
        operation: &'static str,
        index: usize,
    ) -> Result<(), IndexOutOfBoundsError> {
        let length = self.len();
        if index <= length {
            Ok(())
        } else {
            Err(IndexOutOfBoundsError {
                operation,
                index,
                length,
            })
        }
    }

    /// Accepts `0..len`.
    fn check_element(
        &self,
        operation: &'static str,
        index: usize,
    ) -> Result<(), IndexOutOfBoundsError> {
        let length = self.len();
        if index < length {
            Ok(())
        } else {
            Err(IndexOutOfBoundsError {
                operation,
                index,
                length,
            })
        }
    }
}

impl<T: Clone> CowVector<T> {
    /// Replaces or appends the element at `index`.
    ///
    /// `index` may be any live position or exactly `len()`, which appends.
    ///
    /// When this handle is the only owner and `index` is below the capacity,
    /// the slot is written in place and the displaced element is released.
    /// Otherwise the elements are carried into a new buffer and this handle is
    /// released. An append into a full buffer doubles the capacity.
    ///
    /// A vector with capacity 0 stays at capacity 0 when doubled, so appending
    /// to it returns an empty vector and `element` is released. Start from
    /// [`with_capacity`](Self::with_capacity) or use [`insert`](Self::insert)
    /// for the first element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowvec::persistent::CowVector;
    ///
    /// let vector = CowVector::from_vec(vec![1, 2]);
    /// let vector = vector.update(0, 5).update(2, 3);
    /// assert_eq!(vector.to_vec(), vec![5, 2, 3]);
    /// assert_eq!(vector.capacity(), 4);
    /// ```
    #[must_use]
    pub fn update(self, index: usize, element: T) -> Self {
        if let Err(error) = self.check_position("update", index) {
            panic!("{error}");
        }
        self.update_unchecked(index, element)
    }

    /// Checked form of [`update`](Self::update).
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfBoundsError`] if `index > len()`. The vector handle
    /// and `element` are released in that case.
    pub fn try_update(self, index: usize, element: T) -> Result<Self, IndexOutOfBoundsError> {
        self.check_position("update", index)?;
        Ok(self.update_unchecked(index, element))
    }

    fn update_unchecked(mut self, index: usize, element: T) -> Self {
        let capacity = self.capacity();
        if index < capacity
            && let Some(buffer) = ReferenceCounter::get_mut(&mut self.buffer)
        {
            drop(buffer.store(index, element));
            return self;
        }

        let old_length = self.len();
        let new_capacity = next_capacity(capacity, index);
        cow_trace!(
            operation = "update",
            index,
            old_length,
            new_capacity,
            "copying into a new buffer"
        );

        let mut source = SourceSlots::detach(self);
        let mut copy = SlotBuffer::allocate(new_capacity);
        let mut element = Some(element);
        let filled = old_length.max(index + 1).min(new_capacity);
        for slot in 0..filled {
            let next = if slot == index {
                element.take()
            } else {
                source.take(slot)
            };
            if let Some(next) = next {
                copy.push(next);
            }
        }
        Self::from_buffer(copy)
    }

    /// Inserts `element` at `index`, shifting later elements up by one.
    ///
    /// Insertion always allocates a new buffer of exactly `len() + 1` slots
    /// and releases this handle, even when it is uniquely owned.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowvec::persistent::CowVector;
    ///
    /// let vector = CowVector::from_vec(vec![1, 3]).insert(1, 2);
    /// assert_eq!(vector.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(vector.capacity(), 3);
    /// ```
    #[must_use]
    pub fn insert(self, index: usize, element: T) -> Self {
        if let Err(error) = self.check_position("insert", index) {
            panic!("{error}");
        }
        self.insert_unchecked(index, element)
    }

    /// Checked form of [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfBoundsError`] if `index > len()`. The vector handle
    /// and `element` are released in that case.
    pub fn try_insert(self, index: usize, element: T) -> Result<Self, IndexOutOfBoundsError> {
        self.check_position("insert", index)?;
        Ok(self.insert_unchecked(index, element))
    }

    fn insert_unchecked(self, index: usize, element: T) -> Self {
        let new_length = self.len() + 1;
        cow_trace!(
            operation = "insert",
            index,
            new_length,
            "copying into a new buffer"
        );

        let mut source = SourceSlots::detach(self);
        let mut copy = SlotBuffer::allocate(new_length);
        let mut element = Some(element);
        for slot in 0..new_length {
            let next = match slot.cmp(&index) {
                Ordering::Less => source.take(slot),
                Ordering::Equal => element.take(),
                Ordering::Greater => source.take(slot - 1),
            };
            if let Some(next) = next {
                copy.push(next);
            }
        }
        Self::from_buffer(copy)
    }

    /// Returns a copy with the element at `index` replaced, leaving `self`
    /// untouched.
    ///
    /// Unlike [`update`](Self::update) this never writes in place and never
    /// appends: the copy keeps the capacity and length of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowvec::persistent::CowVector;
    ///
    /// let vector = CowVector::from_vec(vec![1, 2, 3]);
    /// let changed = vector.updated(1, 20);
    /// assert_eq!(vector.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(changed.to_vec(), vec![1, 20, 3]);
    /// ```
    #[must_use]
    pub fn updated(&self, index: usize, element: T) -> Self {
        if let Err(error) = self.check_element("updated", index) {
            panic!("{error}");
        }
        self.updated_unchecked(index, element)
    }

    /// Checked form of [`updated`](Self::updated).
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfBoundsError`] if `index >= len()`.
    pub fn try_updated(&self, index: usize, element: T) -> Result<Self, IndexOutOfBoundsError> {
        self.check_element("updated", index)?;
        Ok(self.updated_unchecked(index, element))
    }

    fn updated_unchecked(&self, index: usize, element: T) -> Self {
        cow_trace!(
            operation = "updated",
            index,
            length = self.len(),
            "copying into a new buffer"
        );

        let mut copy = SlotBuffer::allocate(self.capacity());
        let mut element = Some(element);
        for (slot, old) in self.buffer.live().iter().enumerate() {
            let next = if slot == index {
                element.take()
            } else {
                old.clone()
            };
            if let Some(next) = next {
                copy.push(next);
            }
        }
        Self::from_buffer(copy)
    }

    /// Clones the live elements into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.buffer.live().iter().flatten().cloned().collect()
    }
}

// =============================================================================
// Slot Sources
// =============================================================================

/// The old buffer a copy is being filled from.
///
/// A uniquely owned buffer gives up its handles by move; a shared one is read
/// through and each carried handle is duplicated. Dropping the source releases
/// whatever was not carried over, or the shared buffer handle itself.
enum SourceSlots<T> {
    Owned(Vec<Option<T>>),
    Shared(ReferenceCounter<SlotBuffer<T>>),
}

impl<T: Clone> SourceSlots<T> {
    fn detach(vector: CowVector<T>) -> Self {
        match ReferenceCounter::try_unwrap(vector.buffer) {
            Ok(mut buffer) => Self::Owned(buffer.take_live()),
            Err(shared) => Self::Shared(shared),
        }
    }

    fn take(&mut self, index: usize) -> Option<T> {
        match self {
            Self::Owned(slots) => slots.get_mut(index).and_then(Option::take),
            Self::Shared(buffer) => buffer.get(index).cloned(),
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Clone for CowVector<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            buffer: ReferenceCounter::clone(&self.buffer),
        }
    }
}

impl<T> Default for CowVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for CowVector<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_vec(elements)
    }
}

impl<T: PartialEq> PartialEq for CowVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.buffer.live() == other.buffer.live()
    }
}

impl<T: Eq> Eq for CowVector<T> {}

impl<T: Hash> Hash for CowVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Capacity is not part of the value
        self.len().hash(state);
        for element in self.buffer.live().iter().flatten() {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CowVector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_list()
            .entries(self.buffer.live().iter().flatten())
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for CowVector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self.buffer.live().iter().flatten() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for CowVector<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self.buffer.live().iter().flatten() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct CowVectorVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> CowVectorVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for CowVectorVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = CowVector<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(CowVector::from_vec(elements))
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for CowVector<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(CowVectorVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
