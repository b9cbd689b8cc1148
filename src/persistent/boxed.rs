//! Reference-counted value handles.
//!
//! [`Boxed`] is the element handle stored in the slots of a
//! [`CowVector`](super::CowVector). Duplicating a handle retains the shared
//! value, dropping (or [`release`](Boxed::release)-ing) it releases the value,
//! and the value itself is freed when the last handle goes away.
//!
//! # Examples
//!
//! ```rust
//! use cowvec::persistent::Boxed;
//!
//! let value = Boxed::new(String::from("shared"));
//! let duplicate = value.duplicate();
//! assert_eq!(value.strong_count(), 2);
//!
//! duplicate.release();
//! assert_eq!(value.strong_count(), 1);
//! assert_eq!(value.as_str(), "shared");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use super::ReferenceCounter;

/// An owned, reference-counted handle to a value.
///
/// Cloning a `Boxed` is the same as [`duplicate`](Self::duplicate): it never
/// copies the value, only bumps its reference count.
pub struct Boxed<T> {
    value: ReferenceCounter<T>,
}

impl<T> Boxed<T> {
    /// Creates a handle owning a freshly allocated value.
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value: ReferenceCounter::new(value),
        }
    }

    /// Returns a second handle to the same value, retaining it.
    #[inline]
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            value: ReferenceCounter::clone(&self.value),
        }
    }

    /// Releases this handle.
    ///
    /// The value is dropped when this was the last handle to it.
    #[inline]
    pub fn release(self) {
        drop(self);
    }

    /// Returns the number of handles currently sharing the value.
    #[inline]
    #[must_use]
    pub fn strong_count(&self) -> usize {
        ReferenceCounter::strong_count(&self.value)
    }

    /// Returns `true` when this is the only handle to the value.
    #[inline]
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.strong_count() == 1
    }

    /// Returns `true` if both handles point at the same allocation.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.value, &other.value)
    }

    /// Returns the value if this is the only handle, or the handle back otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when other handles still share the value.
    pub fn try_unwrap(self) -> Result<T, Self> {
        ReferenceCounter::try_unwrap(self.value).map_err(|value| Self { value })
    }
}

impl<T> Clone for Boxed<T> {
    #[inline]
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl<T> Deref for Boxed<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> AsRef<T> for Boxed<T> {
    #[inline]
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T> From<T> for Boxed<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: PartialEq> PartialEq for Boxed<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.value == *other.value
    }
}

impl<T: Eq> Eq for Boxed<T> {}

impl<T: Hash> Hash for Boxed<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Boxed<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Boxed").field(&*self.value).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Boxed<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.value)
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Boxed<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Boxed<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::new)
    }
}
