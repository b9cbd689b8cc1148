//! Slot storage backing a [`CowVector`](super::CowVector).
//!
//! A [`SlotBuffer`] owns `capacity` slots. Slots `0..len` are live and hold
//! `Some(element)`; slots `len..capacity` are reserved and hold `None`, the
//! null sentinel that needs no release.

use std::iter;

/// Contiguous slot storage with a separately tracked logical length.
pub(crate) struct SlotBuffer<T> {
    /// All allocated slots
    slots: Box<[Option<T>]>,
    /// Number of leading live slots
    length: usize,
}

impl<T> SlotBuffer<T> {
    /// Allocates `capacity` slots, all holding the null sentinel.
    pub(crate) fn allocate(capacity: usize) -> Self {
        Self {
            slots: iter::repeat_with(|| None).take(capacity).collect(),
            length: 0,
        }
    }

    /// Builds a full buffer (`len == capacity`) from owned elements.
    pub(crate) fn from_vec(elements: Vec<T>) -> Self {
        let length = elements.len();
        Self {
            slots: elements.into_iter().map(Some).collect(),
            length,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the live element at `index`, if any.
    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        if index < self.length {
            self.slots[index].as_ref()
        } else {
            None
        }
    }

    /// Returns the raw slot at `index`, or `None` past the capacity.
    #[inline]
    pub(crate) fn slot(&self, index: usize) -> Option<Option<&T>> {
        self.slots.get(index).map(Option::as_ref)
    }

    /// Live slots only.
    #[inline]
    pub(crate) fn live(&self) -> &[Option<T>] {
        &self.slots[..self.length]
    }

    /// Stores `element` at `index`, returning the handle it displaced.
    ///
    /// `index` must be below the capacity and at most the current length;
    /// writing at `len` makes one more slot live.
    pub(crate) fn store(&mut self, index: usize, element: T) -> Option<T> {
        debug_assert!(index <= self.length && index < self.capacity());
        let displaced = self.slots[index].replace(element);
        if index == self.length {
            self.length += 1;
        }
        displaced
    }

    /// Moves the live slots out, leaving the buffer empty.
    pub(crate) fn take_live(&mut self) -> Vec<Option<T>> {
        let length = self.length;
        self.length = 0;
        self.slots[..length].iter_mut().map(Option::take).collect()
    }

    /// Appends `element` into the first reserved slot.
    ///
    /// Only used while filling a freshly allocated buffer.
    #[inline]
    pub(crate) fn push(&mut self, element: T) {
        debug_assert!(self.length < self.capacity());
        self.slots[self.length] = Some(element);
        self.length += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_allocate_fills_null_sentinel() {
        let buffer: SlotBuffer<i32> = SlotBuffer::allocate(4);
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 4);
        for index in 0..4 {
            assert_eq!(buffer.slot(index), Some(None));
        }
        assert_eq!(buffer.slot(4), None);
    }

    #[rstest]
    fn test_from_vec_is_full() {
        let buffer = SlotBuffer::from_vec(vec![1, 2, 3]);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.capacity(), 3);
        assert_eq!(buffer.get(2), Some(&3));
        assert_eq!(buffer.get(3), None);
    }

    #[rstest]
    fn test_store_overwrites_and_extends() {
        let mut buffer = SlotBuffer::allocate(2);
        assert_eq!(buffer.store(0, 'a'), None);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.store(0, 'b'), Some('a'));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.store(1, 'c'), None);
        assert_eq!(buffer.len(), 2);
    }

    #[rstest]
    fn test_take_live_empties_buffer() {
        let mut buffer = SlotBuffer::from_vec(vec![1, 2]);
        assert_eq!(buffer.take_live(), vec![Some(1), Some(2)]);
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.slot(0), Some(None));
    }
}
