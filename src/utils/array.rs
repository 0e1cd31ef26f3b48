//! Generic growable array.
//!
//! One container for every element type. Growth follows the same doubling
//! policy as [`StringBuilder`](super::buffer::StringBuilder), and the logical
//! capacity is tracked explicitly so callers can observe it.

use std::ops::Index;
use thiserror::Error;

/// Capacity of a freshly created array, in elements.
pub const INITIAL_CAPACITY: usize = 8;

/// Multiplier applied to the capacity whenever a push would overflow it.
pub const GROWTH_FACTOR: usize = 2;

/// Returned by [`GrowArray::set`] when the index is not below `len()`.
#[allow(unused)]
#[derive(Debug, Error, PartialEq, Eq)]
#[error("index {index} out of bounds for array of length {len}")]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

/// Append-only, index-addressable sequence with amortized doubling growth.
#[derive(Debug, Clone)]
pub struct GrowArray<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> GrowArray<T> {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push_back(&mut self, value: T) {
        self.reserve(1);
        self.items.push(value);
    }

    /// Element at `index`, or `None` when `index >= len()`.
    #[inline]
    #[allow(unused)]
    pub fn at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Overwrite the element at `index`.
    #[allow(unused)]
    pub fn set(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(IndexOutOfBounds { index, len }),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[allow(unused)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    #[allow(unused)]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[allow(unused)]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn reserve(&mut self, additional: usize) {
        let needed = self.items.len() + additional;
        if needed <= self.capacity {
            return;
        }

        let mut capacity = self.capacity;
        while capacity < needed {
            capacity *= GROWTH_FACTOR;
        }

        self.items.reserve_exact(capacity - self.items.len());
        self.capacity = capacity;
    }
}

impl<T: Clone> GrowArray<T> {
    /// Copy every element of `other` onto the end of `self`, in order.
    ///
    /// `other` is left untouched. Appending an empty array changes nothing,
    /// not even the capacity.
    pub fn append(&mut self, other: &GrowArray<T>) {
        if other.is_empty() {
            return;
        }
        self.reserve(other.len());
        self.items.extend_from_slice(&other.items);
    }
}

impl<T> Default for GrowArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for GrowArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> FromIterator<T> for GrowArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        for item in iter {
            array.push_back(item);
        }
        array
    }
}

impl<T> IntoIterator for GrowArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a GrowArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
