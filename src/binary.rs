//! Binary min-heap
//!
//! An array-backed binary min-heap over `(priority, item)` pairs. It has no
//! handles and no `decrease_key`; use [`FibonacciHeap`](crate::fibonacci::FibonacciHeap)
//! when priorities of stored elements need to change.
//!
//! # Time Complexity
//!
//! | Operation  | Complexity   |
//! |------------|--------------|
//! | `push`     | O(log n)     |
//! | `pop`      | O(log n)     |
//! | `peek`     | O(1)         |
//! | `from_vec` | O(n)         |
//! | `merge`    | O(n + m)     |
//!
//! # Example
//!
//! ```rust
//! use classic_collections::Heap;
//! use classic_collections::binary::BinaryMinHeap;
//!
//! let mut heap = BinaryMinHeap::new();
//! for value in [5, 1, 9, 3] {
//!     heap.push(value, ());
//! }
//!
//! assert_eq!(heap.peek(), Some((&1, &())));
//! let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|(p, _)| p)).collect();
//! assert_eq!(order, vec![1, 3, 5, 9]);
//! ```

use crate::traits::{Heap, HeapError, MergeableHeap};

/// Array-backed binary min-heap
#[derive(Debug, Clone)]
pub struct BinaryMinHeap<T, P: Ord> {
    /// Heap-ordered `(priority, item)` pairs; children of `i` are `2i + 1` and `2i + 2`
    data: Vec<(P, T)>,
}

impl<T, P: Ord> BinaryMinHeap<T, P> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Builds a heap from unordered pairs in O(n)
    pub fn from_vec(data: Vec<(P, T)>) -> Self {
        let mut heap = Self { data };
        heap.rebuild();
        heap
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push(&mut self, priority: P, item: T) {
        self.data.push((priority, item));
        self.sift_up(self.data.len() - 1);
    }

    pub fn peek(&self) -> Option<(&P, &T)> {
        self.data.first().map(|(p, t)| (p, t))
    }

    pub fn pop(&mut self) -> Option<(P, T)> {
        if self.data.is_empty() {
            return None;
        }

        let result = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some(result)
    }

    /// Like [`peek`](Self::peek), but an empty heap is an error
    pub fn try_peek(&self) -> Result<(&P, &T), HeapError> {
        self.peek().ok_or(HeapError::EmptyHeap)
    }

    /// Like [`pop`](Self::pop), but an empty heap is an error
    pub fn try_pop(&mut self) -> Result<(P, T), HeapError> {
        self.pop().ok_or(HeapError::EmptyHeap)
    }

    /// Appends all of `other` and restores heap order in O(n + m)
    pub fn merge(&mut self, mut other: Self) {
        if other.data.len() > self.data.len() {
            std::mem::swap(&mut self.data, &mut other.data);
        }
        if other.data.is_empty() {
            return;
        }
        self.data.append(&mut other.data);
        self.rebuild();
    }

    /// Consumes the heap, returning its pairs in ascending priority order
    pub fn into_sorted_vec(mut self) -> Vec<(P, T)> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Some(entry) = self.pop() {
            sorted.push(entry);
        }
        sorted
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    fn rebuild(&mut self) {
        for index in (0..self.data.len() / 2).rev() {
            self.sift_down(index);
        }
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index].0 < self.data[parent].0 {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.data[left].0 < self.data[smallest].0 {
                smallest = left;
            }
            if right < len && self.data[right].0 < self.data[smallest].0 {
                smallest = right;
            }

            if smallest == index {
                break;
            }
            self.data.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T, P: Ord> Heap<T, P> for BinaryMinHeap<T, P> {
    fn new() -> Self {
        BinaryMinHeap::new()
    }

    fn is_empty(&self) -> bool {
        BinaryMinHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        BinaryMinHeap::len(self)
    }

    fn push(&mut self, priority: P, item: T) {
        BinaryMinHeap::push(self, priority, item)
    }

    fn peek(&self) -> Option<(&P, &T)> {
        BinaryMinHeap::peek(self)
    }

    fn pop(&mut self) -> Option<(P, T)> {
        BinaryMinHeap::pop(self)
    }
}

impl<T, P: Ord> MergeableHeap<T, P> for BinaryMinHeap<T, P> {
    fn merge(&mut self, other: Self) {
        BinaryMinHeap::merge(self, other)
    }
}

impl<T, P: Ord> Default for BinaryMinHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> FromIterator<(P, T)> for BinaryMinHeap<T, P> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T, P: Ord> Extend<(P, T)> for BinaryMinHeap<T, P> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        for (priority, item) in iter {
            self.push(priority, item);
        }
    }
}
