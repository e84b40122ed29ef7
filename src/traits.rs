//! Common traits for the heaps in this crate
//!
//! Three tiers:
//!
//! - [`Heap`]: push/pop/peek over `(priority, item)` pairs
//! - [`MergeableHeap`]: heaps that can absorb another instance
//! - [`DecreaseKeyHeap`]: addressable heaps whose `push_with_handle` returns a
//!   handle usable with `decrease_key` and `delete`
//!
//! [`HeapError`] is shared by every fallible heap operation.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap holds no elements
    EmptyHeap,
    /// The new key is greater than the current key
    InvalidKeyUpdate,
    /// The handle no longer refers to a live element of this heap
    StaleHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::InvalidKeyUpdate => {
                write!(f, "new key is greater than current key")
            }
            HeapError::StaleHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in an addressable heap
///
/// Handles are cheap to copy and compare. A handle only has meaning for the
/// heap instance that issued it.
pub trait Handle: Copy + PartialEq + Eq {}

/// Base trait for min-heaps storing `(priority, item)` pairs
///
/// # Example
///
/// ```rust
/// use classic_collections::Heap;
/// use classic_collections::binary::BinaryMinHeap;
///
/// let mut heap = BinaryMinHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// Returns `None` on an empty heap rather than an error.
    fn pop(&mut self) -> Option<(P, T)>;
}

/// Heaps that can absorb the contents of another instance of the same type
pub trait MergeableHeap<T, P: Ord>: Heap<T, P> {
    /// Merges `other` into `self`, consuming `other`
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with handle-based operations
///
/// # Example
///
/// ```rust
/// use classic_collections::{DecreaseKeyHeap, Heap};
/// use classic_collections::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle to it
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Lowers the priority of the element identified by `handle`
    ///
    /// # Errors
    /// - `HeapError::StaleHandle` if the element was already removed
    /// - `HeapError::InvalidKeyUpdate` if `new_priority` is greater than the
    ///   current priority; the heap is left unchanged
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;

    /// Removes the element identified by `handle`, returning it
    ///
    /// # Errors
    /// Returns `HeapError::StaleHandle` if the element was already removed.
    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError>;
}
