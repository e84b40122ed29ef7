//! Classic data structures for Rust
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) amortized insert and decrease_key; O(log n) amortized
//!   extract_min and delete. Handles are generational arena keys, so using one
//!   after its element is gone is an error rather than a dangling pointer.
//! - **Binary Min-Heap**: array-backed push/pop/peek with O(n) bulk construction
//! - **Chained Hash Table**: separate chaining with load-factor driven growth
//!
//! # Example
//!
//! ```rust
//! use classic_collections::fibonacci::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! let _handle2 = heap.insert(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.find_min(), Some((&1, &"item1")));
//! assert_eq!(heap.extract_min(), Some((1, "item1")));
//! ```

pub mod binary;
pub mod fibonacci;
pub mod hash_table;
pub mod ring;
pub mod storage;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{DecreaseKeyHeap, Heap, HeapError, MergeableHeap};
