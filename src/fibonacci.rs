//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert and decrease_key
//! - O(log n) amortized extract_min and delete
//!
//! The structure consists of a collection of heap-ordered trees. Roots are
//! linked in a circular doubly linked list, and so are the children of every
//! node. The heap keeps a pointer to the minimum root.
//!
//! Nodes live in an [`Arena`] and link to each other by generational keys, so
//! a [`FibonacciHandle`] whose element has been removed is detected and
//! reported as [`HeapError::StaleHandle`] instead of dangling.
//!
//! The heap owns its items: they move in at insert and move out again at
//! extract_min or delete.

use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::ring::{Linked, RingLink};
use crate::storage::{Arena, NodeKey};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError, MergeableHeap};

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to an element in a Fibonacci heap
///
/// A handle stays valid across any other heap operation until its own element
/// is extracted or deleted. It is tied to the heap that issued it: using it
/// with another heap, or after its heap was merged into another one, yields
/// [`HeapError::StaleHandle`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    heap: u64,
    node: NodeKey,
}

impl Handle for FibonacciHandle {}

struct Node<T, K> {
    key: K,
    item: T,
    parent: Option<NodeKey>,
    child: Option<NodeKey>,
    link: RingLink,
    degree: usize,
    marked: bool,
}

impl<T, K> Linked for Node<T, K> {
    fn link(&self) -> &RingLink {
        &self.link
    }

    fn link_mut(&mut self) -> &mut RingLink {
        &mut self.link
    }
}

/// A structural invariant found broken by [`FibonacciHeap::check_invariants`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// `min` is unset on a non-empty heap, or set on an empty one
    MinMismatch,
    /// A ring does not close or its left/right links disagree
    BrokenRing,
    /// A root has a parent pointer or a mark
    BadRoot,
    /// `min` is not the smallest root
    MinNotMinimal,
    /// A child key is smaller than its parent's key
    HeapOrder,
    /// A child does not point back at its parent
    WrongParent,
    /// A node's degree differs from the size of its child ring
    DegreeMismatch { expected: usize, actual: usize },
    /// The number of reachable nodes differs from `len` or the arena size
    LenMismatch { reachable: usize, len: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::MinMismatch => write!(f, "min pointer disagrees with emptiness"),
            InvariantViolation::BrokenRing => write!(f, "sibling ring is not circular"),
            InvariantViolation::BadRoot => write!(f, "root has a parent or is marked"),
            InvariantViolation::MinNotMinimal => write!(f, "min is not the smallest root"),
            InvariantViolation::HeapOrder => write!(f, "child key is smaller than parent key"),
            InvariantViolation::WrongParent => write!(f, "child does not point to its parent"),
            InvariantViolation::DegreeMismatch { expected, actual } => write!(
                f,
                "degree is {} but child ring has {} members",
                actual, expected
            ),
            InvariantViolation::LenMismatch { reachable, len } => {
                write!(f, "{} nodes reachable but len is {}", reachable, len)
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use classic_collections::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let a = heap.insert(5, "A");
/// let b = heap.insert(1, "B");
/// let c = heap.insert(9, "C");
/// heap.insert(3, "D");
///
/// heap.decrease_key(&c, 2).unwrap();
/// assert_eq!(heap.delete(&b), Ok((1, "B")));
/// assert_eq!(heap.find_min(), Some((&2, &"C")));
/// assert!(heap.contains(&a));
/// ```
pub struct FibonacciHeap<T, K: Ord> {
    nodes: Arena<Node<T, K>>,
    min: Option<NodeKey>,
    len: usize,
    id: u64,
}

impl<T, K: Ord> FibonacciHeap<T, K> {
    /// Creates an empty heap
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            min: None,
            len: 0,
            id: NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts `item` with priority `key`, returning a handle to it
    pub fn insert(&mut self, key: K, item: T) -> FibonacciHandle {
        let node = self.nodes.insert_with_key(|this| Node {
            key,
            item,
            parent: None,
            child: None,
            link: RingLink::singleton(this),
            degree: 0,
            marked: false,
        });

        self.add_root(node);
        self.len += 1;

        FibonacciHandle {
            heap: self.id,
            node,
        }
    }

    /// Returns the minimum key and its item, or `None` when empty
    pub fn find_min(&self) -> Option<(&K, &T)> {
        self.min.map(|min| {
            let node = &self.nodes[min];
            (&node.key, &node.item)
        })
    }

    /// Returns the minimum key
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if the heap holds no elements.
    pub fn find_min_key(&self) -> Result<&K, HeapError> {
        self.find_min()
            .map(|(key, _)| key)
            .ok_or(HeapError::EmptyHeap)
    }

    /// Returns the item stored with the minimum key
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if the heap holds no elements.
    pub fn find_min_item(&self) -> Result<&T, HeapError> {
        self.find_min()
            .map(|(_, item)| item)
            .ok_or(HeapError::EmptyHeap)
    }

    /// Returns the key and item behind `handle`
    pub fn get(&self, handle: &FibonacciHandle) -> Result<(&K, &T), HeapError> {
        let node = &self.nodes[self.resolve(handle)?];
        Ok((&node.key, &node.item))
    }

    /// Returns true if `handle` refers to a live element of this heap
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Iterates over all elements in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &T)> {
        self.nodes.iter().map(|(_, node)| (&node.key, &node.item))
    }

    /// Removes and returns the minimum key and its item
    ///
    /// Returns `None` on an empty heap. Unlike [`find_min_key`](Self::find_min_key)
    /// this is not an error.
    pub fn extract_min(&mut self) -> Option<(K, T)> {
        let min = self.min?;
        self.remove_min_root(min)
    }

    /// Lowers the key of the element behind `handle` to `new_key`
    ///
    /// An equal key is accepted and leaves the structure as it is.
    ///
    /// # Errors
    /// - `HeapError::StaleHandle` if the element is gone
    /// - `HeapError::InvalidKeyUpdate` if `new_key` is greater than the
    ///   current key; nothing is modified in that case
    pub fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        let node = self.resolve(handle)?;
        if new_key > self.nodes[node].key {
            return Err(HeapError::InvalidKeyUpdate);
        }
        self.nodes[node].key = new_key;

        if let Some(parent) = self.nodes[node].parent {
            if self.nodes[node].key < self.nodes[parent].key {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if self.nodes[node].key < self.nodes[min].key {
                self.min = Some(node);
            }
        }
        Ok(())
    }

    /// Removes the element behind `handle`, returning its key and item
    ///
    /// Performs the same repair as decreasing the key below every other key,
    /// then extracts the element as the minimum.
    ///
    /// # Errors
    /// `HeapError::StaleHandle` if the element is gone.
    pub fn delete(&mut self, handle: &FibonacciHandle) -> Result<(K, T), HeapError> {
        let node = self.resolve(handle)?;

        if let Some(parent) = self.nodes[node].parent {
            self.cut(node, parent);
            self.cascading_cut(parent);
        }
        self.min = Some(node);

        self.remove_min_root(node).ok_or(HeapError::StaleHandle)
    }

    /// Moves every element of `other` into this heap
    ///
    /// Nodes are re-keyed into this heap's arena, so the cost is linear in
    /// `other.len()`. Handles issued by `other` become stale; handles issued
    /// by `self` stay valid.
    pub fn merge(&mut self, mut other: Self) {
        let Some(other_min) = other.min else {
            return;
        };

        let drained: Vec<_> = other.nodes.drain().collect();
        let mut remap: FxHashMap<NodeKey, NodeKey> = FxHashMap::default();
        remap.reserve(drained.len());
        for (old, node) in drained {
            remap.insert(old, self.nodes.insert(node));
        }

        for &new in remap.values() {
            let node = &mut self.nodes[new];
            node.parent = node.parent.map(|p| remap[&p]);
            node.child = node.child.map(|c| remap[&c]);
            node.link = RingLink::new(remap[&node.link.left()], remap[&node.link.right()]);
        }
        debug!("merged {} nodes into heap of {}", remap.len(), self.len);

        let other_min = remap[&other_min];
        match self.min {
            None => self.min = Some(other_min),
            Some(min) => {
                self.nodes.splice(min, other_min);
                if self.nodes[other_min].key < self.nodes[min].key {
                    self.min = Some(other_min);
                }
            }
        }
        self.len += mem::take(&mut other.len);
        other.min = None;
    }

    /// Removes every element, invalidating all handles
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
        self.len = 0;
    }

    /// Verifies every structural invariant of the forest
    ///
    /// Walks all rings from the minimum root down, so this is O(n). Meant for
    /// tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(min) = self.min else {
            return if self.len == 0 && self.nodes.is_empty() {
                Ok(())
            } else {
                Err(InvariantViolation::MinMismatch)
            };
        };
        if !self.nodes.contains(min) {
            return Err(InvariantViolation::MinMismatch);
        }

        let roots = self
            .nodes
            .checked_ring(min)
            .ok_or(InvariantViolation::BrokenRing)?;
        let mut reachable = 0;
        let mut pending = Vec::new();

        for &root in &roots {
            let node = &self.nodes[root];
            if node.parent.is_some() || node.marked {
                return Err(InvariantViolation::BadRoot);
            }
            if node.key < self.nodes[min].key {
                return Err(InvariantViolation::MinNotMinimal);
            }
            pending.push(root);
        }

        while let Some(current) = pending.pop() {
            reachable += 1;
            if reachable > self.nodes.len() {
                return Err(InvariantViolation::LenMismatch {
                    reachable,
                    len: self.len,
                });
            }

            let node = &self.nodes[current];
            let children = match node.child {
                None => Vec::new(),
                Some(child) => self
                    .nodes
                    .checked_ring(child)
                    .ok_or(InvariantViolation::BrokenRing)?,
            };
            if children.len() != node.degree {
                return Err(InvariantViolation::DegreeMismatch {
                    expected: children.len(),
                    actual: node.degree,
                });
            }

            for child in children {
                let child_node = &self.nodes[child];
                if child_node.parent != Some(current) {
                    return Err(InvariantViolation::WrongParent);
                }
                if child_node.key < node.key {
                    return Err(InvariantViolation::HeapOrder);
                }
                pending.push(child);
            }
        }

        if reachable != self.len || reachable != self.nodes.len() {
            return Err(InvariantViolation::LenMismatch {
                reachable,
                len: self.len,
            });
        }
        Ok(())
    }

    fn resolve(&self, handle: &FibonacciHandle) -> Result<NodeKey, HeapError> {
        if handle.heap == self.id && self.nodes.contains(handle.node) {
            Ok(handle.node)
        } else {
            Err(HeapError::StaleHandle)
        }
    }

    /// Splices a singleton `node` into the root ring and updates `min`
    fn add_root(&mut self, node: NodeKey) {
        match self.min {
            None => self.min = Some(node),
            Some(min) => {
                self.nodes.splice(min, node);
                if self.nodes[node].key < self.nodes[min].key {
                    self.min = Some(node);
                }
            }
        }
    }

    /// Removes the root `min`, which must be the current minimum
    fn remove_min_root(&mut self, min: NodeKey) -> Option<(K, T)> {
        debug_assert_eq!(self.min, Some(min));

        // Children become roots
        if let Some(child) = self.nodes[min].child.take() {
            let children: Vec<_> = self.nodes.ring(child).collect();
            for c in children {
                let node = &mut self.nodes[c];
                node.parent = None;
                node.marked = false;
            }
            self.nodes.splice(min, child);
            self.nodes[min].degree = 0;
        }

        let next = self.nodes.unlink(min);
        let node = self.nodes.remove(min)?;
        self.len -= 1;

        match next {
            None => self.min = None,
            Some(root) => {
                self.min = Some(root);
                self.consolidate(root);
            }
        }

        Some((node.key, node.item))
    }

    /// Links roots of equal degree until every root degree is distinct
    fn consolidate(&mut self, start: NodeKey) {
        let roots: Vec<_> = self.nodes.ring(start).collect();
        let root_count = roots.len();

        let mut by_degree: Vec<Option<NodeKey>> = vec![None; degree_bound(self.len)];
        for root in roots {
            let mut x = root;
            let mut degree = self.nodes[x].degree;

            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                let Some(mut y) = by_degree[degree].take() else {
                    break;
                };
                // On equal keys the carried tree `x` stays on top
                if self.nodes[y].key < self.nodes[x].key {
                    mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                degree += 1;
            }

            by_degree[degree] = Some(x);
        }

        self.min = None;
        let mut survivors = 0;
        for root in by_degree.into_iter().flatten() {
            self.nodes.make_circular(root);
            self.add_root(root);
            survivors += 1;
        }
        trace!("consolidated {} roots into {}", root_count, survivors);
    }

    /// Makes root `y` a child of root `x`
    fn link(&mut self, y: NodeKey, x: NodeKey) {
        self.nodes.unlink(y);

        let node = &mut self.nodes[y];
        node.parent = Some(x);
        node.marked = false;

        match self.nodes[x].child {
            None => self.nodes[x].child = Some(y),
            Some(child) => self.nodes.splice(child, y),
        }
        self.nodes[x].degree += 1;
    }

    /// Moves `node` from the child ring of `parent` to the root ring
    fn cut(&mut self, node: NodeKey, parent: NodeKey) {
        let sibling = self.nodes.unlink(node);
        if self.nodes[parent].child == Some(node) {
            self.nodes[parent].child = sibling;
        }
        self.nodes[parent].degree -= 1;

        let cut = &mut self.nodes[node];
        cut.parent = None;
        cut.marked = false;

        self.add_root(node);
    }

    /// Walks up from `node`, cutting marked ancestors until it reaches a root
    /// or an unmarked node, which gets marked.
    fn cascading_cut(&mut self, mut node: NodeKey) {
        let mut cuts = 0;
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                break;
            }
            self.cut(node, parent);
            cuts += 1;
            node = parent;
        }
        if cuts > 1 {
            trace!("cascading cut moved {} nodes to the root ring", cuts);
        }
    }

    #[cfg(test)]
    fn root_degrees(&self) -> Vec<usize> {
        match self.min {
            None => Vec::new(),
            Some(min) => self
                .nodes
                .ring(min)
                .map(|root| self.nodes[root].degree)
                .collect(),
        }
    }
}

/// Size of the degree table for `n` nodes: floor(log2 n) + 1.
///
/// The table still grows if a link produces a larger degree.
fn degree_bound(n: usize) -> usize {
    match n {
        0 => 1,
        n => n.ilog2() as usize + 1,
    }
}

impl<T, K: Ord> Default for FibonacciHeap<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, K: Ord + fmt::Debug> fmt::Debug for FibonacciHeap<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min", &self.find_min())
            .finish()
    }
}

impl<T, K: Ord> Heap<T, K> for FibonacciHeap<T, K> {
    fn new() -> Self {
        FibonacciHeap::new()
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, priority: K, item: T) {
        self.insert(priority, item);
    }

    fn peek(&self) -> Option<(&K, &T)> {
        self.find_min()
    }

    fn pop(&mut self) -> Option<(K, T)> {
        self.extract_min()
    }
}

impl<T, K: Ord> MergeableHeap<T, K> for FibonacciHeap<T, K> {
    fn merge(&mut self, other: Self) {
        FibonacciHeap::merge(self, other)
    }
}

impl<T, K: Ord> DecreaseKeyHeap<T, K> for FibonacciHeap<T, K> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, priority: K, item: T) -> FibonacciHandle {
        self.insert(priority, item)
    }

    fn decrease_key(&mut self, handle: &FibonacciHandle, new_priority: K) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_priority)
    }

    fn delete(&mut self, handle: &FibonacciHandle) -> Result<(K, T), HeapError> {
        FibonacciHeap::delete(self, handle)
    }
}

impl<T, K: Ord> Extend<(K, T)> for FibonacciHeap<T, K> {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, item) in iter {
            self.insert(key, item);
        }
    }
}

impl<T, K: Ord> FromIterator<(K, T)> for FibonacciHeap<T, K> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut heap = FibonacciHeap::new();
        heap.extend(iter);
        heap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl<T, K: Ord> FibonacciHeap<T, K> {
        fn handle_of(&self, node: NodeKey) -> FibonacciHandle {
            FibonacciHandle { heap: self.id, node }
        }

        fn children(&self, node: NodeKey) -> Vec<NodeKey> {
            match self.nodes[node].child {
                None => Vec::new(),
                Some(child) => self.nodes.ring(child).collect(),
            }
        }

        fn child_with_degree(&self, node: NodeKey, degree: usize) -> NodeKey {
            self.children(node)
                .into_iter()
                .find(|&c| self.nodes[c].degree == degree)
                .expect("binomial tree has a child of every lower degree")
        }
    }

    fn drain_keys<T>(heap: &mut FibonacciHeap<T, i32>) -> Vec<i32> {
        let mut keys = Vec::new();
        while let Some((key, _)) = heap.extract_min() {
            heap.check_invariants().unwrap();
            keys.push(key);
        }
        keys
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.insert(5, "a");
        heap.insert(3, "b");
        heap.insert(7, "c");

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.find_min(), Some((&3, &"b")));

        assert_eq!(heap.extract_min(), Some((3, "b")));
        assert_eq!(heap.find_min(), Some((&5, &"a")));
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_empty_heap_asymmetry() {
        let mut heap: FibonacciHeap<&str, i32> = FibonacciHeap::new();

        assert_eq!(heap.find_min_key(), Err(HeapError::EmptyHeap));
        assert_eq!(heap.find_min_item(), Err(HeapError::EmptyHeap));
        assert_eq!(heap.extract_min(), None);
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_round_trip_sorted() {
        let mut heap = FibonacciHeap::new();
        for key in [5, 1, 9, 3] {
            heap.insert(key, ());
        }

        assert_eq!(heap.find_min_key(), Ok(&1));
        assert_eq!(drain_keys(&mut heap), vec![1, 3, 5, 9]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_decrease_key_then_delete() {
        let mut heap = FibonacciHeap::new();
        let _a = heap.insert(5, "A");
        let b = heap.insert(1, "B");
        let c = heap.insert(9, "C");
        let _d = heap.insert(3, "D");

        heap.decrease_key(&c, 2).unwrap();
        assert_eq!(heap.delete(&b), Ok((1, "B")));
        heap.check_invariants().unwrap();

        assert_eq!(heap.find_min_key(), Ok(&2));
        assert_eq!(heap.find_min_item(), Ok(&"C"));
        assert_eq!(heap.len(), 3);
        assert_eq!(drain_keys(&mut heap), vec![2, 3, 5]);
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = FibonacciHeap::new();
        let _h1 = heap.insert(10, "a");
        let h2 = heap.insert(20, "b");
        let h3 = heap.insert(30, "c");

        assert_eq!(heap.find_min(), Some((&10, &"a")));

        heap.decrease_key(&h2, 5).unwrap();
        assert_eq!(heap.find_min(), Some((&5, &"b")));

        heap.decrease_key(&h3, 1).unwrap();
        assert_eq!(heap.find_min(), Some((&1, &"c")));
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_decrease_key_rejects_increase() {
        let mut heap = FibonacciHeap::new();
        for key in 0..8 {
            heap.insert(key, key);
        }
        heap.extract_min();
        let h = heap.insert(50, 50);

        assert_eq!(heap.decrease_key(&h, 51), Err(HeapError::InvalidKeyUpdate));
        assert_eq!(heap.get(&h), Ok((&50, &50)));

        // Equal keys are not an increase
        assert_eq!(heap.decrease_key(&h, 50), Ok(()));
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_stale_handles() {
        let mut heap = FibonacciHeap::new();
        let a = heap.insert(1, "a");
        let b = heap.insert(2, "b");

        assert_eq!(heap.extract_min(), Some((1, "a")));
        assert!(!heap.contains(&a));
        assert_eq!(heap.decrease_key(&a, 0), Err(HeapError::StaleHandle));
        assert_eq!(heap.delete(&a), Err(HeapError::StaleHandle));
        assert_eq!(heap.get(&a), Err(HeapError::StaleHandle));

        assert_eq!(heap.delete(&b), Ok((2, "b")));
        assert_eq!(heap.delete(&b), Err(HeapError::StaleHandle));
        assert!(heap.is_empty());

        // A reused slot does not revive the old handle
        let c = heap.insert(3, "c");
        assert_ne!(b, c);
        assert_eq!(heap.get(&b), Err(HeapError::StaleHandle));
        assert_eq!(heap.get(&c), Ok((&3, &"c")));
    }

    #[test]
    fn test_foreign_handle_is_stale() {
        let mut first = FibonacciHeap::new();
        let mut second = FibonacciHeap::new();
        let h = first.insert(1, ());
        second.insert(1, ());

        assert_eq!(second.decrease_key(&h, 0), Err(HeapError::StaleHandle));
        assert!(!second.contains(&h));
    }

    #[test]
    fn test_consolidate_leaves_distinct_root_degrees() {
        let mut heap = FibonacciHeap::new();
        for key in (0..100).rev() {
            heap.insert(key, ());
        }
        assert_eq!(heap.root_degrees().len(), 100);

        heap.extract_min();
        heap.check_invariants().unwrap();

        let mut degrees = heap.root_degrees();
        let roots = degrees.len();
        degrees.sort_unstable();
        degrees.dedup();
        assert_eq!(degrees.len(), roots);

        // 99 = 64 + 32 + 2 + 1
        assert_eq!(degrees, vec![0, 1, 5, 6]);
    }

    #[test]
    fn test_cut_marks_parent_and_cascades() {
        let mut heap = FibonacciHeap::new();
        for key in 0..32 {
            heap.insert(key, key);
        }
        // 31 nodes consolidate into binomial trees of degree 4, 3, 2, 1 and 0
        heap.extract_min();
        heap.check_invariants().unwrap();

        let root = heap
            .nodes
            .ring(heap.min.unwrap())
            .find(|&r| heap.nodes[r].degree == 4)
            .unwrap();
        let grandparent = heap.child_with_degree(root, 3);
        let parent = heap.child_with_degree(grandparent, 2);
        let children = heap.children(parent);
        assert_eq!(children.len(), 2);

        // First loss only marks the parent
        heap.decrease_key(&heap.handle_of(children[0]), -1).unwrap();
        assert_eq!(heap.nodes[children[0]].parent, None);
        assert!(heap.nodes[parent].marked);
        assert_eq!(heap.nodes[parent].degree, 1);
        assert!(!heap.nodes[grandparent].marked);
        assert_eq!(heap.find_min_key(), Ok(&-1));
        heap.check_invariants().unwrap();

        // Second loss cuts the marked parent and marks the grandparent
        heap.decrease_key(&heap.handle_of(children[1]), -2).unwrap();
        assert_eq!(heap.nodes[children[1]].parent, None);
        assert_eq!(heap.nodes[parent].parent, None);
        assert!(!heap.nodes[parent].marked);
        assert_eq!(heap.nodes[parent].degree, 0);
        assert!(heap.nodes[grandparent].marked);
        assert_eq!(heap.nodes[grandparent].degree, 2);
        assert_eq!(heap.find_min_key(), Ok(&-2));
        heap.check_invariants().unwrap();

        assert_eq!(heap.len(), 31);
        let keys = drain_keys(&mut heap);
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(keys.len(), 31);
    }

    #[test]
    fn test_decrease_key_without_violation_keeps_tree() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..8).map(|k| heap.insert(k * 10, k)).collect();
        heap.extract_min();

        // Find a non-root node and lower it to exactly its parent's key
        let node = handles[1..]
            .iter()
            .map(|h| h.node)
            .find(|&n| heap.nodes[n].parent.is_some())
            .unwrap();
        let parent = heap.nodes[node].parent.unwrap();
        let parent_key = heap.nodes[parent].key;

        heap.decrease_key(&heap.handle_of(node), parent_key).unwrap();
        assert_eq!(heap.nodes[node].parent, Some(parent));
        assert!(!heap.nodes[parent].marked);
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_delete_inner_node() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..16).map(|k| heap.insert(k, k)).collect();
        heap.extract_min();

        let inner = handles
            .iter()
            .copied()
            .filter(|h| heap.contains(h))
            .find(|h| {
                let node = &heap.nodes[h.node];
                node.child.is_some() && node.parent.is_some()
            })
            .unwrap();
        let (key, item) = heap.delete(&inner).unwrap();
        assert_eq!(key, item);
        assert_eq!(heap.len(), 14);
        heap.check_invariants().unwrap();

        let expected: Vec<i32> = (1..16).filter(|&k| k != key).collect();
        assert_eq!(drain_keys(&mut heap), expected);
    }

    #[test]
    fn test_merge() {
        let mut heap1 = FibonacciHeap::new();
        let a = heap1.insert(5, "a");
        heap1.insert(10, "b");

        let mut heap2 = FibonacciHeap::new();
        let c = heap2.insert(3, "c");
        heap2.insert(7, "d");

        heap1.merge(heap2);
        assert_eq!(heap1.find_min(), Some((&3, &"c")));
        assert_eq!(heap1.len(), 4);
        heap1.check_invariants().unwrap();

        assert!(heap1.contains(&a));
        assert!(!heap1.contains(&c));
        heap1.decrease_key(&a, 1).unwrap();

        let order: Vec<_> = std::iter::from_fn(|| heap1.extract_min()).collect();
        assert_eq!(order, vec![(1, "a"), (3, "c"), (7, "d"), (10, "b")]);
    }

    #[test]
    fn test_merge_preserves_trees() {
        let mut heap1: FibonacciHeap<(), i32> = (0..10).map(|k| (k * 2, ())).collect();
        let mut heap2: FibonacciHeap<(), i32> = (0..10).map(|k| (k * 2 + 1, ())).collect();
        heap1.extract_min();
        heap2.extract_min();

        heap1.merge(heap2);
        heap1.check_invariants().unwrap();
        assert_eq!(heap1.len(), 18);
        assert_eq!(drain_keys(&mut heap1), (2..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_merge_into_empty() {
        let mut empty = FibonacciHeap::new();
        let mut other = FibonacciHeap::new();
        other.insert(4, "x");

        empty.merge(other);
        assert_eq!(empty.find_min(), Some((&4, &"x")));
        empty.merge(FibonacciHeap::new());
        assert_eq!(empty.len(), 1);
        empty.check_invariants().unwrap();
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut heap = FibonacciHeap::new();
        let h = heap.insert(1, 1);
        heap.insert(2, 2);

        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert!(!heap.contains(&h));
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_degree_bound() {
        assert_eq!(degree_bound(0), 1);
        assert_eq!(degree_bound(1), 1);
        assert_eq!(degree_bound(2), 2);
        assert_eq!(degree_bound(7), 3);
        assert_eq!(degree_bound(8), 4);
    }
}
