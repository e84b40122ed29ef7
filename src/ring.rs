//! Circular doubly-linked sibling rings over arena keys
//!
//! Every node embeds a [`RingLink`] holding the keys of its left and right
//! neighbours. In a ring:
//! - a single node points to itself in both directions
//! - there is no head or tail, any member is an entry point
//! - splicing two rings together is O(1)
//! - iteration wraps around, so it must track where it started
//!
//! A node belongs to exactly one ring at a time. The Fibonacci heap uses one
//! ring for its roots and one ring per node for that node's children.

use crate::storage::{Arena, NodeKey};

/// Left/right neighbour keys of a ring member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingLink {
    left: NodeKey,
    right: NodeKey,
}

impl RingLink {
    #[inline]
    pub fn new(left: NodeKey, right: NodeKey) -> Self {
        Self { left, right }
    }

    /// A link for a one-element ring containing `key`
    #[inline]
    pub fn singleton(key: NodeKey) -> Self {
        Self {
            left: key,
            right: key,
        }
    }

    #[inline]
    pub fn left(&self) -> NodeKey {
        self.left
    }

    #[inline]
    pub fn right(&self) -> NodeKey {
        self.right
    }
}

/// Nodes that carry a [`RingLink`]
pub trait Linked {
    fn link(&self) -> &RingLink;
    fn link_mut(&mut self) -> &mut RingLink;
}

impl<N: Linked> Arena<N> {
    #[inline]
    pub fn right_of(&self, key: NodeKey) -> NodeKey {
        self[key].link().right
    }

    #[inline]
    pub fn left_of(&self, key: NodeKey) -> NodeKey {
        self[key].link().left
    }

    /// Turns `key` into a ring of one, forgetting its old neighbours.
    ///
    /// The old neighbours are not updated; only use this on a node whose
    /// former ring is being discarded or rebuilt.
    #[inline]
    pub fn make_circular(&mut self, key: NodeKey) {
        *self[key].link_mut() = RingLink::singleton(key);
    }

    #[inline]
    pub fn is_singleton(&self, key: NodeKey) -> bool {
        self.right_of(key) == key
    }

    /// Splices the ring containing `b` into the ring containing `a`.
    ///
    /// The members of `b`'s ring end up just before `a`:
    ///
    /// ```text
    /// before: ... a_left <-> a <-> ...      ... b_left <-> b <-> ...
    /// after:  ... a_left <-> b <-> ... <-> b_left <-> a <-> ...
    /// ```
    ///
    /// `a` and `b` must belong to different rings.
    pub fn splice(&mut self, a: NodeKey, b: NodeKey) {
        debug_assert!(a != b, "cannot splice a ring into itself");

        let a_left = self.left_of(a);
        let b_left = self.left_of(b);

        self[a_left].link_mut().right = b;
        self[b].link_mut().left = a_left;

        self[b_left].link_mut().right = a;
        self[a].link_mut().left = b_left;
    }

    /// Removes `key` from its ring and leaves it as a ring of one.
    ///
    /// Returns a remaining member of the old ring, or `None` if `key` was
    /// its only member.
    pub fn unlink(&mut self, key: NodeKey) -> Option<NodeKey> {
        let left = self.left_of(key);
        let right = self.right_of(key);

        if right == key {
            return None;
        }

        self[left].link_mut().right = right;
        self[right].link_mut().left = left;
        self.make_circular(key);
        Some(right)
    }

    /// Iterates over the ring containing `start`, beginning at `start` and
    /// following `right` links.
    ///
    /// The ring must not be modified while iterating; collect the keys first
    /// when restructuring.
    pub fn ring(&self, start: NodeKey) -> RingIter<'_, N> {
        RingIter {
            arena: self,
            start,
            next: Some(start),
        }
    }

    /// Number of members in the ring containing `start`. O(ring size).
    pub fn ring_len(&self, start: NodeKey) -> usize {
        self.ring(start).count()
    }

    /// Walks the ring containing `start` without trusting its links.
    ///
    /// Returns the members in `right` order, or `None` if a link points at a
    /// dead node, if some `right` neighbour's `left` does not point back, or
    /// if the walk does not return to `start` within `self.len()` steps.
    pub fn checked_ring(&self, start: NodeKey) -> Option<Vec<NodeKey>> {
        let mut members = Vec::new();
        let mut current = start;

        loop {
            let right = self.get(current)?.link().right;
            if self.get(right)?.link().left != current {
                return None;
            }

            members.push(current);
            if members.len() > self.len() {
                return None;
            }

            current = right;
            if current == start {
                return Some(members);
            }
        }
    }
}

/// Iterator over the keys of one ring, see [`Arena::ring`]
pub struct RingIter<'a, N> {
    arena: &'a Arena<N>,
    start: NodeKey,
    next: Option<NodeKey>,
}

impl<N: Linked> Iterator for RingIter<'_, N> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        let right = self.arena.right_of(current);
        self.next = (right != self.start).then_some(right);
        Some(current)
    }
}
