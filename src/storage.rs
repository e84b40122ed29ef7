//! Arena storage for heap nodes
//!
//! Nodes live in a [`SlotMap`] and refer to each other by [`NodeKey`]. Keys are
//! generational: once a node is removed, every key that pointed at it stops
//! resolving, even after its slot is reused. This is what lets the heaps hand
//! out handles that can be checked for staleness instead of dangling.

use std::ops::{Index, IndexMut};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Generational key of a node stored in an [`Arena`]
    pub struct NodeKey;
}

/// Arena of heap nodes addressed by [`NodeKey`]
///
/// Indexing with `arena[key]` is meant for links the owning structure keeps
/// consistent itself and panics on a dead key, like slice indexing. Keys that
/// come from outside (handles) must go through [`Arena::get`] or
/// [`Arena::contains`].
#[derive(Debug, Clone)]
pub struct Arena<N> {
    nodes: SlotMap<NodeKey, N>,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<N> Arena<N> {
    /// Creates an arena with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Number of live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a node, returning its key
    pub fn insert(&mut self, node: N) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Insert a node built from its own key
    ///
    /// Used for nodes that start out linked to themselves.
    pub fn insert_with_key(&mut self, build: impl FnOnce(NodeKey) -> N) -> NodeKey {
        self.nodes.insert_with_key(build)
    }

    /// Remove a node, returning it if the key was live
    pub fn remove(&mut self, key: NodeKey) -> Option<N> {
        self.nodes.remove(key)
    }

    #[inline]
    pub fn get(&self, key: NodeKey) -> Option<&N> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut N> {
        self.nodes.get_mut(key)
    }

    /// Check whether `key` still refers to a live node
    #[inline]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Iterate over all live nodes in storage order
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &N)> {
        self.nodes.iter()
    }

    /// Remove every node, yielding them with their former keys
    pub fn drain(&mut self) -> impl Iterator<Item = (NodeKey, N)> + '_ {
        self.nodes.drain()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<N> Index<NodeKey> for Arena<N> {
    type Output = N;

    #[inline]
    fn index(&self, key: NodeKey) -> &N {
        &self.nodes[key]
    }
}

impl<N> IndexMut<NodeKey> for Arena<N> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut N {
        &mut self.nodes[key]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_basic() {
        let mut arena: Arena<i32> = Arena::default();

        let key = arena.insert(42);
        assert_eq!(arena.get(key), Some(&42));

        arena[key] = 100;
        assert_eq!(arena[key], 100);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_removed_key_is_stale() {
        let mut arena: Arena<i32> = Arena::default();

        let key = arena.insert(42);
        assert!(arena.contains(key));
        assert_eq!(arena.remove(key), Some(42));

        assert!(!arena.contains(key));
        assert_eq!(arena.get(key), None);
        assert_eq!(arena.remove(key), None);
    }

    #[test]
    fn test_reused_slot_does_not_revive_old_key() {
        let mut arena: Arena<&str> = Arena::default();

        let old = arena.insert("old");
        arena.remove(old);
        let new = arena.insert("new");

        assert_ne!(old, new);
        assert_eq!(arena.get(old), None);
        assert_eq!(arena.get(new), Some(&"new"));
    }

    #[test]
    fn test_insert_with_key_sees_own_key() {
        let mut arena: Arena<NodeKey> = Arena::default();
        let key = arena.insert_with_key(|k| k);
        assert_eq!(arena[key], key);
    }

    #[test]
    fn test_drain_empties_arena() {
        let mut arena: Arena<u8> = Arena::with_capacity(4);
        let a = arena.insert(1);
        let b = arena.insert(2);

        let mut drained: Vec<_> = arena.drain().collect();
        drained.sort_by_key(|(_, v)| *v);

        assert_eq!(drained, vec![(a, 1), (b, 2)]);
        assert!(arena.is_empty());
    }
}
