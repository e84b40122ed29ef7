//! Separate-chaining hash table
//!
//! Keys hash into a fixed array of buckets; colliding entries share a bucket
//! and are found by linear scan. Buckets are [`SmallVec`]s so short chains stay
//! inline. The table starts with [`DEFAULT_CAPACITY`] buckets and grows to
//! `2 * capacity + 1` buckets once the load factor would pass
//! [`MAX_LOAD_FACTOR`].
//!
//! # Example
//!
//! ```rust
//! use classic_collections::hash_table::ChainedHashTable;
//!
//! let mut table = ChainedHashTable::new();
//! table.insert("apple", 1);
//! table.insert("banana", 2);
//!
//! assert_eq!(table.get(&"banana"), Some(&2));
//! assert_eq!(table.remove(&"banana"), Some(2));
//! assert!(!table.contains_key(&"banana"));
//! assert_eq!(table.len(), 1);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;

use log::debug;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

/// Bucket count of a table built with [`ChainedHashTable::new`]
pub const DEFAULT_CAPACITY: usize = 11;

/// Entries per bucket above which the table grows
pub const MAX_LOAD_FACTOR: f64 = 0.75;

type Bucket<K, V> = SmallVec<[(K, V); 2]>;

/// Hash table resolving collisions by chaining
pub struct ChainedHashTable<K, V, S = FxBuildHasher> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    hasher: S,
}

impl<K: Hash + Eq, V> ChainedHashTable<K, V, FxBuildHasher> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a table with `capacity` buckets (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ChainedHashTable<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(1)),
            len: 0,
            hasher,
        }
    }

    /// Number of stored entries
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Entries per bucket
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Inserts `value` under `key`, returning the previous value if the key
    /// was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        if let Some((_, slot)) = self.buckets[index].iter_mut().find(|(k, _)| *k == key) {
            return Some(mem::replace(slot, value));
        }

        let index = if (self.len + 1) as f64 > self.buckets.len() as f64 * MAX_LOAD_FACTOR {
            self.grow();
            self.bucket_index(&key)
        } else {
            index
        };
        self.buckets[index].push((key, value));
        self.len += 1;
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes `key`, returning its value. Absent keys leave the table as is.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)?;

        self.len -= 1;
        Some(bucket.swap_remove(position).1)
    }

    /// Iterates over all entries in bucket order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v)))
    }

    /// Removes every entry, keeping the bucket count
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(SmallVec::clear);
        self.len = 0;
    }

    fn bucket_index<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    fn grow(&mut self) {
        let capacity = self.buckets.len() * 2 + 1;
        debug!(
            "growing hash table from {} to {} buckets ({} entries)",
            self.buckets.len(),
            capacity,
            self.len
        );

        let old = mem::replace(&mut self.buckets, empty_buckets(capacity));
        for (key, value) in old.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.buckets[index].push((key, value));
        }
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    (0..capacity).map(|_| SmallVec::new()).collect()
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> Default for ChainedHashTable<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for ChainedHashTable<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> FromIterator<(K, V)> for ChainedHashTable<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.buckets.iter().flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v))))
            .finish()
    }
}
