//! Ordered one-to-many mapping tables
//!
//! [`MappingTable`] is the storage behind every mappable validator:
//! `key -> ordered list of values`. Keys keep their insertion order, values
//! keep theirs, and the same value may be mapped several times under one key.
//! Removing a value removes a single occurrence.

use std::hash::Hash;

use indexmap::{Equivalent, IndexMap};

/// Ordered multimap from `K` to a list of `V`.
///
/// # Examples
///
/// ```rust,ignore
/// use rulegraph::mapping::MappingTable;
///
/// let mut table = MappingTable::new();
/// table.insert("email", 1);
/// table.insert("email", 2);
/// table.insert("email", 1);
///
/// assert_eq!(table.values("email"), [1, 2, 1]);
///
/// table.remove_mapping("email", &1);
/// assert_eq!(table.values("email"), [2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct MappingTable<K, V> {
    entries: IndexMap<K, Vec<V>>,
}

impl<K, V> Default for MappingTable<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K, V> MappingTable<K, V>
where
    K: Hash + Eq,
    V: PartialEq + Clone,
{
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the list of `key`.
    ///
    /// Returns `true` when `key` was not present before.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut created = false;
        self.entries
            .entry(key)
            .or_insert_with(|| {
                created = true;
                Vec::new()
            })
            .push(value);
        created
    }

    /// Returns the values mapped to `key`, empty when the key is unknown.
    pub fn values<Q>(&self, key: &Q) -> &[V]
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns an owned copy of the values mapped to `key`.
    ///
    /// Dispatch iterates over this copy so that callbacks may remap the
    /// table while the pass is running.
    pub fn snapshot_values<Q>(&self, key: &Q) -> Vec<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.values(key).to_vec()
    }

    /// Returns `true` when `key` is present (even with an empty list).
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Removes `key` with its whole list, keeping the order of the other keys.
    pub fn remove_key<Q>(&mut self, key: &Q) -> Option<(K, Vec<V>)>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.entries.shift_remove_entry(key)
    }

    /// Removes the first occurrence of `value` from the list of `key`.
    pub fn remove_mapping<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.entries
            .get_mut(key)
            .is_some_and(|values| remove_first(values, value))
    }

    /// Removes the first occurrence of `value` from every list.
    ///
    /// Returns the number of lists that contained it.
    pub fn remove_value(&mut self, value: &V) -> usize {
        self.entries
            .values_mut()
            .filter_map(|values| remove_first(values, value).then_some(()))
            .count()
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Iterates over every mapped value, key by key, in insertion order.
    pub fn all_values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().flatten()
    }

    /// Iterates over `(key, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no key is present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn remove_first<V: PartialEq>(values: &mut Vec<V>, value: &V) -> bool {
    match values.iter().position(|v| v == value) {
        Some(index) => {
            values.remove(index);
            true
        }
        None => false,
    }
}
