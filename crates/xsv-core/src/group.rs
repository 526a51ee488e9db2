//! Grouping and collapsing of row sequences
//!
//! Grouping is a stable partition: groups appear in the order their key is
//! first seen and rows keep their relative order inside a group.

use crate::record::Record;
use indexmap::IndexMap;
use std::hash::Hash;

/// Partition items by a key, preserving first-seen group order
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> IndexMap<K, Vec<T>>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

/// Partition records by their key member
pub fn group_records<T: Record>(records: Vec<T>) -> IndexMap<T::Key, Vec<T>> {
    group_by(records, T::key)
}

/// Partition untyped rows by their first field, dropping the keys
pub fn group_by_first<T, F>(items: Vec<T>, first: F) -> Vec<Vec<T>>
where
    F: Fn(&T) -> Option<String>,
{
    group_by(items, first).into_values().collect()
}

/// Pick the first or last member of a non-empty group
pub fn pick<T>(group: Vec<T>, use_first: bool) -> Option<T> {
    if use_first {
        group.into_iter().next()
    } else {
        group.into_iter().last()
    }
}

/// Collapse each group to a single entry by the first/last policy
pub fn collapse<K: Eq + Hash, T>(groups: IndexMap<K, Vec<T>>, use_first: bool) -> IndexMap<K, T> {
    groups
        .into_iter()
        .filter_map(|(key, group)| pick(group, use_first).map(|item| (key, item)))
        .collect()
}
