//! Insertion-ordered lists deduplicated by an identifier.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Something that carries a stable identity within a [`KeyedList`].
pub trait Keyed {
    /// Identity type (a SHA, a PR number, ...).
    type Key: Eq + Hash + Clone + Debug;

    /// Returns the identity of this item.
    fn key(&self) -> Self::Key;
}

/// A list that keeps the first item seen for every key, in discovery order.
///
/// Serializes as a plain JSON array. Duplicates present in a persisted array
/// are dropped on load.
#[derive(Debug, Clone)]
pub struct KeyedList<T: Keyed> {
    items: Vec<T>,
    keys: HashSet<T::Key>,
}

impl<T: Keyed> KeyedList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            keys: HashSet::new(),
        }
    }

    /// Appends `item` unless an item with the same key is present.
    ///
    /// Returns `true` if the item was inserted.
    pub fn insert(&mut self, item: T) -> bool {
        if !self.keys.insert(item.key()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Returns true if an item with `key` is present.
    #[must_use]
    pub fn contains(&self, key: &T::Key) -> bool {
        self.keys.contains(key)
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates items in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Keyed> Default for KeyedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed + PartialEq> PartialEq for KeyedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Keyed> FromIterator<T> for KeyedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.insert(item);
        }
        list
    }
}

impl<T: Keyed> Extend<T> for KeyedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T: Keyed> IntoIterator for &'a KeyedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Keyed + Serialize> Serialize for KeyedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Keyed + Deserialize<'de>> Deserialize<'de> for KeyedList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
