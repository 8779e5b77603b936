//! Ordered map type for mapping values.
//!
//! This module provides [`ValueMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order. The encoder expands a map as its keys and
//! values interleaved in iteration order, so the order of insertion is the
//! order of the fields on the wire.
//!
//! Unlike `IndexMap`, two `ValueMap`s are equal only if they hold the same
//! entries *in the same order*, since they would encode differently
//! otherwise.
//!
//! ## Examples
//!
//! ```rust
//! use nulfield::{ValueMap, Value};
//!
//! let mut map = ValueMap::new();
//! map.insert(Value::from("name"), Value::from("Alice"));
//! map.insert(Value::from(7), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get(&Value::from("name")).and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::hash::{Hash, Hasher};

/// An insertion-ordered map from values to values.
///
/// # Examples
///
/// ```rust
/// use nulfield::{ValueMap, Value};
///
/// let mut map = ValueMap::new();
/// map.insert(Value::from("first"), Value::from(1));
/// map.insert(Value::from("second"), Value::from(2));
///
/// let keys: Vec<_> = map.keys().filter_map(|k| k.as_str()).collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValueMap(IndexMap<Value, Value>);

impl ValueMap {
    /// Creates an empty `ValueMap`.
    #[must_use]
    pub fn new() -> Self {
        ValueMap(IndexMap::new())
    }

    /// Creates an empty `ValueMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ValueMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the value is replaced in place
    /// (the key keeps its original position) and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nulfield::{ValueMap, Value};
    ///
    /// let mut map = ValueMap::new();
    /// assert!(map.insert(Value::from("key"), Value::from(42)).is_none());
    /// assert!(map.insert(Value::from("key"), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Value, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Value, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.0.iter()
    }
}

impl PartialEq for ValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl Eq for ValueMap {}

impl Hash for ValueMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for (k, v) in &self.0 {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = (&'a Value, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ValueMap {
    type Item = (Value, Value);
    type IntoIter = indexmap::map::IntoIter<Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(Value, Value)> for ValueMap {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        ValueMap(IndexMap::from_iter(iter))
    }
}

impl<K: Into<Value>, V: Into<Value>, const N: usize> From<[(K, V); N]> for ValueMap {
    fn from(entries: [(K, V); N]) -> Self {
        entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }
}
