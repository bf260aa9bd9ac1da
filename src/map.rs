//! Ordered map type for dict values.
//!
//! This module provides [`ValueMap`], a wrapper around [`IndexMap`] that keeps
//! insertion order for entries. Keys are arbitrary [`Value`]s, so a map can hold
//! `int`, `str`, tuple or `None` keys side by side.
//!
//! ## Why IndexMap?
//!
//! - **Deterministic output**: entries display and serialize in insertion order
//! - **Stable validation order**: the first offending entry reported by a typed
//!   dictionary is the first one inserted
//! - **Map equality**: two maps with the same entries are equal regardless of order
//!
//! ## Examples
//!
//! ```rust
//! use dictkit::{Value, ValueMap};
//!
//! let mut map = ValueMap::new();
//! map.insert(Value::from("name"), Value::from("Alice"));
//! map.insert(Value::from(1), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get(&Value::from("name")).and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

/// An insertion-ordered map of values to values.
///
/// # Examples
///
/// ```rust
/// use dictkit::{Value, ValueMap};
///
/// let mut map = ValueMap::new();
/// map.insert(Value::from("first"), Value::from(1));
/// map.insert(Value::from("second"), Value::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec![Value::from("first"), Value::from("second")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueMap(IndexMap<Value, Value>);

impl ValueMap {
    #[must_use]
    pub fn new() -> Self {
        ValueMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ValueMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and the
    /// key keeps its original position.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

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

impl fmt::Display for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::value::write_map(f, self)
    }
}

impl From<HashMap<Value, Value>> for ValueMap {
    fn from(map: HashMap<Value, Value>) -> Self {
        ValueMap(map.into_iter().collect())
    }
}

impl From<ValueMap> for HashMap<Value, Value> {
    fn from(map: ValueMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for ValueMap {
    type Item = (Value, Value);
    type IntoIter = indexmap::map::IntoIter<Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = (&'a Value, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Value, Value)> for ValueMap {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        ValueMap(IndexMap::from_iter(iter))
    }
}

impl Extend<(Value, Value)> for ValueMap {
    fn extend<T: IntoIterator<Item = (Value, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_keeps_order() {
        let mut map: ValueMap = (1..=3).map(|i| (Value::from(i), Value::None)).collect();
        map.remove(&Value::from(2));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec![Value::from(1), Value::from(3)]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: ValueMap = vec![(Value::from("a"), Value::from(1)), (Value::from("b"), Value::from(2))]
            .into_iter()
            .collect();
        let b: ValueMap = vec![(Value::from("b"), Value::from(2)), (Value::from("a"), Value::from(1))]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mixed_key_types() {
        let mut map = ValueMap::new();
        map.insert(Value::from(1), Value::from("int"));
        map.insert(Value::from("1"), Value::from("str"));
        map.insert(Value::None, Value::from("none"));
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&Value::None), Some(&Value::from("none")));
    }
}
