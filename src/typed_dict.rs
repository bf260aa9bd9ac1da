//! Dictionaries that enforce their kind's key and value descriptors.
//!
//! Every way of putting an entry into a [`TypedDict`] goes through the same
//! check: the key must match the kind's key descriptor and the value its value
//! descriptor. A rejected entry leaves the dictionary exactly as it was.
//!
//! ## Examples
//!
//! ```rust
//! use dictkit::{Descriptor, KindRegistry, TypedDict, Value};
//!
//! let registry = KindRegistry::new();
//! let kind = registry.kind(Descriptor::str(), Descriptor::int()).unwrap();
//!
//! let mut ages = TypedDict::new(kind);
//! ages.insert("alice", 31).unwrap();
//!
//! let err = ages.insert(7, 31).unwrap_err();
//! assert_eq!(err.to_string(), "Key must be of type str, got 'int'");
//! assert_eq!(ages.len(), 1);
//! ```
//!
//! ## Multi-key operations
//!
//! [`select`](TypedDict::select), [`set_many`](TypedDict::set_many),
//! [`set_all`](TypedDict::set_all), [`add`](TypedDict::add),
//! [`drop_keys`](TypedDict::drop_keys) and
//! [`drop_in_place`](TypedDict::drop_in_place) act on several keys at once and
//! are all-or-nothing.

use crate::descriptor::Descriptor;
use crate::error::{Error, Result, Role};
use crate::kind::Kind;
use crate::map::ValueMap;
use crate::validate::validate;
use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A map whose entries are checked against a [`Kind`].
///
/// Entries keep insertion order. Two typed dictionaries are equal when they
/// have the same kind and equal entries.
#[derive(Clone, Debug)]
pub struct TypedDict {
    kind: Arc<Kind>,
    entries: ValueMap,
}

impl TypedDict {
    /// Creates an empty dictionary of `kind`.
    #[must_use]
    pub fn new(kind: Arc<Kind>) -> Self {
        TypedDict {
            kind,
            entries: ValueMap::new(),
        }
    }

    /// Builds a dictionary from `entries`, checking each one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeConstraintViolation`] for the first offending entry.
    /// No dictionary is produced in that case.
    pub fn from_entries<I>(kind: Arc<Kind>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let mut map = ValueMap::new();
        for (key, value) in entries {
            check_entry(&kind, &key, &value)?;
            map.insert(key, value);
        }
        Ok(TypedDict { kind, entries: map })
    }

    /// Builds a dictionary from an existing map.
    ///
    /// # Errors
    ///
    /// Same as [`TypedDict::from_entries`].
    pub fn from_value_map(kind: Arc<Kind>, map: ValueMap) -> Result<Self> {
        for (key, value) in &map {
            check_entry(&kind, key, value)?;
        }
        Ok(TypedDict { kind, entries: map })
    }

    /// Builds a dictionary from a dict value (plain or typed).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Custom`] if `value` is not a dict, otherwise the same
    /// as [`TypedDict::from_entries`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dictkit::{value, Descriptor, KindRegistry, TypedDict};
    ///
    /// let kind = KindRegistry::new()
    ///     .kind(Descriptor::str(), Descriptor::list(Descriptor::int()))
    ///     .unwrap();
    ///
    /// let dict = TypedDict::try_from_value(kind.clone(), value!({"a": [1, 2]})).unwrap();
    /// assert_eq!(dict.len(), 1);
    /// assert!(TypedDict::try_from_value(kind, value!({"a": [1, "2"]})).is_err());
    /// ```
    pub fn try_from_value(kind: Arc<Kind>, value: Value) -> Result<Self> {
        match value {
            Value::Dict(map) => Self::from_value_map(kind, map),
            Value::TypedDict(dict) => Self::from_value_map(kind, dict.entries),
            other => Err(Error::custom(format!(
                "cannot build {} from a value of type {}",
                kind.type_hint(),
                other.type_name()
            ))),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &Arc<Kind> {
        &self.kind
    }

    #[must_use]
    pub fn key_type(&self) -> &Descriptor {
        self.kind.key_type()
    }

    #[must_use]
    pub fn value_type(&self) -> &Descriptor {
        self.kind.value_type()
    }

    /// Checks and stores an entry, returning the value it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeConstraintViolation`] if the key or the value does
    /// not match. The dictionary is unchanged.
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<Option<Value>> {
        let key = key.into();
        let value = value.into();
        check_entry(&self.kind, &key, &value)?;
        Ok(self.entries.insert(key, value))
    }

    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Value, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Value, Value> {
        self.entries.values()
    }

    #[must_use]
    pub fn as_map(&self) -> &ValueMap {
        &self.entries
    }

    /// Gives up the kind and returns the plain entries.
    #[must_use]
    pub fn into_inner(self) -> ValueMap {
        self.entries
    }

    /// Converts into a plain [`Value::Dict`].
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Dict(self.entries)
    }

    /// Returns a dictionary of the same kind holding only `keys`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if any key is missing.
    pub fn select(&self, keys: &[Value]) -> Result<TypedDict> {
        let mut entries = ValueMap::with_capacity(keys.len());
        for key in keys {
            let value = self.get(key).ok_or_else(|| missing(key))?;
            entries.insert(key.clone(), value.clone());
        }
        Ok(TypedDict {
            kind: Arc::clone(&self.kind),
            entries,
        })
    }

    /// Assigns `values` to `keys` pairwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the counts differ, or
    /// [`Error::TypeConstraintViolation`] if any pair is rejected. Nothing is
    /// stored unless every pair passes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dictkit::{Descriptor, Error, KindRegistry, TypedDict, Value};
    ///
    /// let kind = KindRegistry::new().kind(Descriptor::str(), Descriptor::int()).unwrap();
    /// let mut dict = TypedDict::new(kind);
    ///
    /// let keys = [Value::from("a"), Value::from("b")];
    /// dict.set_many(&keys, [Value::from(1), Value::from(2)]).unwrap();
    /// assert_eq!(dict.get(&Value::from("b")), Some(&Value::from(2)));
    ///
    /// let err = dict.set_many(&keys, [Value::from(3)]).unwrap_err();
    /// assert!(matches!(err, Error::LengthMismatch { keys: 2, values: 1 }));
    /// ```
    pub fn set_many<I>(&mut self, keys: &[Value], values: I) -> Result<()>
    where
        I: IntoIterator<Item = Value>,
    {
        let values: Vec<Value> = values.into_iter().collect();
        if values.len() != keys.len() {
            return Err(Error::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        for (key, value) in keys.iter().zip(&values) {
            check_entry(&self.kind, key, value)?;
        }
        for (key, value) in keys.iter().zip(values) {
            self.entries.insert(key.clone(), value);
        }
        Ok(())
    }

    /// Assigns the same value to every key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeConstraintViolation`] if any key or the value is
    /// rejected. Nothing is stored in that case.
    pub fn set_all(&mut self, keys: &[Value], value: Value) -> Result<()> {
        for key in keys {
            check_entry(&self.kind, key, &value)?;
        }
        for key in keys {
            self.entries.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    /// Returns a copy with `entries` added; `self` is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeConstraintViolation`] for the first rejected entry.
    pub fn add<I>(&self, entries: I) -> Result<TypedDict>
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let mut copy = self.clone();
        for (key, value) in entries {
            copy.insert(key, value)?;
        }
        Ok(copy)
    }

    /// Returns a copy without `keys`; `self` is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if any key is missing.
    pub fn drop_keys(&self, keys: &[Value]) -> Result<TypedDict> {
        let mut copy = self.clone();
        copy.drop_in_place(keys)?;
        Ok(copy)
    }

    /// Removes `keys` from this dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if any key is missing. No key is removed
    /// in that case.
    pub fn drop_in_place(&mut self, keys: &[Value]) -> Result<()> {
        if let Some(key) = keys.iter().find(|key| !self.contains_key(key)) {
            return Err(missing(key));
        }
        for key in keys {
            self.entries.remove(key);
        }
        Ok(())
    }
}

fn missing(key: &Value) -> Error {
    Error::key_not_found(&key.to_string())
}

fn check_entry(kind: &Kind, key: &Value, value: &Value) -> Result<()> {
    check_one(kind, Role::Key, kind.key_type(), key)?;
    check_one(kind, Role::Value, kind.value_type(), value)
}

fn check_one(kind: &Kind, role: Role, expected: &Descriptor, found: &Value) -> Result<()> {
    if validate(found, expected) {
        return Ok(());
    }
    let expected = expected.to_string();
    let found = found.type_name();
    debug!(
        kind = %kind.name(),
        role = %role,
        expected = %expected,
        found = %found,
        "typed dict rejected entry"
    );
    Err(Error::type_constraint(role, &expected, &found))
}

impl PartialEq for TypedDict {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.kind, &other.kind) && self.entries == other.entries
    }
}

impl Eq for TypedDict {}

impl fmt::Display for TypedDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::value::write_map(f, &self.entries)
    }
}

impl Serialize for TypedDict {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a TypedDict {
    type Item = (&'a Value, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
