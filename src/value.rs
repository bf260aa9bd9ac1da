//! Dynamic value representation.
//!
//! This module provides the [`Value`] enum, which models the runtime values that
//! appear inside nested mappings, and the [`Class`] enum, which models what
//! those values are instances of.
//!
//! ## Core Types
//!
//! - [`Value`]: any runtime value (scalars, containers, class objects, callables,
//!   file handles, user instances, typed dictionaries)
//! - [`Class`]: a runtime class with a subclass relation
//! - [`Function`] and [`Signature`]: callables with declared parameter and return
//!   descriptors
//! - [`IoHandle`]: a file-like object of a specific I/O category
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use dictkit::{value, Value};
//!
//! let none = Value::None;
//! let flag = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! let pair = Value::tuple([Value::from(1), Value::from("a")]);
//!
//! let obj = value!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(obj.is_dict());
//! ```
//!
//! ### Runtime Classes
//!
//! ```rust
//! use dictkit::{Class, Value};
//!
//! let flag = Value::from(true);
//! assert_eq!(flag.class(), Class::Bool);
//! assert!(flag.class().is_subclass_of(&Class::Int));
//! assert_eq!(flag.type_name(), "bool");
//! ```

use crate::descriptor::Descriptor;
use crate::kind::Kind;
use crate::map::ValueMap;
use crate::typed_dict::TypedDict;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::Arc;

/// A dynamically-typed runtime value.
///
/// Scalars and containers are owned trees. Callables, file handles and user
/// instances are shared by identity through [`Arc`], the way objects are shared
/// in a dynamic runtime: two handles are equal only if they are the same object.
///
/// Equality is strict per variant: `Int(1)`, `Float(1.0)` and `Bool(true)` are
/// three distinct keys. Floats compare by bit pattern so that `Value` can be
/// `Eq + Hash` and used as a mapping key.
///
/// # Examples
///
/// ```rust
/// use dictkit::Value;
///
/// let list = Value::list([Value::from(1), Value::from(2)]);
/// assert!(list.is_list());
/// assert_eq!(list.as_list().map(|l| l.len()), Some(2));
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    BigInt(BigInt),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    DateTime(DateTime<Utc>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Distinct elements; equality ignores order.
    Set(IndexSet<Value>),
    Dict(ValueMap),
    /// A class object used as a value.
    Type(Class),
    Callable(Arc<Function>),
    Io(Arc<IoHandle>),
    Instance(Arc<Instance>),
    TypedDict(TypedDict),
}

/// A runtime class.
///
/// Builtin classes are unit variants. User classes ([`CustomClass`]) and typed
/// dictionary kinds ([`Kind`]) are shared by identity.
///
/// # Examples
///
/// ```rust
/// use dictkit::{Class, CustomClass};
///
/// let animal = Class::custom(CustomClass::new("Animal"));
/// let dog = Class::custom(CustomClass::new("Dog").with_base(animal.clone()));
///
/// assert!(dog.is_subclass_of(&animal));
/// assert!(dog.is_subclass_of(&Class::Object));
/// assert!(!animal.is_subclass_of(&dog));
/// ```
#[derive(Clone, Debug)]
pub enum Class {
    Object,
    NoneType,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    DateTime,
    List,
    Tuple,
    Dict,
    Set,
    Type,
    Function,
    IoBase,
    TextIo,
    BufferedIo,
    RawIo,
    Custom(Arc<CustomClass>),
    Kind(Arc<Kind>),
}

/// A user-defined class with an optional module path and base classes.
#[derive(Clone, Debug)]
pub struct CustomClass {
    name: String,
    module: Option<String>,
    bases: Vec<Class>,
}

impl CustomClass {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        CustomClass {
            name: name.into(),
            module: None,
            bases: Vec::new(),
        }
    }

    /// Sets the dotted module path the class is defined in.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: Class) -> Self {
        self.bases.push(base);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    #[must_use]
    pub fn bases(&self) -> &[Class] {
        &self.bases
    }

    /// Returns the module-qualified name, e.g. `geometry.Point`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.module {
            Some(module) => format!("{}.{}", module, self.name),
            None => self.name.clone(),
        }
    }
}

/// An instance of a [`CustomClass`] with named attributes.
#[derive(Clone, Debug)]
pub struct Instance {
    class: Arc<CustomClass>,
    attrs: ValueMap,
}

impl Instance {
    #[must_use]
    pub fn new(class: Arc<CustomClass>) -> Self {
        Instance {
            class,
            attrs: ValueMap::new(),
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(Value::from(name), value.into());
        self
    }

    #[must_use]
    pub fn class(&self) -> &Arc<CustomClass> {
        &self.class
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(&Value::from(name))
    }
}

/// The declared signature of a callable.
///
/// Only annotated parameters are listed, in declaration order. Unannotated
/// parameters are invisible to signature matching, just as they are absent
/// from a runtime's collected type hints.
///
/// # Examples
///
/// ```rust
/// use dictkit::{Class, Descriptor, Signature};
///
/// let sig = Signature::new()
///     .param("x", Descriptor::int())
///     .param("y", Descriptor::str())
///     .returns(Descriptor::class(Class::List));
///
/// assert_eq!(sig.params().len(), 2);
/// assert!(sig.return_type().is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    params: Vec<(String, Descriptor)>,
    ret: Option<Descriptor>,
}

impl Signature {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, descriptor: Descriptor) -> Self {
        self.params.push((name.into(), descriptor));
        self
    }

    #[must_use]
    pub fn returns(mut self, descriptor: Descriptor) -> Self {
        self.ret = Some(descriptor);
        self
    }

    #[must_use]
    pub fn params(&self) -> &[(String, Descriptor)] {
        &self.params
    }

    #[must_use]
    pub fn return_type(&self) -> Option<&Descriptor> {
        self.ret.as_ref()
    }
}

/// A named callable, optionally carrying its declared [`Signature`].
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    name: String,
    signature: Option<Signature>,
}

impl Function {
    /// A callable without any annotations.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Function {
            name: name.into(),
            signature: None,
        }
    }

    #[must_use]
    pub fn with_signature(name: impl Into<String>, signature: Signature) -> Self {
        Function {
            name: name.into(),
            signature: Some(signature),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }
}

/// The lowest-level I/O category of a file-like handle.
///
/// `Buffered` and `Raw` both carry bytes, but only buffered handles satisfy a
/// binary handle descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IoKind {
    Text,
    Buffered,
    Raw,
}

impl IoKind {
    #[must_use]
    pub fn class(&self) -> Class {
        match self {
            IoKind::Text => Class::TextIo,
            IoKind::Buffered => Class::BufferedIo,
            IoKind::Raw => Class::RawIo,
        }
    }
}

/// A file-like handle. Only its identity and category matter here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IoHandle {
    name: String,
    kind: IoKind,
}

impl IoHandle {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: IoKind) -> Self {
        IoHandle {
            name: name.into(),
            kind,
        }
    }

    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, IoKind::Text)
    }

    #[must_use]
    pub fn buffered(name: impl Into<String>) -> Self {
        Self::new(name, IoKind::Buffered)
    }

    #[must_use]
    pub fn raw(name: impl Into<String>) -> Self {
        Self::new(name, IoKind::Raw)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> IoKind {
        self.kind
    }
}

impl Class {
    #[must_use]
    pub fn custom(class: CustomClass) -> Self {
        Class::Custom(Arc::new(class))
    }

    /// Returns `true` if `self` is `other` or inherits from it.
    ///
    /// `bool` inherits from `int`, every concrete I/O class inherits from
    /// `IOBase`, every kind inherits from `dict`, and user classes inherit
    /// from their declared bases.
    #[must_use]
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        if self == other || matches!(other, Class::Object) {
            return true;
        }
        match self {
            Class::Bool => Class::Int.is_subclass_of(other),
            Class::TextIo | Class::BufferedIo | Class::RawIo => matches!(other, Class::IoBase),
            Class::Kind(_) => matches!(other, Class::Dict),
            Class::Custom(class) => class.bases.iter().any(|base| base.is_subclass_of(other)),
            _ => false,
        }
    }

    /// Returns the user class if this is one.
    #[must_use]
    pub fn as_custom(&self) -> Option<&Arc<CustomClass>> {
        match self {
            Class::Custom(class) => Some(class),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_kind(&self) -> Option<&Arc<Kind>> {
        match self {
            Class::Kind(kind) => Some(kind),
            _ => None,
        }
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Class::Custom(a), Class::Custom(b)) => Arc::ptr_eq(a, b),
            (Class::Kind(a), Class::Kind(b)) => Arc::ptr_eq(a, b),
            (Class::Custom(_), _) | (Class::Kind(_), _) => false,
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}

impl Eq for Class {}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Class::Custom(class) => std::ptr::hash(Arc::as_ptr(class), state),
            Class::Kind(kind) => std::ptr::hash(Arc::as_ptr(kind), state),
            _ => {}
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Object => f.write_str("object"),
            Class::NoneType => f.write_str("NoneType"),
            Class::Bool => f.write_str("bool"),
            Class::Int => f.write_str("int"),
            Class::Float => f.write_str("float"),
            Class::Str => f.write_str("str"),
            Class::Bytes => f.write_str("bytes"),
            Class::DateTime => f.write_str("datetime.datetime"),
            Class::List => f.write_str("list"),
            Class::Tuple => f.write_str("tuple"),
            Class::Dict => f.write_str("dict"),
            Class::Set => f.write_str("set"),
            Class::Type => f.write_str("type"),
            Class::Function => f.write_str("function"),
            Class::IoBase => f.write_str("io.IOBase"),
            Class::TextIo => f.write_str("io.TextIOBase"),
            Class::BufferedIo => f.write_str("io.BufferedIOBase"),
            Class::RawIo => f.write_str("io.RawIOBase"),
            Class::Custom(class) => f.write_str(&class.qualified_name()),
            Class::Kind(kind) => f.write_str(kind.type_hint()),
        }
    }
}

impl Value {
    /// Builds a list value.
    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Builds a tuple value.
    pub fn tuple<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    /// Builds a set value, dropping duplicates while keeping first-seen order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dictkit::Value;
    ///
    /// let set = Value::set([Value::from(1), Value::from(2), Value::from(1)]);
    /// assert_eq!(set, Value::set([Value::from(2), Value::from(1)]));
    /// ```
    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Set(items.into_iter().collect())
    }

    /// Builds a dict value from key-value pairs.
    pub fn dict<I: IntoIterator<Item = (Value, Value)>>(entries: I) -> Self {
        Value::Dict(entries.into_iter().collect())
    }

    pub fn function(function: Function) -> Self {
        Value::Callable(Arc::new(function))
    }

    pub fn io(handle: IoHandle) -> Self {
        Value::Io(Arc::new(handle))
    }

    pub fn instance(instance: Instance) -> Self {
        Value::Instance(Arc::new(instance))
    }

    /// Returns the runtime class of this value.
    #[must_use]
    pub fn class(&self) -> Class {
        match self {
            Value::None => Class::NoneType,
            Value::Bool(_) => Class::Bool,
            Value::Int(_) | Value::BigInt(_) => Class::Int,
            Value::Float(_) => Class::Float,
            Value::Str(_) => Class::Str,
            Value::Bytes(_) => Class::Bytes,
            Value::DateTime(_) => Class::DateTime,
            Value::List(_) => Class::List,
            Value::Tuple(_) => Class::Tuple,
            Value::Set(_) => Class::Set,
            Value::Dict(_) => Class::Dict,
            Value::Type(_) => Class::Type,
            Value::Callable(_) => Class::Function,
            Value::Io(handle) => handle.kind.class(),
            Value::Instance(instance) => Class::Custom(Arc::clone(&instance.class)),
            Value::TypedDict(dict) => Class::Kind(Arc::clone(dict.kind())),
        }
    }

    /// Returns the name of this value's runtime class, as used in error messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.class().to_string()
    }

    #[inline]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_) | Value::BigInt(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_tuple(&self) -> bool {
        matches!(self, Value::Tuple(_))
    }

    /// Returns `true` for plain dicts and typed dictionaries.
    #[inline]
    #[must_use]
    pub const fn is_dict(&self) -> bool {
        matches!(self, Value::Dict(_) | Value::TypedDict(_))
    }

    /// Returns `true` if the value can be invoked. Class objects are callable.
    #[inline]
    #[must_use]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Value::Callable(_) | Value::Type(_))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_tuple(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of a plain dict or a typed dictionary.
    #[must_use]
    pub fn as_dict(&self) -> Option<&ValueMap> {
        match self {
            Value::Dict(map) => Some(map),
            Value::TypedDict(dict) => Some(dict.as_map()),
            _ => None,
        }
    }

    /// Iterates the elements this value yields when iterated.
    ///
    /// Strings yield one-character strings, bytes yield integers, and mappings
    /// yield their keys. Returns `None` for values that are not iterable.
    ///
    /// Every iterable value is an owned, restartable collection, so iterating
    /// never consumes anything.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dictkit::Value;
    ///
    /// let chars: Vec<Value> = Value::from("ab").elements().unwrap().map(|c| c.into_owned()).collect();
    /// assert_eq!(chars, vec![Value::from("a"), Value::from("b")]);
    /// assert!(Value::from(5).elements().is_none());
    /// ```
    #[must_use]
    pub fn elements(&self) -> Option<Box<dyn Iterator<Item = Cow<'_, Value>> + '_>> {
        match self {
            Value::Str(s) => Some(Box::new(
                s.chars().map(|c| Cow::Owned(Value::Str(c.to_string()))),
            )),
            Value::Bytes(bytes) => Some(Box::new(
                bytes.iter().map(|b| Cow::Owned(Value::Int(i64::from(*b)))),
            )),
            Value::List(items) | Value::Tuple(items) => {
                Some(Box::new(items.iter().map(Cow::Borrowed)))
            }
            Value::Set(items) => Some(Box::new(items.iter().map(Cow::Borrowed))),
            Value::Dict(map) => Some(Box::new(map.keys().map(Cow::Borrowed))),
            Value::TypedDict(dict) => Some(Box::new(dict.keys().map(Cow::Borrowed))),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => Arc::ptr_eq(a, b),
            (Value::Io(a), Value::Io(b)) => Arc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Arc::ptr_eq(a, b),
            (Value::TypedDict(a), Value::TypedDict(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Value::None => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::BigInt(bi) => bi.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
            Value::Bytes(bytes) => bytes.hash(state),
            Value::DateTime(dt) => dt.hash(state),
            Value::List(items) | Value::Tuple(items) => items.hash(state),
            // Unordered: only the size is stable across equal values.
            Value::Set(items) => items.len().hash(state),
            Value::Dict(map) => map.len().hash(state),
            Value::TypedDict(dict) => dict.len().hash(state),
            Value::Type(class) => class.hash(state),
            Value::Callable(function) => std::ptr::hash(Arc::as_ptr(function), state),
            Value::Io(handle) => std::ptr::hash(Arc::as_ptr(handle), state),
            Value::Instance(instance) => std::ptr::hash(Arc::as_ptr(instance), state),
        }
    }
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a Value>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

pub(crate) fn write_map(f: &mut fmt::Formatter<'_>, map: &ValueMap) -> fmt::Result {
    f.write_str("{")?;
    for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: {}", k, v)?;
    }
    f.write_str("}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::BigInt(bi) => write!(f, "{}", bi),
            Value::Float(fl) => write!(f, "{:?}", fl),
            Value::Str(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
            Value::Bytes(bytes) => write!(f, "b'{}'", bytes.escape_ascii()),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::List(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_joined(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Set(items) if items.is_empty() => f.write_str("set()"),
            Value::Set(items) => {
                f.write_str("{")?;
                write_joined(f, items)?;
                f.write_str("}")
            }
            Value::Dict(map) => write_map(f, map),
            Value::TypedDict(dict) => write_map(f, dict.as_map()),
            Value::Type(class) => write!(f, "<class '{}'>", class),
            Value::Callable(function) => write!(f, "<function {}>", function.name),
            Value::Io(handle) => write!(f, "<{} name='{}'>", handle.kind.class(), handle.name),
            Value::Instance(instance) => {
                write!(f, "<{} object>", instance.class.qualified_name())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::{Error as _, SerializeMap, SerializeTuple};

        match self {
            Value::None => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::BigInt(bi) => match (u128::try_from(bi), i128::try_from(bi)) {
                (Ok(u), _) => serializer.serialize_u128(u),
                (_, Ok(i)) => serializer.serialize_i128(i),
                _ => serializer.serialize_str(&bi.to_string()),
            },
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Bytes(bytes) => serializer.serialize_bytes(bytes),
            Value::DateTime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Value::List(items) => serializer.collect_seq(items),
            Value::Set(items) => serializer.collect_seq(items),
            Value::Tuple(items) => {
                let mut tuple = serializer.serialize_tuple(items.len())?;
                for element in items {
                    tuple.serialize_element(element)?;
                }
                tuple.end()
            }
            Value::Dict(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Value::TypedDict(dict) => dict.serialize(serializer),
            Value::Type(_) | Value::Callable(_) | Value::Io(_) | Value::Instance(_) => Err(
                S::Error::custom(format!("cannot serialize a value of type {}", self.type_name())),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any self-describing value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::Str(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::Str(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E> {
                Ok(Value::Bytes(value.to_vec()))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::None)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::None)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::List(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = ValueMap::new();
                while let Some((key, value)) = map.next_entry::<Value, Value>()? {
                    values.insert(key, value);
                }
                Ok(Value::Dict(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Int(i) => Ok(i),
            Value::Bool(b) => Ok(i64::from(b)),
            _ => Err(crate::Error::custom(format!(
                "expected int, found {}",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Int(i) => Ok(i as f64),
            Value::Float(f) => Ok(f),
            _ => Err(crate::Error::custom(format!(
                "expected float, found {}",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {}",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Str(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected str, found {}",
                value.type_name()
            ))),
        }
    }
}

// From implementations for creating Value from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::BigInt(BigInt::from(value)),
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Dict(value)
    }
}

impl From<Class> for Value {
    fn from(value: Class) -> Self {
        Value::Type(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::function(value)
    }
}

impl From<IoHandle> for Value {
    fn from(value: IoHandle) -> Self {
        Value::io(value)
    }
}

impl From<Instance> for Value {
    fn from(value: Instance) -> Self {
        Value::instance(value)
    }
}

impl From<TypedDict> for Value {
    fn from(value: TypedDict) -> Self {
        Value::TypedDict(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::convert::TryFrom;

    fn hash_of(value: &Value) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_tryfrom_i64() {
        let result: i64 = TryFrom::try_from(Value::Int(42)).unwrap();
        assert_eq!(result, 42);
        assert!(i64::try_from(Value::from("test")).is_err());
    }

    #[test]
    fn test_tryfrom_f64() {
        let result: f64 = TryFrom::try_from(Value::Float(3.5)).unwrap();
        assert_eq!(result, 3.5);
        let result: f64 = TryFrom::try_from(Value::Int(42)).unwrap();
        assert_eq!(result, 42.0);
    }

    #[test]
    fn test_tryfrom_string() {
        let result: String = TryFrom::try_from(Value::from("hello")).unwrap();
        assert_eq!(result, "hello");
        assert!(String::try_from(Value::Int(42)).is_err());
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from(3.5f64), Value::Float(3.5));
        assert_eq!(Value::from("test"), Value::Str("test".to_string()));
        assert_eq!(Value::from(None::<i32>), Value::None);
        assert!(matches!(Value::from(u64::MAX), Value::BigInt(_)));
    }

    #[test]
    fn test_strict_cross_variant_equality() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::Bool(true));
        assert_ne!(Value::list([Value::Int(1)]), Value::tuple([Value::Int(1)]));
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a = Value::set([Value::Int(1), Value::Int(2)]);
        let b = Value::set([Value::Int(2), Value::Int(1)]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_set_equality_is_symmetric() {
        let repeated = Value::Set([Value::Int(1), Value::Int(1)].into_iter().collect());
        let pair = Value::set([Value::Int(1), Value::Int(2)]);
        assert!(matches!(&repeated, Value::Set(items) if items.len() == 1));
        assert_ne!(repeated, pair);
        assert_ne!(pair, repeated);
        assert_eq!(repeated, Value::set([Value::Int(1)]));
    }

    #[test]
    fn test_handles_compare_by_identity() {
        let a = Value::io(IoHandle::text("a.txt"));
        let b = Value::io(IoHandle::text("a.txt"));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_class_hierarchy() {
        assert!(Class::Bool.is_subclass_of(&Class::Int));
        assert!(!Class::Int.is_subclass_of(&Class::Bool));
        assert!(Class::TextIo.is_subclass_of(&Class::IoBase));
        assert!(Class::Str.is_subclass_of(&Class::Object));
        assert!(!Class::Float.is_subclass_of(&Class::Int));
    }

    #[test]
    fn test_custom_classes_are_distinct_by_identity() {
        let a = Class::custom(CustomClass::new("Point"));
        let b = Class::custom(CustomClass::new("Point"));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::None.type_name(), "NoneType");
        assert_eq!(Value::from("x").type_name(), "str");
        assert_eq!(Value::list([]).type_name(), "list");
        let point = Arc::new(CustomClass::new("Point").with_module("geometry"));
        assert_eq!(
            Value::instance(Instance::new(point)).type_name(),
            "geometry.Point"
        );
    }

    #[test]
    fn test_display_python_style() {
        assert_eq!(Value::tuple([Value::Int(1)]).to_string(), "(1,)");
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(
            Value::dict([(Value::from("a"), Value::Bool(true))]).to_string(),
            "{'a': True}"
        );
        assert_eq!(Value::Type(Class::Int).to_string(), "<class 'int'>");
    }
}
