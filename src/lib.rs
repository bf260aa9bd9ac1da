//! # dictkit
//!
//! Runtime structural type validation for dynamic values, and dictionaries that
//! enforce key and value types on every write.
//!
//! ## What is it for?
//!
//! Data that arrives at runtime (decoded JSON, configuration, plugin results)
//! has no static type. dictkit describes the shapes such data may take with
//! [`Descriptor`]s, answers "does this value have that shape?" with
//! [`validate`], and provides [`TypedDict`], a map that refuses any entry whose
//! key or value does not match its [`Kind`].
//!
//! ## Key Features
//!
//! - **Structural validation**: unions, optionals, lists, sets, fixed and
//!   variadic tuples, dicts, iterables, callables and file-like handles, nested
//!   to any depth
//! - **Typed dictionaries**: every write is checked; a rejected write changes nothing
//! - **Cached kinds**: the same key/value pair always yields the same [`Kind`],
//!   named by a reversible, identifier-safe canonical name
//! - **Serde compatible**: any `Serialize` type converts into a [`Value`] with
//!   [`to_value`]
//!
//! ## Quick Start
//!
//! ```rust
//! use dictkit::{validate, value, Descriptor};
//!
//! let pairs = Descriptor::list(Descriptor::tuple([Descriptor::str(), Descriptor::int()]));
//!
//! assert!(validate(&value!([("a", 1), ("b", 2)]), &pairs));
//! assert!(!validate(&value!([("a", 1), ("b", "2")]), &pairs));
//! ```
//!
//! ### Typed dictionaries
//!
//! ```rust
//! use dictkit::{Descriptor, KindRegistry, TypedDict};
//!
//! let kind = KindRegistry::global()
//!     .kind(Descriptor::str(), Descriptor::optional(Descriptor::float()))
//!     .unwrap();
//! assert_eq!(kind.type_hint(), "TypedDict[str, float | None]");
//!
//! let mut prices = TypedDict::new(kind);
//! prices.insert("apple", 1.25).unwrap();
//! prices.insert("pear", None::<f64>).unwrap();
//!
//! let err = prices.insert("plum", "cheap").unwrap_err();
//! assert_eq!(err.to_string(), "Value must be of type float | None, got 'str'");
//! assert_eq!(prices.len(), 2);
//! ```
//!
//! ### From Rust data
//!
//! ```rust
//! use dictkit::{to_value, validate, Descriptor};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Reading { sensor: String, samples: Vec<f64> }
//!
//! let reading = to_value(&Reading { sensor: "t1".into(), samples: vec![20.5, 21.0] }).unwrap();
//! let shape = Descriptor::dict(
//!     Descriptor::str(),
//!     Descriptor::union([Descriptor::str(), Descriptor::list(Descriptor::float())]),
//! );
//! assert!(validate(&reading, &shape));
//! ```
//!
//! ## Logging
//!
//! Kind creation, cache hits and rejected entries are reported through
//! [`tracing`](https://docs.rs/tracing) at `debug` and `trace` level. The crate
//! installs no subscriber.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Validation never panics and never fails loudly; it answers `bool`
//! - Failed construction yields no dictionary, failed writes leave it unchanged
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`typed_dict.rs`** - Kinds, typed dictionaries and multi-key operations
//! - **`dynamic_values.rs`** - Building and validating values dynamically
//!
//! Run any example with: `cargo run --example <name>`

pub mod canonical;
pub mod descriptor;
pub mod error;
pub mod kind;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod typed_dict;
pub mod validate;
pub mod value;

pub use canonical::{name_to_hint, render_name, render_type_name};
pub use descriptor::{CallableSpec, Descriptor, IoMode};
pub use error::{Error, Result, Role};
pub use kind::{Kind, KindRegistry};
pub use map::ValueMap;
pub use options::RegistryOptions;
pub use ser::ValueSerializer;
pub use typed_dict::TypedDict;
pub use validate::validate;
pub use value::{Class, CustomClass, Function, Instance, IoHandle, IoKind, Signature, Value};

use serde::Serialize;

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use dictkit::{to_value, Value};
///
/// let value = to_value(&vec![(1, "one"), (2, "two")]).unwrap();
/// assert!(value.is_list());
/// assert_eq!(value, dictkit::value!([(1, "one"), (2, "two")]));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized, or if it contains a
/// [`Value`] with no data representation (classes, callables, handles,
/// instances).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}
