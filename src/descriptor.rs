//! Type descriptors.
//!
//! A [`Descriptor`] describes an acceptable runtime shape for a [`Value`](crate::Value).
//! The grammar is closed: every rule is one enum variant, and the validator
//! handles every variant with a single `match`.
//!
//! Descriptors display as the type-hint text a reader would write by hand:
//!
//! ```rust
//! use dictkit::Descriptor;
//!
//! let hint = Descriptor::dict(
//!     Descriptor::str(),
//!     Descriptor::union([Descriptor::int(), Descriptor::none()]),
//! );
//! assert_eq!(hint.to_string(), "dict[str, int | None]");
//!
//! assert_eq!(Descriptor::tuple_of(Descriptor::int()).to_string(), "tuple[int, ...]");
//! ```

use crate::value::Class;
use std::fmt;

/// An acceptable shape for a runtime value.
///
/// Descriptors are immutable values: cloning one is a deep copy, and there are
/// no back-references between a descriptor and its components.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Descriptor {
    /// Matches everything.
    Any,
    /// Matches only [`Value::None`](crate::Value::None).
    None,
    /// Matches instances of the class or of any subclass.
    Class(Class),
    /// Matches if any alternative matches.
    Union(Vec<Descriptor>),
    /// Matches any iterable; with an element descriptor, every element must match.
    Iterable(Option<Box<Descriptor>>),
    List(Box<Descriptor>),
    Set(Box<Descriptor>),
    /// With `variadic`, the last descriptor repeats over all remaining elements.
    Tuple {
        elems: Vec<Descriptor>,
        variadic: bool,
    },
    Dict(Box<Descriptor>, Box<Descriptor>),
    /// `None` accepts any callable.
    Callable(Option<CallableSpec>),
    /// `None` accepts any file-like handle.
    Io(Option<IoMode>),
}

/// The declared signature a callable descriptor requires.
///
/// `params: None` leaves the parameters unconstrained (`Callable[..., R]`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallableSpec {
    pub params: Option<Vec<Descriptor>>,
    pub ret: Box<Descriptor>,
}

/// Which kind of data a file-like handle carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IoMode {
    Text,
    Binary,
}

impl Descriptor {
    #[must_use]
    pub const fn any() -> Self {
        Descriptor::Any
    }

    #[must_use]
    pub const fn none() -> Self {
        Descriptor::None
    }

    #[must_use]
    pub const fn class(class: Class) -> Self {
        Descriptor::Class(class)
    }

    #[must_use]
    pub const fn int() -> Self {
        Descriptor::Class(Class::Int)
    }

    #[must_use]
    pub const fn float() -> Self {
        Descriptor::Class(Class::Float)
    }

    #[must_use]
    pub const fn bool() -> Self {
        Descriptor::Class(Class::Bool)
    }

    #[must_use]
    pub const fn str() -> Self {
        Descriptor::Class(Class::Str)
    }

    #[must_use]
    pub const fn bytes() -> Self {
        Descriptor::Class(Class::Bytes)
    }

    #[must_use]
    pub const fn object() -> Self {
        Descriptor::Class(Class::Object)
    }

    /// Matches class objects themselves rather than their instances.
    #[must_use]
    pub const fn type_object() -> Self {
        Descriptor::Class(Class::Type)
    }

    pub fn union<I: IntoIterator<Item = Descriptor>>(alternatives: I) -> Self {
        Descriptor::Union(alternatives.into_iter().collect())
    }

    /// Shorthand for `inner | None`.
    #[must_use]
    pub fn optional(inner: Descriptor) -> Self {
        Descriptor::Union(vec![inner, Descriptor::None])
    }

    #[must_use]
    pub fn iterable(elem: Descriptor) -> Self {
        Descriptor::Iterable(Some(Box::new(elem)))
    }

    #[must_use]
    pub const fn any_iterable() -> Self {
        Descriptor::Iterable(None)
    }

    #[must_use]
    pub fn list(elem: Descriptor) -> Self {
        Descriptor::List(Box::new(elem))
    }

    #[must_use]
    pub fn set(elem: Descriptor) -> Self {
        Descriptor::Set(Box::new(elem))
    }

    /// A fixed-arity tuple with one descriptor per position.
    pub fn tuple<I: IntoIterator<Item = Descriptor>>(elems: I) -> Self {
        Descriptor::Tuple {
            elems: elems.into_iter().collect(),
            variadic: false,
        }
    }

    /// A homogeneous tuple of any length.
    #[must_use]
    pub fn tuple_of(elem: Descriptor) -> Self {
        Descriptor::Tuple {
            elems: vec![elem],
            variadic: true,
        }
    }

    #[must_use]
    pub fn dict(key: Descriptor, value: Descriptor) -> Self {
        Descriptor::Dict(Box::new(key), Box::new(value))
    }

    /// A callable whose annotated parameters and return type must equal these.
    pub fn callable<I: IntoIterator<Item = Descriptor>>(params: I, ret: Descriptor) -> Self {
        Descriptor::Callable(Some(CallableSpec {
            params: Some(params.into_iter().collect()),
            ret: Box::new(ret),
        }))
    }

    /// A callable with any parameters whose annotated return type must equal `ret`.
    #[must_use]
    pub fn callable_returning(ret: Descriptor) -> Self {
        Descriptor::Callable(Some(CallableSpec {
            params: None,
            ret: Box::new(ret),
        }))
    }

    #[must_use]
    pub const fn any_callable() -> Self {
        Descriptor::Callable(None)
    }

    #[must_use]
    pub const fn io() -> Self {
        Descriptor::Io(None)
    }

    #[must_use]
    pub const fn text_io() -> Self {
        Descriptor::Io(Some(IoMode::Text))
    }

    #[must_use]
    pub const fn binary_io() -> Self {
        Descriptor::Io(Some(IoMode::Binary))
    }

    /// Returns `true` if the descriptor has nested component descriptors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dictkit::Descriptor;
    ///
    /// assert!(!Descriptor::int().is_parameterized());
    /// assert!(!Descriptor::any_callable().is_parameterized());
    /// assert!(Descriptor::list(Descriptor::int()).is_parameterized());
    /// ```
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        match self {
            Descriptor::Any | Descriptor::None | Descriptor::Class(_) => false,
            Descriptor::Iterable(elem) => elem.is_some(),
            Descriptor::Callable(spec) => spec.is_some(),
            Descriptor::Io(mode) => mode.is_some(),
            Descriptor::Union(_)
            | Descriptor::List(_)
            | Descriptor::Set(_)
            | Descriptor::Tuple { .. }
            | Descriptor::Dict(..) => true,
        }
    }

    /// Returns `true` if both descriptors name the same type.
    ///
    /// Unlike `==`, union alternatives compare as a set (nested unions are
    /// flattened) and `None` equals `Class(NoneType)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dictkit::{value::Class, Descriptor};
    ///
    /// let a = Descriptor::union([Descriptor::int(), Descriptor::str()]);
    /// let b = Descriptor::union([Descriptor::str(), Descriptor::int()]);
    /// assert_ne!(a, b);
    /// assert!(a.same_type(&b));
    /// assert!(Descriptor::none().same_type(&Descriptor::class(Class::NoneType)));
    /// ```
    #[must_use]
    pub fn same_type(&self, other: &Descriptor) -> bool {
        if matches!(self, Descriptor::Union(_)) || matches!(other, Descriptor::Union(_)) {
            let (mut lhs, mut rhs) = (Vec::new(), Vec::new());
            self.flatten_into(&mut lhs);
            other.flatten_into(&mut rhs);
            return lhs.iter().all(|a| rhs.iter().any(|b| a.same_type(b)))
                && rhs.iter().all(|b| lhs.iter().any(|a| a.same_type(b)));
        }

        match (self, other) {
            (Descriptor::Any, Descriptor::Any) => true,
            (Descriptor::None | Descriptor::Class(Class::NoneType), b) => {
                matches!(b, Descriptor::None | Descriptor::Class(Class::NoneType))
            }
            (Descriptor::Class(a), Descriptor::Class(b)) => a == b,
            (Descriptor::Iterable(a), Descriptor::Iterable(b)) => match (a, b) {
                (Some(a), Some(b)) => a.same_type(b),
                (None, None) => true,
                _ => false,
            },
            (Descriptor::List(a), Descriptor::List(b)) | (Descriptor::Set(a), Descriptor::Set(b)) => {
                a.same_type(b)
            }
            (
                Descriptor::Tuple { elems: a, variadic: va },
                Descriptor::Tuple { elems: b, variadic: vb },
            ) => va == vb && all_same_type(a, b),
            (Descriptor::Dict(ka, va), Descriptor::Dict(kb, vb)) => {
                ka.same_type(kb) && va.same_type(vb)
            }
            (Descriptor::Callable(a), Descriptor::Callable(b)) => match (a, b) {
                (Some(a), Some(b)) => {
                    let params = match (&a.params, &b.params) {
                        (Some(pa), Some(pb)) => all_same_type(pa, pb),
                        (None, None) => true,
                        _ => false,
                    };
                    params && a.ret.same_type(&b.ret)
                }
                (None, None) => true,
                _ => false,
            },
            (Descriptor::Io(a), Descriptor::Io(b)) => a == b,
            _ => false,
        }
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a Descriptor>) {
        match self {
            Descriptor::Union(alternatives) => {
                for alt in alternatives {
                    alt.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }
}

fn all_same_type(a: &[Descriptor], b: &[Descriptor]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_type(y))
}

impl From<Class> for Descriptor {
    fn from(class: Class) -> Self {
        Descriptor::Class(class)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Descriptor], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Any => f.write_str("typing.Any"),
            Descriptor::None => f.write_str("None"),
            Descriptor::Class(class) => write!(f, "{}", class),
            Descriptor::Union(alternatives) if alternatives.is_empty() => {
                f.write_str("typing.Union[()]")
            }
            Descriptor::Union(alternatives) => write_list(f, alternatives, " | "),
            Descriptor::Iterable(None) => f.write_str("typing.Iterable"),
            Descriptor::Iterable(Some(elem)) => write!(f, "typing.Iterable[{}]", elem),
            Descriptor::List(elem) => write!(f, "list[{}]", elem),
            Descriptor::Set(elem) => write!(f, "set[{}]", elem),
            Descriptor::Tuple { elems, variadic } => {
                f.write_str("tuple[")?;
                if elems.is_empty() && !variadic {
                    f.write_str("()")?;
                }
                write_list(f, elems, ", ")?;
                if *variadic {
                    if !elems.is_empty() {
                        f.write_str(", ")?;
                    }
                    f.write_str("...")?;
                }
                f.write_str("]")
            }
            Descriptor::Dict(key, value) => write!(f, "dict[{}, {}]", key, value),
            Descriptor::Callable(None) => f.write_str("typing.Callable"),
            Descriptor::Callable(Some(spec)) => {
                f.write_str("typing.Callable[")?;
                match &spec.params {
                    Some(params) => {
                        f.write_str("[")?;
                        write_list(f, params, ", ")?;
                        f.write_str("]")?;
                    }
                    None => f.write_str("...")?,
                }
                write!(f, ", {}]", spec.ret)
            }
            Descriptor::Io(None) => f.write_str("typing.IO"),
            Descriptor::Io(Some(IoMode::Text)) => f.write_str("typing.IO[str]"),
            Descriptor::Io(Some(IoMode::Binary)) => f.write_str("typing.IO[bytes]"),
        }
    }
}
