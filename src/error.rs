//! Error types for typed dictionaries, kind construction and value conversion.
//!
//! Validation itself never fails loudly: [`validate`](crate::validate) answers
//! with a plain `bool`. Errors only appear at the boundaries that act on that
//! answer.
//!
//! ## Error Categories
//!
//! - **Type constraint violations**: a key or value rejected by a typed dictionary
//! - **Invalid descriptor shapes**: a kind request without exactly two descriptors,
//!   or a descriptor whose canonical name cannot be rendered
//! - **Illegal kind derivations**: deriving from a parameterized kind, or a base
//!   name using the reserved separator
//! - **Multi-key failures**: missing keys, or keys and values of different lengths
//! - **Conversion errors**: values that have no serde representation
//!
//! ## Examples
//!
//! ```rust
//! use dictkit::{Descriptor, Error, KindRegistry, TypedDict, Value};
//!
//! let registry = KindRegistry::new();
//! let kind = registry.kind(Descriptor::str(), Descriptor::int()).unwrap();
//! let mut dict = TypedDict::new(kind);
//!
//! let err = dict.insert(Value::from("a"), Value::from("7")).unwrap_err();
//! assert!(matches!(err, Error::TypeConstraintViolation { .. }));
//! assert_eq!(err.to_string(), "Value must be of type int, got 'str'");
//! ```

use std::fmt;
use thiserror::Error;

/// Which half of an entry a typed dictionary rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Key,
    Value,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Key => "Key",
            Role::Value => "Value",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A typed dictionary refused a key or value.
    #[error("{role} must be of type {expected}, got '{found}'")]
    TypeConstraintViolation {
        role: Role,
        expected: String,
        found: String,
    },

    /// A kind was requested with a malformed descriptor pair.
    #[error("Invalid descriptor shape: {0}")]
    InvalidDescriptorShape(String),

    /// A kind was derived from something that cannot be derived from.
    #[error("Illegal kind derivation: {0}")]
    IllegalKindDerivation(String),

    /// A multi-key operation named a key that is not present.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A multi-key assignment received a different number of values than keys.
    #[error("Number of values assigned must equal number of keys assigning to (got {values} values for {keys} keys)")]
    LengthMismatch { keys: usize, values: usize },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type constraint violation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dictkit::{error::Role, Error};
    ///
    /// let err = Error::type_constraint(Role::Key, "str", "int");
    /// assert_eq!(err.to_string(), "Key must be of type str, got 'int'");
    /// ```
    pub fn type_constraint(role: Role, expected: &str, found: &str) -> Self {
        Error::TypeConstraintViolation {
            role,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn invalid_shape(msg: &str) -> Self {
        Error::InvalidDescriptorShape(msg.to_string())
    }

    pub fn illegal_derivation(msg: &str) -> Self {
        Error::IllegalKindDerivation(msg.to_string())
    }

    pub fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound(key.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dictkit::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` for errors caused by a rejected key or value.
    #[must_use]
    pub const fn is_type_violation(&self) -> bool {
        matches!(self, Error::TypeConstraintViolation { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_constraint_message() {
        let err = Error::type_constraint(Role::Value, "int", "str");
        assert_eq!(err.to_string(), "Value must be of type int, got 'str'");
        assert!(err.is_type_violation());
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = Error::LengthMismatch { keys: 2, values: 3 };
        assert!(err.to_string().contains("3 values for 2 keys"));
        assert!(!err.is_type_violation());
    }
}
