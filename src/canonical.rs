//! Canonical kind names.
//!
//! Every kind is identified by a name built from its base and the two
//! descriptors it is parameterized with. The name is a legal identifier
//! (`[A-Za-z0-9_]+`) and can be turned back into the type hint it came from.
//!
//! ## Encoding
//!
//! The descriptor's type-hint text has its module paths stripped
//! (`typing.IO[str]` becomes `IO[str]`) and its whitespace removed. Then each
//! character sequence in [`CHAR_MAP`] is replaced by its code wrapped in
//! [`CHAR_DELIM`]. The base, key name and value name are joined with
//! [`TYPE_DELIM`].
//!
//! ```text
//! TypedDict[str, list[int]]  ->  TypedDict___str___list_0_int_00_
//! TypedDict[int | None, IO]  ->  TypedDict___int_3_None___IO
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use dictkit::canonical::{name_to_hint, render_name};
//! use dictkit::{Descriptor, RegistryOptions};
//!
//! let options = RegistryOptions::default();
//! let key = Descriptor::str();
//! let value = Descriptor::list(Descriptor::int());
//!
//! let name = render_name("TypedDict", &key, &value, &options).unwrap();
//! assert_eq!(name, "TypedDict___str___list_0_int_00_");
//! assert_eq!(name_to_hint(&name).unwrap(), "TypedDict[str, list[int]]");
//! ```

use crate::descriptor::Descriptor;
use crate::error::{Error, Result};
use crate::options::RegistryOptions;

/// Substitutions applied, in order, to make a type hint identifier-safe.
pub const CHAR_MAP: [(&str, &str); 10] = [
    ("[", "0"),
    ("]", "00"),
    ("(", "1"),
    (")", "11"),
    (",", "2"),
    ("|", "3"),
    ("...", "4"),
    ("\"", "5"),
    ("*", "6"),
    ("~", "7"),
];

/// Wraps each substitution code.
pub const CHAR_DELIM: &str = "_";

/// Separates the base, key and value parts of a kind name.
pub const TYPE_DELIM: &str = "___";

/// Drops dotted module prefixes from every identifier path in `text`.
///
/// Runs of dots alone (the `...` of a variadic tuple) are left untouched.
///
/// # Examples
///
/// ```rust
/// use dictkit::canonical::strip_module_paths;
///
/// assert_eq!(strip_module_paths("typing.Callable[..., io.TextIOBase]"), "Callable[..., TextIOBase]");
/// ```
#[must_use]
pub fn strip_module_paths(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut token = String::new();

    let flush = |token: &mut String, out: &mut String| {
        match token.rsplit_once('.') {
            Some((path, last)) if !last.is_empty() && !path.trim_matches('.').is_empty() => {
                out.push_str(last);
            }
            _ => out.push_str(token),
        }
        token.clear();
    };

    for c in text.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            token.push(c);
        } else {
            flush(&mut token, &mut out);
            out.push(c);
        }
    }
    flush(&mut token, &mut out);
    out
}

/// Returns the human-readable hint text a descriptor contributes to a kind name.
#[must_use]
pub fn hint_text(descriptor: &Descriptor, options: &RegistryOptions) -> String {
    let text = descriptor.to_string();
    if options.strip_module_paths {
        strip_module_paths(&text)
    } else {
        text
    }
}

fn squash(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '\'' { '"' } else { c })
        .collect()
}

fn is_identifier_safe(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Encodes one descriptor into its identifier-safe name.
///
/// # Errors
///
/// Returns [`Error::InvalidDescriptorShape`] if the encoded text still contains
/// characters outside `[A-Za-z0-9_]`.
pub fn render_type_name(descriptor: &Descriptor, options: &RegistryOptions) -> Result<String> {
    let text = hint_text(descriptor, options);
    let mut name = squash(&text);
    for (from, code) in CHAR_MAP {
        name = name.replace(from, &format!("{CHAR_DELIM}{code}{CHAR_DELIM}"));
    }

    if !is_identifier_safe(&name) {
        return Err(Error::invalid_shape(&format!(
            "can't make a valid kind name for {}",
            text
        )));
    }
    Ok(name)
}

/// Builds the canonical kind name for `base` parameterized by `key` and `value`.
///
/// The name is checked to decode back to the original hints. Names that would
/// decode differently, such as those of classes whose own names contain `___`
/// or a substitution code, are rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidDescriptorShape`] if either descriptor cannot be
/// encoded, or if the resulting name is ambiguous.
pub fn render_name(
    base: &str,
    key: &Descriptor,
    value: &Descriptor,
    options: &RegistryOptions,
) -> Result<String> {
    let name = [
        base.to_string(),
        render_type_name(key, options)?,
        render_type_name(value, options)?,
    ]
    .join(TYPE_DELIM);

    let expected = format!(
        "{}[{}, {}]",
        base,
        hint_text(key, options),
        hint_text(value, options)
    );
    let decoded = name_to_hint(&name)?;
    if squash(&decoded) != squash(&expected) {
        return Err(Error::invalid_shape(&format!(
            "kind name for {} would be ambiguous",
            expected
        )));
    }
    Ok(name)
}

/// Decodes a canonical kind name back into its type hint, e.g.
/// `TypedDict___str___int_3_None` into `TypedDict[str, int | None]`.
///
/// # Errors
///
/// Returns [`Error::InvalidDescriptorShape`] if the decoded name does not have
/// exactly a base, a key and a value part.
pub fn name_to_hint(name: &str) -> Result<String> {
    let mut text = name.to_string();
    for (from, code) in CHAR_MAP {
        text = text.replace(&format!("{CHAR_DELIM}{code}{CHAR_DELIM}"), from);
    }

    let parts: Vec<&str> = text.split(TYPE_DELIM).collect();
    let [base, key, value] = parts.as_slice() else {
        return Err(Error::invalid_shape(&format!(
            "'{}' is not a parameterized kind name",
            name
        )));
    };

    Ok(format!("{}[{}, {}]", base, prettify(key), prettify(value)))
}

fn prettify(hint: &str) -> String {
    hint.replace(',', ", ").replace('|', " | ")
}
