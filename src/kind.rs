//! Typed-dictionary kinds and the registry that creates them.
//!
//! A [`Kind`] is a dictionary class parameterized by a key descriptor and a
//! value descriptor. Kinds are created on request by a [`KindRegistry`] and
//! cached under their canonical name, so asking twice for the same pair hands
//! back the same `Arc`.
//!
//! ```rust
//! use dictkit::{Descriptor, KindRegistry};
//! use std::sync::Arc;
//!
//! let registry = KindRegistry::new();
//! let a = registry.kind(Descriptor::str(), Descriptor::int()).unwrap();
//! let b = registry.kind(Descriptor::str(), Descriptor::int()).unwrap();
//!
//! assert!(Arc::ptr_eq(&a, &b));
//! assert_eq!(a.name(), "TypedDict___str___int");
//! assert_eq!(a.type_hint(), "TypedDict[str, int]");
//! ```
//!
//! ## Bases
//!
//! Kinds are always parameterized from an unparameterized base. A registry
//! starts with one base, [`RegistryOptions::root_base`]; more can be derived
//! from it with [`KindRegistry::derive_base`]. A parameterized kind can never
//! serve as a base.

use crate::canonical::{name_to_hint, render_name, TYPE_DELIM};
use crate::descriptor::Descriptor;
use crate::error::{Error, Result};
use crate::options::RegistryOptions;
use indexmap::{IndexMap, IndexSet};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

/// A dictionary kind with fixed key and value descriptors.
#[derive(Debug)]
pub struct Kind {
    name: String,
    base: String,
    key_type: Descriptor,
    value_type: Descriptor,
    hint: String,
}

impl Kind {
    /// The canonical, identifier-safe name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base this kind was parameterized from.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn key_type(&self) -> &Descriptor {
        &self.key_type
    }

    #[must_use]
    pub fn value_type(&self) -> &Descriptor {
        &self.value_type
    }

    /// The readable hint decoded from the name, e.g. `TypedDict[str, int]`.
    #[must_use]
    pub fn type_hint(&self) -> &str {
        &self.hint
    }

    /// Returns `true` if `other` is this very kind.
    #[must_use]
    pub fn is(&self, other: &Arc<Kind>) -> bool {
        std::ptr::eq(self, Arc::as_ptr(other))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    bases: IndexSet<String>,
    kinds: IndexMap<String, Arc<Kind>>,
}

/// Creates and caches kinds.
///
/// All lookups and insertions happen under one lock, so concurrent requests
/// for the same descriptor pair agree on a single kind.
#[derive(Debug)]
pub struct KindRegistry {
    options: RegistryOptions,
    state: Mutex<RegistryState>,
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KindRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    #[must_use]
    pub fn with_options(options: RegistryOptions) -> Self {
        let mut state = RegistryState::default();
        state.bases.insert(options.root_base.clone());
        KindRegistry {
            options,
            state: Mutex::new(state),
        }
    }

    /// The process-wide registry, created with default options on first use.
    pub fn global() -> &'static KindRegistry {
        static GLOBAL: OnceLock<KindRegistry> = OnceLock::new();
        GLOBAL.get_or_init(KindRegistry::new)
    }

    #[must_use]
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    #[must_use]
    pub fn root_base(&self) -> &str {
        &self.options.root_base
    }

    /// Returns the kind of dictionaries mapping `key` to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptorShape`] if either descriptor cannot be
    /// rendered into a kind name.
    pub fn kind(&self, key: Descriptor, value: Descriptor) -> Result<Arc<Kind>> {
        self.parameterize(&self.options.root_base, &[key, value])
    }

    /// Parameterizes `base` with `[key, value]`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDescriptorShape`] unless exactly two descriptors are
    ///   given, or if they cannot be rendered into a kind name.
    /// - [`Error::IllegalKindDerivation`] if `base` is a parameterized kind or
    ///   not a known base.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dictkit::{Descriptor, Error, KindRegistry};
    ///
    /// let registry = KindRegistry::new();
    /// let err = registry.parameterize("TypedDict", &[Descriptor::str()]).unwrap_err();
    /// assert!(matches!(err, Error::InvalidDescriptorShape(_)));
    /// ```
    pub fn parameterize(&self, base: &str, args: &[Descriptor]) -> Result<Arc<Kind>> {
        let [key, value] = args else {
            debug!(base = %base, count = args.len(), "rejected kind request");
            return Err(Error::invalid_shape(&format!(
                "a kind needs exactly two descriptors (key and value), got {}",
                args.len()
            )));
        };

        let mut state = self.state.lock();
        check_base(&state, base)?;

        let name = render_name(base, key, value, &self.options).map_err(|err| {
            debug!(base = %base, error = %err, "can't render kind name");
            err
        })?;
        if let Some(kind) = state.kinds.get(&name) {
            trace!(kind = %name, "kind cache hit");
            return Ok(Arc::clone(kind));
        }

        let kind = Arc::new(Kind {
            hint: name_to_hint(&name)?,
            name: name.clone(),
            base: base.to_string(),
            key_type: key.clone(),
            value_type: value.clone(),
        });
        debug!(
            kind = %kind.name,
            key_type = %kind.key_type,
            value_type = %kind.value_type,
            "created kind"
        );
        state.kinds.insert(name, Arc::clone(&kind));
        Ok(kind)
    }

    /// Registers `name` as a new base derived from `parent`.
    ///
    /// Base names may start with any number of underscores but contain none
    /// after that. Registering a name twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalKindDerivation`] if `parent` is a parameterized
    /// kind or unknown, or if `name` is not a legal base name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dictkit::{Descriptor, KindRegistry};
    ///
    /// let registry = KindRegistry::new();
    /// registry.derive_base("Settings", "TypedDict").unwrap();
    ///
    /// let kind = registry.parameterize("Settings", &[Descriptor::str(), Descriptor::str()]).unwrap();
    /// assert_eq!(kind.type_hint(), "Settings[str, str]");
    ///
    /// assert!(registry.derive_base("My_Settings", "TypedDict").is_err());
    /// assert!(registry.derive_base("Nested", kind.name()).is_err());
    /// ```
    pub fn derive_base(&self, name: &str, parent: &str) -> Result<()> {
        let mut state = self.state.lock();
        check_base(&state, parent)?;

        if name.contains(TYPE_DELIM) {
            debug!(base = %name, "rejected base name");
            return Err(Error::illegal_derivation(&format!(
                "kind name '{}' cannot contain '{}'",
                name, TYPE_DELIM
            )));
        }

        let body = name.trim_start_matches('_');
        if body.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            debug!(base = %name, "rejected base name");
            return Err(Error::illegal_derivation(&format!(
                "'{}' is not a valid kind name",
                name
            )));
        }
        if body.contains('_') {
            debug!(base = %name, "rejected base name");
            return Err(Error::illegal_derivation(&format!(
                "kind name '{}' can only contain underscores at the beginning",
                name
            )));
        }

        if state.bases.insert(name.to_string()) {
            debug!(base = %name, parent = %parent, "derived base");
        }
        Ok(())
    }

    /// Looks up a previously created kind by its canonical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Kind>> {
        self.state.lock().kinds.get(name).cloned()
    }

    #[must_use]
    pub fn contains_base(&self, name: &str) -> bool {
        self.state.lock().bases.contains(name)
    }

    /// Number of parameterized kinds created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().kinds.is_empty()
    }

    /// A snapshot of all kinds, in creation order.
    #[must_use]
    pub fn kinds(&self) -> Vec<Arc<Kind>> {
        self.state.lock().kinds.values().cloned().collect()
    }
}

fn check_base(state: &RegistryState, base: &str) -> Result<()> {
    if state.kinds.contains_key(base) || base.contains(TYPE_DELIM) {
        debug!(base = %base, "rejected derivation from parameterized kind");
        return Err(Error::illegal_derivation(&format!(
            "{} is already parameterized and cannot be derived from",
            base
        )));
    }
    if !state.bases.contains(base) {
        debug!(base = %base, "rejected derivation from unknown base");
        return Err(Error::illegal_derivation(&format!(
            "unknown base kind '{}'",
            base
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Class, CustomClass};
    use std::thread;

    #[test]
    fn test_same_pair_same_kind() {
        let registry = KindRegistry::new();
        let a = registry
            .kind(Descriptor::str(), Descriptor::list(Descriptor::int()))
            .unwrap();
        let b = registry
            .kind(Descriptor::str(), Descriptor::list(Descriptor::int()))
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.is(&b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_different_pairs_differ() {
        let registry = KindRegistry::new();
        let a = registry.kind(Descriptor::str(), Descriptor::int()).unwrap();
        let b = registry.kind(Descriptor::int(), Descriptor::str()).unwrap();
        assert!(!a.is(&b));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.kinds().len(), 2);
    }

    #[test]
    fn test_kind_accessors() {
        let registry = KindRegistry::new();
        let kind = registry
            .kind(Descriptor::optional(Descriptor::str()), Descriptor::any())
            .unwrap();
        assert_eq!(kind.name(), "TypedDict___str_3_None___Any");
        assert_eq!(kind.type_hint(), "TypedDict[str | None, Any]");
        assert_eq!(kind.base(), "TypedDict");
        assert_eq!(kind.key_type(), &Descriptor::optional(Descriptor::str()));
        assert_eq!(kind.value_type(), &Descriptor::any());
        assert!(registry.get(kind.name()).is_some());
        assert!(registry.get("TypedDict___int___int").is_none());
    }

    #[test]
    fn test_wrong_number_of_descriptors() {
        let registry = KindRegistry::new();
        for args in [
            vec![],
            vec![Descriptor::str()],
            vec![Descriptor::str(), Descriptor::int(), Descriptor::int()],
        ] {
            let err = registry.parameterize("TypedDict", &args).unwrap_err();
            assert!(matches!(err, Error::InvalidDescriptorShape(_)));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_parameterized_kind_is_not_a_base() {
        let registry = KindRegistry::new();
        let kind = registry.kind(Descriptor::str(), Descriptor::int()).unwrap();
        let err = registry
            .parameterize(kind.name(), &[Descriptor::str(), Descriptor::int()])
            .unwrap_err();
        assert!(matches!(err, Error::IllegalKindDerivation(_)));

        let err = registry.derive_base("Sub", kind.name()).unwrap_err();
        assert!(matches!(err, Error::IllegalKindDerivation(_)));
    }

    #[test]
    fn test_unknown_base() {
        let registry = KindRegistry::new();
        let err = registry
            .parameterize("Missing", &[Descriptor::str(), Descriptor::int()])
            .unwrap_err();
        assert!(matches!(err, Error::IllegalKindDerivation(_)));
    }

    #[test]
    fn test_derive_base_names() {
        let registry = KindRegistry::new();
        registry.derive_base("Config", "TypedDict").unwrap();
        registry.derive_base("_Private", "Config").unwrap();
        registry.derive_base("__Hidden", "TypedDict").unwrap();
        registry.derive_base("Config", "TypedDict").unwrap();
        assert!(registry.contains_base("_Private"));

        for bad in ["My_Config", "Config_", "_", "", "Has Space", "___X", "____Deep"] {
            let err = registry.derive_base(bad, "TypedDict").unwrap_err();
            assert!(matches!(err, Error::IllegalKindDerivation(_)), "{bad}");
        }

        let kind = registry
            .parameterize("_Private", &[Descriptor::int(), Descriptor::int()])
            .unwrap();
        assert_eq!(kind.name(), "_Private___int___int");
        assert_eq!(kind.type_hint(), "_Private[int, int]");
        assert!(!registry.contains_base("___X"));
    }

    #[test]
    fn test_unrenderable_descriptor() {
        let registry = KindRegistry::new();
        let odd = Class::custom(CustomClass::new("<locals>"));
        let err = registry
            .kind(Descriptor::class(odd), Descriptor::int())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDescriptorShape(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_kinds_nest_as_descriptors() {
        let registry = KindRegistry::new();
        let inner = registry.kind(Descriptor::str(), Descriptor::int()).unwrap();
        let outer = registry
            .kind(Descriptor::str(), Descriptor::class(Class::Kind(inner)))
            .unwrap();
        assert_eq!(outer.type_hint(), "TypedDict[str, TypedDict[str, int]]");
    }

    #[test]
    fn test_concurrent_requests_agree() {
        let registry = Arc::new(KindRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry
                        .kind(Descriptor::str(), Descriptor::set(Descriptor::int()))
                        .unwrap()
                })
            })
            .collect();
        let kinds: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(kinds.iter().all(|k| Arc::ptr_eq(k, &kinds[0])));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_global_registry_is_shared() {
        let a = KindRegistry::global()
            .kind(Descriptor::bytes(), Descriptor::float())
            .unwrap();
        let b = KindRegistry::global()
            .kind(Descriptor::bytes(), Descriptor::float())
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
