//! Configuration options for kind registries.
//!
//! [`RegistryOptions`] controls how a [`KindRegistry`](crate::KindRegistry)
//! names the kinds it creates.
//!
//! ## Examples
//!
//! ```rust
//! use dictkit::{Descriptor, KindRegistry, RegistryOptions};
//!
//! let options = RegistryOptions::new().with_root_base("Record");
//! let registry = KindRegistry::with_options(options);
//!
//! let kind = registry.kind(Descriptor::str(), Descriptor::int()).unwrap();
//! assert_eq!(kind.name(), "Record___str___int");
//! ```

/// Name of the base every registry starts with.
pub const DEFAULT_ROOT_BASE: &str = "TypedDict";

/// Configuration options for a kind registry.
///
/// # Examples
///
/// ```rust
/// use dictkit::RegistryOptions;
///
/// let options = RegistryOptions::new();
/// assert_eq!(options.root_base, "TypedDict");
/// assert!(options.strip_module_paths);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryOptions {
    /// The unparameterized base that `KindRegistry::kind` parameterizes.
    pub root_base: String,
    /// Drop module prefixes (`typing.`, `io.`, ...) from type hints before
    /// rendering names. Without this, hints that mention a module cannot be
    /// rendered at all.
    pub strip_module_paths: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        RegistryOptions {
            root_base: DEFAULT_ROOT_BASE.to_string(),
            strip_module_paths: true,
        }
    }
}

impl RegistryOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name of the root base.
    ///
    /// The name is trusted as given; it should follow the same rules as names
    /// passed to `KindRegistry::derive_base`.
    #[must_use]
    pub fn with_root_base(mut self, name: &str) -> Self {
        self.root_base = name.to_string();
        self
    }

    #[must_use]
    pub fn with_strip_module_paths(mut self, strip: bool) -> Self {
        self.strip_module_paths = strip;
        self
    }
}
