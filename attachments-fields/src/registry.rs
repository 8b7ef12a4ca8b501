//! The open mapping from field type key to implementation.
//!
//! The registry is finalized once through [`FieldTypeRegistryBuilder`]:
//!
//! 1. the mapping starts as `{ "text": TextField }`
//! 2. each [`FieldTypeContributor`] receives the current `{key: source}`
//!    mapping and returns an augmented one, in registration order
//! 3. every source is handed to the [`FieldTypeLoader`]; keys whose source
//!    fails to load are skipped
//!
//! Keys are slugified on registration, the same way the factory slugifies a
//! field's type, so every registered key is one a field can carry. Keys are
//! unique and the last registration for a key wins. Iteration order is the
//! order in which each key was first registered.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::field::FieldKind;
use crate::kinds::TextField;
use crate::loader::{DefinitionLoader, FieldTypeLoader};
use crate::slug::slugify;

/// Key of the built-in text type.
pub const BUILTIN_TEXT: &str = "text";

/// Where a contributed field type comes from.
#[derive(Clone)]
pub enum FieldTypeSource {
    /// An implementation handed over directly by a plugin.
    Implementation(Arc<dyn FieldKind>),
    /// A declarative definition on disk.
    Path(PathBuf),
}

impl fmt::Debug for FieldTypeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldTypeSource::Implementation(kind) => {
                f.debug_tuple("Implementation").field(&kind.id()).finish()
            }
            FieldTypeSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
        }
    }
}

impl From<PathBuf> for FieldTypeSource {
    fn from(path: PathBuf) -> Self {
        FieldTypeSource::Path(path)
    }
}

impl From<Arc<dyn FieldKind>> for FieldTypeSource {
    fn from(kind: Arc<dyn FieldKind>) -> Self {
        FieldTypeSource::Implementation(kind)
    }
}

/// Extension point invoked once while the registry is built.
///
/// Closures of the right shape implement this trait:
///
/// ```
/// use attachments_fields::{FieldTypeRegistry, FieldTypeSource};
///
/// let registry = FieldTypeRegistry::builder()
///     .contributor(|mut sources: indexmap::IndexMap<String, FieldTypeSource>| {
///         sources.insert("notes".into(), FieldTypeSource::Path("notes.yaml".into()));
///         sources
///     })
///     .build();
/// // notes.yaml does not exist, so only the built-in type is left
/// assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["text"]);
/// ```
pub trait FieldTypeContributor: Send + Sync {
    fn contribute(
        &self,
        sources: IndexMap<String, FieldTypeSource>,
    ) -> IndexMap<String, FieldTypeSource>;
}

impl<F> FieldTypeContributor for F
where
    F: Fn(IndexMap<String, FieldTypeSource>) -> IndexMap<String, FieldTypeSource> + Send + Sync,
{
    fn contribute(
        &self,
        sources: IndexMap<String, FieldTypeSource>,
    ) -> IndexMap<String, FieldTypeSource> {
        self(sources)
    }
}

/// Builder for [`FieldTypeRegistry`]. Created by [`FieldTypeRegistry::builder`].
pub struct FieldTypeRegistryBuilder {
    contributors: Vec<Box<dyn FieldTypeContributor>>,
    loader: Box<dyn FieldTypeLoader>,
}

impl FieldTypeRegistryBuilder {
    /// Add a contributor. Contributors run in the order they are added.
    pub fn contributor(mut self, contributor: impl FieldTypeContributor + 'static) -> Self {
        self.contributors.push(Box::new(contributor));
        self
    }

    /// Replace the default [`DefinitionLoader`].
    pub fn loader(mut self, loader: impl FieldTypeLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Run the contributors, load every source and finalize the registry.
    pub fn build(self) -> FieldTypeRegistry {
        let builtin: Arc<dyn FieldKind> = Arc::new(TextField);

        let mut sources = IndexMap::new();
        sources.insert(
            BUILTIN_TEXT.to_string(),
            FieldTypeSource::Implementation(Arc::clone(&builtin)),
        );
        for contributor in &self.contributors {
            sources = contributor.contribute(sources);
        }

        let mut registry = FieldTypeRegistry {
            types: IndexMap::new(),
        };
        // The built-in type survives a failed external load of the same key.
        registry.register(BUILTIN_TEXT, builtin);

        for (key, source) in &sources {
            match self.loader.load(key, source) {
                Ok(kind) => {
                    registry.register(key.clone(), kind);
                }
                Err(e) => {
                    warn!(key = %key, source = ?source, error = %e, "skipping field type that failed to load");
                }
            }
        }

        debug!(
            types = registry.len(),
            contributors = self.contributors.len(),
            "field type registry built"
        );
        registry
    }
}

/// Mapping from type key to field implementation.
pub struct FieldTypeRegistry {
    types: IndexMap<String, Arc<dyn FieldKind>>,
}

impl FieldTypeRegistry {
    /// Registry holding only the built-in `text` type.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Builder for a registry extended by contributors.
    pub fn builder() -> FieldTypeRegistryBuilder {
        FieldTypeRegistryBuilder {
            contributors: Vec::new(),
            loader: Box::new(DefinitionLoader),
        }
    }

    /// Insert or overwrite the implementation for the slugified `key`.
    ///
    /// Returns the implementation previously registered under that key.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        kind: Arc<dyn FieldKind>,
    ) -> Option<Arc<dyn FieldKind>> {
        let raw = key.into();
        let key = slugify(&raw);
        if key != raw {
            debug!(raw = %raw, key = %key, "normalized field type key");
        }
        debug!(key = %key, id = %kind.id(), "registered field type");
        self.types.insert(key, kind)
    }

    /// The implementation registered under `key`. Lookup is exact: `key`
    /// is expected in slug form.
    pub fn resolve(&self, key: &str) -> Option<&Arc<dyn FieldKind>> {
        self.types.get(key)
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.types.contains_key(key)
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// `(key, implementation)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn FieldKind>)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing is registered. Never true for a built registry.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for FieldTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.types.iter().map(|(k, v)| (k, v.id())))
            .finish()
    }
}
