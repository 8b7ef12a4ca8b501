//! Field type registry and field factory
//!
//! `attachments-fields` owns everything an attachment field needs before it is
//! placed in an instance: the slug rules for names and types, the translation
//! hook for labels, the registry of field *types* and the factory that turns
//! loose parameters into a [`Field`].
//!
//! # Architecture
//!
//! - **Open registry**: the built-in `text` type is always present; contributors
//!   extend the `{key: source}` mapping before the registry is finalized
//! - **Recoverable failures**: unknown types and unloadable sources degrade to
//!   `None` / a skipped key, never an error
//! - **Reverse lookup**: [`TypeResolver`] maps a built field back to the first
//!   key registered for its implementation

pub mod error;
pub mod factory;
pub mod field;
pub mod kinds;
pub mod loader;
pub mod registry;
pub mod resolver;
pub mod slug;
pub mod translate;

pub use error::{FieldsError, Result};
pub use factory::{FieldFactory, FieldParams};
pub use field::{Field, FieldIdentifiers, FieldKind};
pub use kinds::{DeclaredField, InputKind, TextField};
pub use loader::{DefinitionLoader, FieldTypeDef, FieldTypeLoader};
pub use registry::{
    FieldTypeContributor, FieldTypeRegistry, FieldTypeRegistryBuilder, FieldTypeSource,
    BUILTIN_TEXT,
};
pub use resolver::TypeResolver;
pub use slug::{instance_key, slugify};
pub use translate::{CatalogTranslator, IdentityTranslator, Translator};
