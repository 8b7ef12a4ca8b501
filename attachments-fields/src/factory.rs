//! Validated construction of [`Field`]s.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::field::Field;
use crate::registry::{FieldTypeRegistry, BUILTIN_TEXT};
use crate::slug::slugify;
use crate::translate::Translator;

const DEFAULT_NAME: &str = "title";
const DEFAULT_LABEL: &str = "Title";

/// Parameters for [`FieldFactory::create`].
///
/// Every key is optional; provided keys replace the defaults
/// (`name = "title"`, `type = "text"`, `label = "Title"`) one by one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FieldParams {
    /// Params with every key unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Field name; slugified on creation.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Registry key of the field type, matched exactly.
    pub fn field_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    /// Label shown next to the input; translated on creation.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Builds fields against a finalized [`FieldTypeRegistry`].
#[derive(Clone, Copy)]
pub struct FieldFactory<'a> {
    registry: &'a FieldTypeRegistry,
    translator: &'a dyn Translator,
}

impl<'a> FieldFactory<'a> {
    pub fn new(registry: &'a FieldTypeRegistry, translator: &'a dyn Translator) -> Self {
        Self {
            registry,
            translator,
        }
    }

    /// Create a field, or `None` when the requested type is not registered.
    ///
    /// The type is looked up as given; name and type are slugified and the
    /// label translated only once the type is known.
    pub fn create(&self, params: FieldParams) -> Option<Field> {
        let name = params.name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        let field_type = params
            .field_type
            .unwrap_or_else(|| BUILTIN_TEXT.to_string());
        let label = params.label.unwrap_or_else(|| DEFAULT_LABEL.to_string());

        let Some(kind) = self.registry.resolve(&field_type) else {
            debug!(name = %name, field_type = %field_type, "unknown field type, no field created");
            return None;
        };

        Some(Field::new(
            slugify(&name),
            slugify(&field_type),
            self.translator.translate(&label),
            kind.clone(),
        ))
    }

    /// Registry the factory resolves types against.
    pub fn registry(&self) -> &'a FieldTypeRegistry {
        self.registry
    }

    /// Translator applied to labels; callers reuse it for other UI text.
    pub fn translator(&self) -> &'a dyn Translator {
        self.translator
    }
}
