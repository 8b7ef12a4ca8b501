//! Turning a [`FieldTypeSource`] into a usable implementation.
//!
//! Declarative definitions are YAML files:
//!
//! ```yaml
//! id: acme::notes      # optional, defaults to "declared:<file stem>"
//! input: textarea      # text | textarea | email | url | number | hidden
//! placeholder: Notes
//! class: wide
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::field::FieldKind;
use crate::kinds::{DeclaredField, InputKind};
use crate::registry::FieldTypeSource;

/// Loads the implementation behind a contributed source.
pub trait FieldTypeLoader: Send + Sync {
    fn load(&self, key: &str, source: &FieldTypeSource) -> Result<Arc<dyn FieldKind>>;
}

/// On-disk shape of a declarative field type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTypeDef {
    /// Implementation id; defaults to `declared:<file stem>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Defaults to a single-line text input
    #[serde(default = "default_input")]
    pub input: InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

fn default_input() -> InputKind {
    InputKind::Text
}

impl FieldTypeDef {
    fn into_kind(self, path: &Path) -> DeclaredField {
        let id = self.id.unwrap_or_else(|| {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            format!("declared:{stem}")
        });
        let mut kind = DeclaredField::new(id, self.input);
        if let Some(placeholder) = self.placeholder {
            kind = kind.with_placeholder(placeholder);
        }
        if let Some(class) = self.class {
            kind = kind.with_class(class);
        }
        kind
    }
}

/// Default loader: in-process implementations pass through, paths are read
/// as YAML [`FieldTypeDef`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefinitionLoader;

impl DefinitionLoader {
    fn load_path(&self, path: &Path) -> Result<Arc<dyn FieldKind>> {
        if !path.is_file() {
            return Err(FieldsError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let def: FieldTypeDef =
            serde_yaml_ng::from_str(&content).map_err(|e| FieldsError::InvalidDefinition {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let kind = def.into_kind(path);
        debug!(path = %path.display(), id = %kind.id(), "loaded declared field type");
        Ok(Arc::new(kind))
    }
}

impl FieldTypeLoader for DefinitionLoader {
    fn load(&self, _key: &str, source: &FieldTypeSource) -> Result<Arc<dyn FieldKind>> {
        match source {
            FieldTypeSource::Implementation(kind) => Ok(Arc::clone(kind)),
            FieldTypeSource::Path(path) => self.load_path(path),
        }
    }
}
