//! Configuration types
//!
//! Field types and instances are lists rather than maps: their declaration
//! order is their registration order, and figment does not preserve the key
//! order of dictionaries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use attachments_fields::FieldParams;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Top-level Attachments configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentsConfig {
    /// Register the stock `attachments` instance during bootstrap
    pub register_default_instance: bool,

    /// Declarative field type definitions, in registration order
    pub field_types: Vec<FieldTypeConfig>,

    /// Instance definitions, in registration order
    pub instances: Vec<InstanceConfig>,

    /// Message catalog used to translate labels and button text
    pub translations: HashMap<String, String>,

    /// Categories the host knows about; empty means every category exists
    pub known_categories: Vec<String>,
}

impl Default for AttachmentsConfig {
    fn default() -> Self {
        Self {
            register_default_instance: true,
            field_types: Vec::new(),
            instances: Vec::new(),
            translations: HashMap::new(),
            known_categories: Vec::new(),
        }
    }
}

impl AttachmentsConfig {
    /// Reject values no instance could be built from.
    pub fn validate(&self) -> ConfigResult<()> {
        for (index, field_type) in self.field_types.iter().enumerate() {
            if field_type.key.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("field_types[{index}].key"),
                    message: "field type keys must not be empty".into(),
                });
            }
        }
        for (index, instance) in self.instances.iter().enumerate() {
            if instance.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("instances[{index}].name"),
                    message: "instance names must not be empty".into(),
                });
            }
            if let Some(limit) = instance.limit {
                if limit < -1 {
                    return Err(ConfigError::InvalidValue {
                        key: format!("instances.{}.limit", instance.name),
                        message: format!("must be -1 (unlimited) or greater, got {limit}"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Anchor relative field type paths at `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for field_type in &mut self.field_types {
            if field_type.path.is_relative() {
                field_type.path = base.join(&field_type.path);
            }
        }
    }
}

/// A declarative field type: the registry key and the definition file
/// backing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTypeConfig {
    /// Registry key, slugified when registered
    pub key: String,
    /// Relative paths are anchored at the directory the declaring file
    /// belongs to
    pub path: PathBuf,
}

impl FieldTypeConfig {
    /// A field type `key` defined by the file at `path`.
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }
}

/// One instance as written in configuration. Unset keys take the instance
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// Instance name, normalized when registered
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_type: Option<PostTypes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldParams>>,
}

impl InstanceConfig {
    /// An instance named `name` with every other key unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A single category or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostTypes {
    One(String),
    Many(Vec<String>),
}

impl PostTypes {
    /// The categories as a list, a single one becoming a one-element list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            PostTypes::One(category) => vec![category],
            PostTypes::Many(categories) => categories,
        }
    }
}
