//! Instance definitions.
//!
//! An [`Instance`] is a named group of fields plus the metadata the edit form
//! needs. [`InstanceParams`] carries the caller's overrides; anything left
//! unset takes the defaults listed on each setter.

use attachments_config::InstanceConfig;
use attachments_fields::{Field, FieldFactory};
use indexmap::IndexSet;
use tracing::debug;

/// Limit value meaning "no maximum number of attachments".
pub const UNLIMITED: i32 = -1;

const DEFAULT_LABEL: &str = "Attachments";
const DEFAULT_BUTTON_TEXT: &str = "Attach";
const DEFAULT_CATEGORIES: [&str; 2] = ["post", "page"];

/// A registered, fully defaulted attachment instance.
#[derive(Debug, Clone)]
pub struct Instance {
    name: String,
    label: String,
    categories: IndexSet<String>,
    limit: i32,
    note: Option<String>,
    button_text: String,
    fields: Vec<Field>,
}

impl Instance {
    /// Normalized instance name, unique within the registry
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Title shown above the instance
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Content categories this instance applies to
    pub fn categories(&self) -> &IndexSet<String> {
        &self.categories
    }

    /// Maximum number of attachments, [`UNLIMITED`] for no maximum
    pub fn limit(&self) -> i32 {
        self.limit
    }

    /// Whether the limit is [`UNLIMITED`].
    pub fn is_unlimited(&self) -> bool {
        self.limit == UNLIMITED
    }

    /// Note shown under the label
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Text of the attach button
    pub fn button_text(&self) -> &str {
        &self.button_text
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Mutable access for filling in runtime values.
    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    /// The field named `name`, which must already be slugified.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Whether the instance applies to `category`.
    pub fn accepts(&self, category: &str) -> bool {
        self.categories.contains(category)
    }
}

/// Overrides for [`InstanceRegistry::register`](crate::InstanceRegistry::register).
///
/// Every field is optional; `None` takes the default named on the matching
/// setter.
#[derive(Debug, Clone, Default)]
pub struct InstanceParams {
    pub label: Option<String>,
    pub categories: Option<Vec<String>>,
    pub limit: Option<i32>,
    pub note: Option<String>,
    pub button_text: Option<String>,
    pub fields: Option<Vec<Field>>,
}

impl InstanceParams {
    /// Params with every key unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults to `"Attachments"`.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// A single category; same as `categories([category])`.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.categories = Some(vec![category.into()]);
        self
    }

    /// Defaults to `post` and `page`. Duplicates collapse.
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Defaults to [`UNLIMITED`].
    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// No note by default.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Defaults to `"Attach"`.
    pub fn button_text(mut self, text: impl Into<String>) -> Self {
        self.button_text = Some(text.into());
        self
    }

    /// Fields as returned by the factory; `None`s (unknown types) are dropped.
    ///
    /// Defaults to a `title` and a `caption` text field.
    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = Option<Field>>,
    {
        self.fields = Some(fields.into_iter().flatten().collect());
        self
    }

    /// Build params from a configured instance, creating its fields with
    /// `factory`. The configured name is not part of the params.
    pub fn from_config(config: InstanceConfig, factory: &FieldFactory<'_>) -> Self {
        let fields = config.fields.map(|params| {
            params
                .into_iter()
                .filter_map(|p| factory.create(p))
                .collect()
        });
        Self {
            label: config.label,
            categories: config.post_type.map(|p| p.into_vec()),
            limit: config.limit,
            note: config.note,
            button_text: config.button_text,
            fields,
        }
    }

    /// Apply defaults and produce the instance stored under `name`.
    pub(crate) fn into_instance(self, name: String, factory: &FieldFactory<'_>) -> Instance {
        let translator = factory.translator();
        let fields = self.fields.unwrap_or_else(|| default_fields(factory));
        let categories = match self.categories {
            Some(categories) => categories.into_iter().collect(),
            None => DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        };

        Instance {
            name,
            label: self
                .label
                .unwrap_or_else(|| translator.translate(DEFAULT_LABEL)),
            categories,
            limit: self.limit.unwrap_or(UNLIMITED),
            note: self.note,
            button_text: self
                .button_text
                .unwrap_or_else(|| translator.translate(DEFAULT_BUTTON_TEXT)),
            fields,
        }
    }
}

fn default_fields(factory: &FieldFactory<'_>) -> Vec<Field> {
    use attachments_fields::FieldParams;

    let fields: Vec<Field> = [
        FieldParams::new().name("title").field_type("text").label("Title"),
        FieldParams::new()
            .name("caption")
            .field_type("text")
            .label("Caption"),
    ]
    .into_iter()
    .filter_map(|params| factory.create(params))
    .collect();
    debug!(count = fields.len(), "built default instance fields");
    fields
}
