//! Views handed to the rendering collaborator.
//!
//! An [`InstanceView`] is the complete, owned description of one instance's
//! edit form: identifiers, escaped values, display classes and the markup
//! each field implementation produced. Views are plain data and serialize to
//! JSON so a host can feed them to whatever template engine it uses.

use std::collections::HashMap;

use attachments_fields::{Field, TypeResolver};
use serde::Serialize;

use crate::instance::Instance;

const CLASS_PREFIX: &str = "attachments-attachment-field";

/// Everything needed to render one field inside an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    /// Slugified field name
    pub name: String,
    /// Registry key of the field's implementation, `None` when no key maps
    /// to it any more.
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub label: String,
    /// `name` attribute of the input
    pub field_name: String,
    /// `id` attribute of the input
    pub field_id: String,
    /// Raw value, `None` when unset
    pub value: Option<String>,
    /// Value escaped for an attribute; empty when unset
    pub input_value: String,
    /// CSS classes; the type class is left out when the type is unknown
    pub classes: Vec<String>,
    /// Markup produced by the field implementation
    pub html: String,
}

impl FieldView {
    /// View of `field` inside `instance`, its type resolved through `types`.
    pub fn new(instance: &str, field: &Field, types: &TypeResolver<'_>) -> Self {
        let ids = field.identifiers(instance);
        let field_type = types.type_of(field).map(str::to_string);

        let mut classes = vec![
            CLASS_PREFIX.to_string(),
            format!("{CLASS_PREFIX}-{instance}"),
        ];
        if let Some(ref key) = field_type {
            classes.push(format!("{CLASS_PREFIX}-{key}"));
        }
        classes.push(format!("attachment-field-{}", field.name()));

        Self {
            name: field.name().to_string(),
            field_type,
            label: field.label().to_string(),
            field_name: ids.field_name,
            field_id: ids.field_id,
            value: field.value().map(str::to_string),
            input_value: field.input_value(),
            classes,
            html: field.html(instance),
        }
    }

    /// Classes joined for a `class` attribute.
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}

/// One instance's edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceView {
    /// Normalized instance name
    pub name: String,
    pub label: String,
    pub note: Option<String>,
    /// Maximum number of attachments, `-1` for no maximum
    pub limit: i32,
    pub button_text: String,
    /// Id of the meta box holding the form, `attachments-<name>`
    pub meta_box_id: String,
    /// Field views in declaration order
    pub fields: Vec<FieldView>,
}

impl InstanceView {
    /// Build the view for `instance`, filling field values from `values`
    /// (keyed by field name). Fields without an entry keep their own value.
    pub fn new(
        instance: &Instance,
        types: &TypeResolver<'_>,
        values: &HashMap<String, String>,
    ) -> Self {
        let fields = instance
            .fields()
            .iter()
            .map(|field| match values.get(field.name()) {
                Some(value) => {
                    let field = field.clone().with_value(value.clone());
                    FieldView::new(instance.name(), &field, types)
                }
                None => FieldView::new(instance.name(), field, types),
            })
            .collect();

        Self {
            name: instance.name().to_string(),
            label: instance.label().to_string(),
            note: instance.note().map(str::to_string),
            limit: instance.limit(),
            button_text: instance.button_text().to_string(),
            meta_box_id: meta_box_id(instance.name()),
            fields,
        }
    }
}

/// Where and how an instance appears on the edit screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaBox {
    /// `attachments-<instance>`
    pub id: String,
    /// The instance label
    pub title: String,
    /// Category whose edit screen shows the box
    pub category: String,
    /// Screen region, always `normal`
    pub context: &'static str,
    /// Placement priority, always `high`
    pub priority: &'static str,
    /// Name of the instance rendered inside
    pub instance: String,
}

impl MetaBox {
    /// Meta box for `instance` on the edit screen of `category`.
    pub fn new(instance: &Instance, category: &str) -> Self {
        Self {
            id: meta_box_id(instance.name()),
            title: instance.label().to_string(),
            category: category.to_string(),
            context: "normal",
            priority: "high",
            instance: instance.name().to_string(),
        }
    }
}

fn meta_box_id(instance: &str) -> String {
    format!("attachments-{instance}")
}

/// Turns an [`InstanceView`] into output for the host.
pub trait Renderer {
    type Output;

    /// Render one instance view.
    fn render(&self, view: &InstanceView) -> Self::Output;
}

/// Renders views as JSON for an external template engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    /// Indent the output
    pub pretty: bool,
}

impl Renderer for JsonRenderer {
    type Output = serde_json::Result<String>;

    fn render(&self, view: &InstanceView) -> Self::Output {
        if self.pretty {
            serde_json::to_string_pretty(view)
        } else {
            serde_json::to_string(view)
        }
    }
}
