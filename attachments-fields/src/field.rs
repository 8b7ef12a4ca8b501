//! The [`Field`] value and the [`FieldKind`] capability behind it.

use std::fmt;
use std::sync::Arc;

/// Rendering and formatting behaviour shared by every field of one type.
///
/// A `FieldKind` is what gets registered under a type key. The same
/// implementation may be registered under several keys; [`FieldKind::id`] is
/// what the reverse lookup compares.
pub trait FieldKind: fmt::Debug + Send + Sync {
    /// Stable identifier of this implementation (e.g. `attachments::text`).
    fn id(&self) -> &str;

    /// Editable markup for `field` when shown inside `instance`.
    fn html(&self, field: &Field, instance: &str) -> String;

    /// Escape a stored value for use inside an input's `value` attribute.
    fn format_value_for_input(&self, value: &str) -> String {
        html_escape::encode_quoted_attribute(value).into_owned()
    }
}

/// Form identifiers of a field once it is placed in an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIdentifiers {
    /// `name` attribute, e.g. `attachments[featured][caption]`
    pub field_name: String,
    /// `id` attribute, e.g. `attachments-featured-caption`
    pub field_id: String,
}

/// A single typed, named, labeled unit of attachment data.
///
/// Fields are built by [`FieldFactory`](crate::FieldFactory) and are immutable
/// afterwards except for their runtime value.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    field_type: String,
    label: String,
    value: Option<String>,
    kind: Arc<dyn FieldKind>,
}

impl Field {
    pub(crate) fn new(
        name: String,
        field_type: String,
        label: String,
        kind: Arc<dyn FieldKind>,
    ) -> Self {
        Self {
            name,
            field_type,
            label,
            value: None,
            kind,
        }
    }

    /// Slugified field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slugified type key the field was created with
    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    /// Translated label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current value, `None` when unset
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Replace the current value.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// Builder-style variant of [`Field::set_value`].
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// The implementation this field was constructed from.
    pub fn kind(&self) -> &Arc<dyn FieldKind> {
        &self.kind
    }

    /// Identifier of the implementation, see [`FieldKind::id`].
    pub fn implementation_id(&self) -> &str {
        self.kind.id()
    }

    /// Form identifiers for this field inside `instance`.
    pub fn identifiers(&self, instance: &str) -> FieldIdentifiers {
        FieldIdentifiers {
            field_name: format!("attachments[{instance}][{}]", self.name),
            field_id: format!("attachments-{instance}-{}", self.name),
        }
    }

    /// Current value escaped for an input attribute; empty when unset.
    pub fn input_value(&self) -> String {
        self.value
            .as_deref()
            .map(|v| self.kind.format_value_for_input(v))
            .unwrap_or_default()
    }

    /// Editable markup produced by the field's implementation.
    pub fn html(&self, instance: &str) -> String {
        self.kind.html(self, instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::TextField;

    fn caption() -> Field {
        Field::new(
            "caption".into(),
            "text".into(),
            "Caption".into(),
            Arc::new(TextField),
        )
    }

    #[test]
    fn identifiers_include_instance_and_name() {
        let ids = caption().identifiers("featured");
        assert_eq!(ids.field_name, "attachments[featured][caption]");
        assert_eq!(ids.field_id, "attachments-featured-caption");
    }

    #[test]
    fn value_is_mutable_and_escaped_for_input() {
        let mut field = caption();
        assert_eq!(field.value(), None);
        assert_eq!(field.input_value(), "");

        field.set_value(Some(r#"Say "hi" & 'bye'"#.into()));
        assert_eq!(field.value(), Some(r#"Say "hi" & 'bye'"#));
        let escaped = field.input_value();
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('\''));
        assert!(escaped.contains("&amp;"));
    }

    #[test]
    fn implementation_id_comes_from_kind() {
        assert_eq!(caption().implementation_id(), TextField::ID);
    }
}
