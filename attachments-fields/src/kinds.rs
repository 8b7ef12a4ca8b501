//! Field implementations shipped with the crate.
//!
//! [`TextField`] backs the built-in `text` type. [`DeclaredField`] is what the
//! [`DefinitionLoader`](crate::DefinitionLoader) builds from a YAML definition.

use serde::{Deserialize, Serialize};

use crate::field::{Field, FieldKind};

/// Single-line text input.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextField;

impl TextField {
    pub const ID: &'static str = "attachments::text";
}

impl FieldKind for TextField {
    fn id(&self) -> &str {
        Self::ID
    }

    fn html(&self, field: &Field, instance: &str) -> String {
        input_markup("text", field, instance, None, None)
    }
}

/// The HTML control a declared field type renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Textarea,
    Email,
    Url,
    Number,
    Hidden,
}

impl InputKind {
    fn as_str(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Textarea => "textarea",
            InputKind::Email => "email",
            InputKind::Url => "url",
            InputKind::Number => "number",
            InputKind::Hidden => "hidden",
        }
    }
}

/// A field type described by data rather than code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredField {
    id: String,
    input: InputKind,
    placeholder: Option<String>,
    class: Option<String>,
}

impl DeclaredField {
    /// A declared type identified by `id`, rendered with `input`.
    pub fn new(id: impl Into<String>, input: InputKind) -> Self {
        Self {
            id: id.into(),
            input,
            placeholder: None,
            class: None,
        }
    }

    /// Placeholder shown in the empty control.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Extra CSS class appended to the control.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Control rendered for fields of this type.
    pub fn input(&self) -> InputKind {
        self.input
    }
}

impl FieldKind for DeclaredField {
    fn id(&self) -> &str {
        &self.id
    }

    fn html(&self, field: &Field, instance: &str) -> String {
        let placeholder = self.placeholder.as_deref();
        let class = self.class.as_deref();
        match self.input {
            InputKind::Textarea => {
                let ids = field.identifiers(instance);
                let body = field
                    .value()
                    .map(|v| html_escape::encode_text(v).into_owned())
                    .unwrap_or_default();
                format!(
                    r#"<textarea name="{}" id="{}" class="{}"{}>{}</textarea>"#,
                    ids.field_name,
                    ids.field_id,
                    control_class(&ids.field_id, class),
                    placeholder_attr(placeholder),
                    body
                )
            }
            kind => input_markup(kind.as_str(), field, instance, placeholder, class),
        }
    }
}

fn input_markup(
    input_type: &str,
    field: &Field,
    instance: &str,
    placeholder: Option<&str>,
    class: Option<&str>,
) -> String {
    let ids = field.identifiers(instance);
    format!(
        r#"<input type="{}" name="{}" id="{}" class="{}" value="{}"{} />"#,
        input_type,
        ids.field_name,
        ids.field_id,
        control_class(&ids.field_id, class),
        field.input_value(),
        placeholder_attr(placeholder)
    )
}

fn control_class(field_id: &str, extra: Option<&str>) -> String {
    let mut class = format!("attachments attachments-field attachments-field-{field_id}");
    if let Some(extra) = extra {
        class.push(' ');
        class.push_str(&html_escape::encode_double_quoted_attribute(extra));
    }
    class
}

fn placeholder_attr(placeholder: Option<&str>) -> String {
    placeholder
        .map(|p| {
            format!(
                r#" placeholder="{}""#,
                html_escape::encode_double_quoted_attribute(p)
            )
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn field_of(kind: Arc<dyn FieldKind>, value: Option<&str>) -> Field {
        let mut field = Field::new("body".into(), "body".into(), "Body".into(), kind);
        field.set_value(value.map(str::to_string));
        field
    }

    #[test]
    fn text_field_renders_input() {
        let field = field_of(Arc::new(TextField), Some("a <b>"));
        let html = field.html("attachments");
        assert!(html.starts_with(r#"<input type="text""#));
        assert!(html.contains(r#"name="attachments[attachments][body]""#));
        assert!(html.contains(r#"id="attachments-attachments-body""#));
        assert!(html.contains("a &lt;b&gt;"));
    }

    #[test]
    fn declared_textarea_renders_body() {
        let kind = DeclaredField::new("declared:notes", InputKind::Textarea)
            .with_placeholder("Write something")
            .with_class("wide");
        let field = field_of(Arc::new(kind), Some("x & y"));
        let html = field.html("gallery");
        assert!(html.starts_with("<textarea"));
        assert!(html.contains(r#"placeholder="Write something""#));
        assert!(html.contains("attachments-field-attachments-gallery-body wide"));
        assert!(html.contains(">x &amp; y</textarea>"));
    }

    #[test]
    fn declared_input_uses_kind_as_type() {
        let kind = DeclaredField::new("declared:link", InputKind::Url);
        let html = field_of(Arc::new(kind), None).html("links");
        assert!(html.starts_with(r#"<input type="url""#));
        assert!(html.contains(r#"value="""#));
    }

    #[test]
    fn input_kind_deserializes_lowercase() {
        let kind: InputKind = serde_yaml_ng::from_str("textarea").unwrap();
        assert_eq!(kind, InputKind::Textarea);
    }
}
