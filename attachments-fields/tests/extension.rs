//! Third-party field types contributed from disk and in process.

use std::path::Path;
use std::sync::Arc;

use attachments_fields::{
    DeclaredField, FieldFactory, FieldParams, FieldTypeRegistry, FieldTypeSource, IdentityTranslator,
    InputKind, TypeResolver,
};
use indexmap::IndexMap;
use tempfile::TempDir;

fn write_definition(dir: &Path, file: &str, yaml: &str) -> std::path::PathBuf {
    let path = dir.join(file);
    std::fs::write(&path, yaml).unwrap();
    path
}

#[test_log::test]
fn contributed_definitions_are_loaded_and_resolvable() {
    let tmp = TempDir::new().unwrap();
    let notes = write_definition(tmp.path(), "notes.yaml", "input: textarea\n");
    let email = write_definition(tmp.path(), "email.yaml", "id: acme::email\ninput: email\n");
    let missing = tmp.path().join("missing.yaml");

    let registry = FieldTypeRegistry::builder()
        .contributor(move |mut sources: IndexMap<String, FieldTypeSource>| {
            sources.insert("notes".into(), FieldTypeSource::Path(notes.clone()));
            sources.insert("missing".into(), FieldTypeSource::Path(missing.clone()));
            sources
        })
        .contributor(move |mut sources: IndexMap<String, FieldTypeSource>| {
            sources.insert("email".into(), FieldTypeSource::Path(email.clone()));
            sources
        })
        .build();

    assert_eq!(
        registry.keys().collect::<Vec<_>>(),
        vec!["text", "notes", "email"]
    );

    let factory = FieldFactory::new(&registry, &IdentityTranslator);
    let resolver = TypeResolver::new(&registry);

    let notes_field = factory
        .create(FieldParams::new().name("Notes").field_type("notes").label("Notes"))
        .unwrap();
    assert_eq!(resolver.type_of(&notes_field), Some("notes"));
    assert!(notes_field.html("attachments").starts_with("<textarea"));

    assert!(factory
        .create(FieldParams::new().field_type("missing"))
        .is_none());
}

#[test]
fn wysiwyg_plugin_scenario() {
    let registry = FieldTypeRegistry::builder()
        .contributor(|mut sources: IndexMap<String, FieldTypeSource>| {
            let kind: Arc<dyn attachments_fields::FieldKind> =
                Arc::new(DeclaredField::new("acme::wysiwyg", InputKind::Textarea));
            sources.insert("wysiwyg".into(), kind.into());
            sources
        })
        .build();

    let field = FieldFactory::new(&registry, &IdentityTranslator)
        .create(
            FieldParams::new()
                .field_type("wysiwyg")
                .name("Body")
                .label("Body"),
        )
        .unwrap();

    assert_eq!(field.field_type(), "wysiwyg");
    assert_eq!(field.name(), "body");
    assert_eq!(TypeResolver::new(&registry).type_of(&field), Some("wysiwyg"));
}
